//! `string`: accepts JSON strings only, with optional length bounds and a
//! regular-expression pattern. Lengths count Unicode scalar values.

use regex::Regex;
use serde_json::Value;

use confval_core::{SchemaError, SchemaPath};

use super::{process, type_mismatch, Process, Type, TypeOptions, Validator};
use crate::value::SchemaValue;

/// Options for [`StringType`].
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    /// Value substituted when the input is absent.
    pub default_value: Option<String>,
    /// Predicate run after all other checks.
    pub validate: Option<Validator<String>>,
    /// Minimum length, inclusive.
    pub min_length: Option<usize>,
    /// Maximum length, inclusive.
    pub max_length: Option<usize>,
    /// Pattern the value must match somewhere (anchor it for a full match).
    pub pattern: Option<Regex>,
}

/// Descriptor for string values.
#[derive(Debug)]
pub struct StringType {
    options: TypeOptions<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl StringType {
    /// Create a string descriptor.
    pub fn new(options: StringOptions) -> Self {
        let StringOptions {
            default_value,
            validate,
            min_length,
            max_length,
            pattern,
        } = options;
        Self {
            options: TypeOptions {
                default_value,
                validate,
            },
            min_length,
            max_length,
            pattern,
        }
    }
}

impl Process for StringType {
    type Output = String;

    fn options(&self) -> &TypeOptions<String> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<String, SchemaError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(type_mismatch("string", other, path)),
        }
    }

    fn check(&self, value: String, path: &SchemaPath) -> Result<String, SchemaError> {
        let length = value.chars().count();
        if let Some(min) = self.min_length.filter(|min| length < *min) {
            return Err(SchemaError::new(
                format!("value is [{value}] but it must have a minimum length of [{min}]."),
                path.clone(),
            ));
        }
        if let Some(max) = self.max_length.filter(|max| length > *max) {
            return Err(SchemaError::new(
                format!("value is [{value}] but it must have a maximum length of [{max}]."),
                path.clone(),
            ));
        }
        if let Some(pattern) = self.pattern.as_ref().filter(|p| !p.is_match(&value)) {
            return Err(SchemaError::new(
                format!("value is [{value}] but it must match the pattern [{pattern}]."),
                path.clone(),
            ));
        }
        Ok(value)
    }

    fn output(value: String) -> SchemaValue {
        SchemaValue::String(value)
    }
}

impl Type for StringType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
