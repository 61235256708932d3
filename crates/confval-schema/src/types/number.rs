//! `number`: accepts JSON numbers and strings whose trimmed content is a
//! finite decimal number. Integer input stays an integer in the output.

use serde_json::{Number, Value};

use confval_core::{SchemaError, SchemaPath};

use super::{process, type_mismatch, Process, Type, TypeOptions, Validator};
use crate::value::SchemaValue;

/// Options for [`NumberType`].
#[derive(Debug, Clone, Default)]
pub struct NumberOptions {
    /// Value substituted when the input is absent.
    pub default_value: Option<Number>,
    /// Predicate run after all other checks.
    pub validate: Option<Validator<Number>>,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
}

/// Descriptor for numeric values.
#[derive(Debug)]
pub struct NumberType {
    options: TypeOptions<Number>,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberType {
    /// Create a number descriptor.
    pub fn new(options: NumberOptions) -> Self {
        let NumberOptions {
            default_value,
            validate,
            min,
            max,
        } = options;
        Self {
            options: TypeOptions {
                default_value,
                validate,
            },
            min,
            max,
        }
    }
}

/// Parse a numeric string. Integers are kept exact; anything else must be a
/// finite float.
fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(n) = text.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(n.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

impl Process for NumberType {
    type Output = Number;

    fn options(&self) -> &TypeOptions<Number> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<Number, SchemaError> {
        match value {
            Value::Number(n) => Ok(n.clone()),
            Value::String(s) => parse_number(s).ok_or_else(|| type_mismatch("number", value, path)),
            other => Err(type_mismatch("number", other, path)),
        }
    }

    fn check(&self, value: Number, path: &SchemaPath) -> Result<Number, SchemaError> {
        let Some(n) = value.as_f64() else {
            return Ok(value);
        };
        if let Some(min) = self.min.filter(|min| n < *min) {
            return Err(SchemaError::new(
                format!("Value must be equal to or greater than [{min}]."),
                path.clone(),
            ));
        }
        if let Some(max) = self.max.filter(|max| n > *max) {
            return Err(SchemaError::new(
                format!("Value must be equal to or lower than [{max}]."),
                path.clone(),
            ));
        }
        Ok(value)
    }

    fn output(value: Number) -> SchemaValue {
        SchemaValue::Number(value)
    }
}

impl Type for NumberType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
