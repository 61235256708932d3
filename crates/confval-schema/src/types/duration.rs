//! `duration`: coerces duration strings and raw millisecond counts into
//! [`DurationValue`], with optional inclusive bounds.

use serde_json::Value;

use confval_core::{DefinitionError, DurationUnit, DurationValue, SchemaError, SchemaPath};

use super::{process, type_mismatch, Process, Type, TypeOptions, Validator};
use crate::value::SchemaValue;

/// A duration as written in schema options.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationOption {
    /// An already-built value.
    Value(DurationValue),
    /// A string such as `"30s"`.
    Text(String),
    /// A raw millisecond count.
    Millis(u64),
}

impl DurationOption {
    fn normalize(self, option: &'static str) -> Result<DurationValue, DefinitionError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Text(text) => DurationValue::parse(&text)
                .map_err(|source| DefinitionError::InvalidOption { option, source }),
            Self::Millis(millis) => Ok(DurationValue::from_millis(millis)),
        }
    }
}

impl From<DurationValue> for DurationOption {
    fn from(value: DurationValue) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for DurationOption {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DurationOption {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for DurationOption {
    fn from(millis: u64) -> Self {
        Self::Millis(millis)
    }
}

/// Options for [`DurationType`].
#[derive(Debug, Clone, Default)]
pub struct DurationOptions {
    /// Value substituted when the input is absent.
    pub default_value: Option<DurationOption>,
    /// Predicate run after all other checks.
    pub validate: Option<Validator<DurationValue>>,
    /// Inclusive lower bound.
    pub min: Option<DurationOption>,
    /// Inclusive upper bound.
    pub max: Option<DurationOption>,
}

/// Descriptor for durations.
#[derive(Debug)]
pub struct DurationType {
    options: TypeOptions<DurationValue>,
    min: Option<DurationValue>,
    max: Option<DurationValue>,
}

impl DurationType {
    /// Create a duration descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::InvalidOption` if an option string does not
    /// parse, or `DefinitionError::InvertedRange` if `min` exceeds `max`.
    pub fn new(options: DurationOptions) -> Result<Self, DefinitionError> {
        let DurationOptions {
            default_value,
            validate,
            min,
            max,
        } = options;

        let default_value = default_value.map(|d| d.normalize("defaultValue")).transpose()?;
        let min = min.map(|m| m.normalize("min")).transpose()?;
        let max = max.map(|m| m.normalize("max")).transpose()?;
        if let (Some(min), Some(max)) = (min, max) {
            if min.is_greater_than(&max) {
                return Err(DefinitionError::InvertedRange {
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }

        Ok(Self {
            options: TypeOptions {
                default_value,
                validate,
            },
            min,
            max,
        })
    }
}

impl Process for DurationType {
    type Output = DurationValue;

    fn options(&self) -> &TypeOptions<DurationValue> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<DurationValue, SchemaError> {
        let parsed = match value {
            Value::String(text) => DurationValue::parse(text),
            Value::Number(n) => match n.as_u64() {
                Some(millis) => Ok(DurationValue::from_millis(millis)),
                None => DurationValue::from_number(n.as_f64().unwrap_or(f64::NAN)),
            },
            other => return Err(type_mismatch("Duration", other, path)),
        };
        parsed.map_err(|e| SchemaError::from_value_error(&e, path))
    }

    fn check(&self, value: DurationValue, path: &SchemaPath) -> Result<DurationValue, SchemaError> {
        if let Some(min) = self.min.filter(|min| value.is_less_than(min)) {
            return Err(SchemaError::new(
                format!(
                    "Value is [{value}] ([{}]) but it must be equal to or greater than [{min}]",
                    value.to_string_in(Some(DurationUnit::Milliseconds))
                ),
                path.clone(),
            ));
        }
        if let Some(max) = self.max.filter(|max| value.is_greater_than(max)) {
            return Err(SchemaError::new(
                format!(
                    "Value is [{value}] ([{}]) but it must be equal to or less than [{max}]",
                    value.to_string_in(Some(DurationUnit::Milliseconds))
                ),
                path.clone(),
            ));
        }
        Ok(value)
    }

    fn output(value: DurationValue) -> SchemaValue {
        SchemaValue::Duration(value)
    }
}

impl Type for DurationType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
