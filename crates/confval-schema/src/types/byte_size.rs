//! `byte_size`: coerces byte-size strings and raw byte counts into
//! [`ByteSizeValue`], with optional inclusive bounds.
//!
//! `min`, `max` and `default_value` may be given as a value, a parseable
//! string or a raw byte count. They are normalized once, when the
//! descriptor is built; a bad option is a [`DefinitionError`], not a
//! validation failure.

use serde_json::Value;

use confval_core::{ByteSizeUnit, ByteSizeValue, DefinitionError, SchemaError, SchemaPath};

use super::{process, type_mismatch, Process, Type, TypeOptions, Validator};
use crate::value::SchemaValue;

/// A byte size as written in schema options.
#[derive(Debug, Clone, PartialEq)]
pub enum ByteSizeOption {
    /// An already-built value.
    Value(ByteSizeValue),
    /// A string such as `"10mb"`.
    Text(String),
    /// A raw byte count.
    Bytes(u64),
}

impl ByteSizeOption {
    fn normalize(self, option: &'static str) -> Result<ByteSizeValue, DefinitionError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Text(text) => ByteSizeValue::parse(&text)
                .map_err(|source| DefinitionError::InvalidOption { option, source }),
            Self::Bytes(bytes) => Ok(ByteSizeValue::new(bytes)),
        }
    }
}

impl From<ByteSizeValue> for ByteSizeOption {
    fn from(value: ByteSizeValue) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ByteSizeOption {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ByteSizeOption {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for ByteSizeOption {
    fn from(bytes: u64) -> Self {
        Self::Bytes(bytes)
    }
}

/// Options for [`ByteSizeType`].
#[derive(Debug, Clone, Default)]
pub struct ByteSizeOptions {
    /// Value substituted when the input is absent.
    pub default_value: Option<ByteSizeOption>,
    /// Predicate run after all other checks.
    pub validate: Option<Validator<ByteSizeValue>>,
    /// Inclusive lower bound.
    pub min: Option<ByteSizeOption>,
    /// Inclusive upper bound.
    pub max: Option<ByteSizeOption>,
}

/// Descriptor for byte sizes.
#[derive(Debug)]
pub struct ByteSizeType {
    options: TypeOptions<ByteSizeValue>,
    min: Option<ByteSizeValue>,
    max: Option<ByteSizeValue>,
}

impl ByteSizeType {
    /// Create a byte-size descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::InvalidOption` if an option string does not
    /// parse, or `DefinitionError::InvertedRange` if `min` exceeds `max`.
    pub fn new(options: ByteSizeOptions) -> Result<Self, DefinitionError> {
        let ByteSizeOptions {
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

impl Process for ByteSizeType {
    type Output = ByteSizeValue;

    fn options(&self) -> &TypeOptions<ByteSizeValue> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<ByteSizeValue, SchemaError> {
        let parsed = match value {
            Value::String(text) => ByteSizeValue::parse(text),
            Value::Number(n) => match n.as_u64() {
                Some(bytes) => Ok(ByteSizeValue::new(bytes)),
                None => ByteSizeValue::from_number(n.as_f64().unwrap_or(f64::NAN)),
            },
            other => return Err(type_mismatch("ByteSize", other, path)),
        };
        parsed.map_err(|e| SchemaError::from_value_error(&e, path))
    }

    fn check(&self, value: ByteSizeValue, path: &SchemaPath) -> Result<ByteSizeValue, SchemaError> {
        if let Some(min) = self.min.filter(|min| value.is_less_than(min)) {
            return Err(SchemaError::new(
                format!(
                    "Value is [{value}] ([{}]) but it must be equal to or greater than [{min}]",
                    value.to_string_in(Some(ByteSizeUnit::Bytes))
                ),
                path.clone(),
            ));
        }
        if let Some(max) = self.max.filter(|max| value.is_greater_than(max)) {
            return Err(SchemaError::new(
                format!(
                    "Value is [{value}] ([{}]) but it must be equal to or less than [{max}]",
                    value.to_string_in(Some(ByteSizeUnit::Bytes))
                ),
                path.clone(),
            ));
        }
        Ok(value)
    }

    fn output(value: ByteSizeValue) -> SchemaValue {
        SchemaValue::ByteSize(value)
    }
}

impl Type for ByteSizeType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
