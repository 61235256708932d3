//! `map_of`: a dictionary with arbitrary keys, each key and value validated
//! by its own descriptor.

use serde_json::Value;

use confval_core::{SchemaError, SchemaPath};

use super::{process, Process, Type, TypeOptions};
use crate::value::{detect_type, SchemaValue};

/// Options for [`MapOfType`].
pub type MapOfOptions = TypeOptions<SchemaValue>;

/// Descriptor for key/value dictionaries.
#[derive(Debug)]
pub struct MapOfType {
    key: Box<dyn Type>,
    value: Box<dyn Type>,
    options: MapOfOptions,
}

impl MapOfType {
    /// Create a map descriptor. Keys are presented to `key` as JSON strings.
    pub fn new(key: impl Type + 'static, value: impl Type + 'static, options: MapOfOptions) -> Self {
        Self {
            key: key.boxed(),
            value: value.boxed(),
            options,
        }
    }
}

impl Process for MapOfType {
    type Output = SchemaValue;

    fn options(&self) -> &MapOfOptions {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<SchemaValue, SchemaError> {
        let Value::Object(input) = value else {
            return Err(SchemaError::new(
                format!(
                    "expected value of type [Map] or [Object] but got [{}]",
                    detect_type(Some(value))
                ),
                path.clone(),
            ));
        };

        let mut entries: Vec<(SchemaValue, SchemaValue)> = Vec::with_capacity(input.len());
        for (raw_key, raw_value) in input {
            let key_path = path.child(format!("key(\"{raw_key}\")"));
            let key = self
                .key
                .validate_at(Some(&Value::String(raw_key.clone())), &key_path)?
                .ok_or_else(|| super::required(&key_path))?;
            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(SchemaError::new(
                    format!("duplicate key [{}]", key.map_key()),
                    key_path,
                ));
            }

            let value_path = path.child(raw_key);
            let Some(validated) = self.value.validate_at(Some(raw_value), &value_path)? else {
                continue;
            };
            entries.push((key, validated));
        }
        Ok(SchemaValue::Map(entries))
    }

    fn output(value: SchemaValue) -> SchemaValue {
        value
    }
}

impl Type for MapOfType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
