//! `boolean`: accepts JSON booleans only. Strings such as `"true"` are
//! rejected rather than coerced.

use serde_json::Value;

use confval_core::{SchemaError, SchemaPath};

use super::{process, type_mismatch, Process, Type, TypeOptions};
use crate::value::SchemaValue;

/// Options for [`BooleanType`].
pub type BooleanOptions = TypeOptions<bool>;

/// Descriptor for boolean values.
#[derive(Debug)]
pub struct BooleanType {
    options: BooleanOptions,
}

impl BooleanType {
    /// Create a boolean descriptor.
    pub fn new(options: BooleanOptions) -> Self {
        Self { options }
    }
}

impl Process for BooleanType {
    type Output = bool;

    fn options(&self) -> &TypeOptions<bool> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<bool, SchemaError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(type_mismatch("boolean", other, path)),
        }
    }

    fn output(value: bool) -> SchemaValue {
        SchemaValue::Bool(value)
    }
}

impl Type for BooleanType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
