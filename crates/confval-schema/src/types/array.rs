//! `array_of`: validates every element of a sequence against one item
//! descriptor. Elements are addressed by index; the first invalid element
//! fails the whole array.

use serde_json::Value;

use confval_core::{SchemaError, SchemaPath};

use super::{process, type_mismatch, Process, Type, TypeOptions, Validator};
use crate::value::SchemaValue;

/// Options for [`ArrayType`].
#[derive(Debug, Clone, Default)]
pub struct ArrayOptions {
    /// Elements substituted when the input is absent.
    pub default_value: Option<Vec<SchemaValue>>,
    /// Predicate run after all other checks.
    pub validate: Option<Validator<Vec<SchemaValue>>>,
    /// Minimum number of elements, inclusive.
    pub min_size: Option<usize>,
    /// Maximum number of elements, inclusive.
    pub max_size: Option<usize>,
}

/// Descriptor for homogeneous sequences.
#[derive(Debug)]
pub struct ArrayType {
    item: Box<dyn Type>,
    options: TypeOptions<Vec<SchemaValue>>,
    min_size: Option<usize>,
    max_size: Option<usize>,
}

impl ArrayType {
    /// Create an array descriptor whose elements must satisfy `item`.
    pub fn new(item: impl Type + 'static, options: ArrayOptions) -> Self {
        let ArrayOptions {
            default_value,
            validate,
            min_size,
            max_size,
        } = options;
        Self {
            item: item.boxed(),
            options: TypeOptions {
                default_value,
                validate,
            },
            min_size,
            max_size,
        }
    }
}

impl Process for ArrayType {
    type Output = Vec<SchemaValue>;

    fn options(&self) -> &TypeOptions<Vec<SchemaValue>> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<Vec<SchemaValue>, SchemaError> {
        let Value::Array(items) = value else {
            return Err(type_mismatch("array", value, path));
        };

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(validated) = self.item.validate_at(Some(item), &path.child(index))? {
                output.push(validated);
            }
        }
        Ok(output)
    }

    fn check(&self, value: Vec<SchemaValue>, path: &SchemaPath) -> Result<Vec<SchemaValue>, SchemaError> {
        let size = value.len();
        if let Some(min) = self.min_size.filter(|min| size < *min) {
            return Err(SchemaError::new(
                format!("array size is [{size}], but cannot be smaller than [{min}]"),
                path.clone(),
            ));
        }
        if let Some(max) = self.max_size.filter(|max| size > *max) {
            return Err(SchemaError::new(
                format!("array size is [{size}], but cannot be greater than [{max}]"),
                path.clone(),
            ));
        }
        Ok(value)
    }

    fn output(value: Vec<SchemaValue>) -> SchemaValue {
        SchemaValue::Array(value)
    }
}

impl Type for ArrayType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
