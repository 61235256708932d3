//! `maybe`: makes any descriptor optional. Absence is accepted without
//! consulting the child; `null` is never treated as absence.

use serde_json::Value;

use confval_core::{SchemaError, SchemaPath};

use super::Type;
use crate::value::SchemaValue;

/// Optional wrapper around exactly one child descriptor.
#[derive(Debug)]
pub struct MaybeType {
    inner: Box<dyn Type>,
}

impl MaybeType {
    /// Wrap `inner`.
    pub fn new(inner: impl Type + 'static) -> Self {
        Self {
            inner: inner.boxed(),
        }
    }
}

impl Type for MaybeType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        match value {
            None => Ok(None),
            Some(Value::Null) => Err(SchemaError::new(
                "expected value to either be undefined or defined, but not [null]",
                path.clone(),
            )),
            Some(value) => self.inner.validate_at(Some(value), path),
        }
    }
}
