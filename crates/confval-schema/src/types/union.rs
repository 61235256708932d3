//! `one_of`: the input must satisfy at least one of an ordered list of
//! alternatives. The first alternative that accepts the input decides the
//! output; later alternatives are not consulted.

use std::fmt::Write as _;

use serde_json::Value;

use confval_core::{DefinitionError, SchemaError, SchemaPath};

use super::{run_validator, Type, TypeOptions};
use crate::value::SchemaValue;

/// Options for [`UnionType`].
pub type OneOfOptions = TypeOptions<SchemaValue>;

/// Fewest alternatives a union accepts.
pub const MIN_ALTERNATIVES: usize = 2;
/// Most alternatives a union accepts.
pub const MAX_ALTERNATIVES: usize = 10;

/// Descriptor accepting any one of several alternatives.
#[derive(Debug)]
pub struct UnionType {
    alternatives: Vec<Box<dyn Type>>,
    options: OneOfOptions,
}

impl UnionType {
    /// Create a union over `alternatives`, tried in the given order.
    pub fn new(alternatives: Vec<Box<dyn Type>>, options: OneOfOptions) -> Result<Self, DefinitionError> {
        let got = alternatives.len();
        if !(MIN_ALTERNATIVES..=MAX_ALTERNATIVES).contains(&got) {
            return Err(DefinitionError::UnionArity {
                got,
                min: MIN_ALTERNATIVES,
                max: MAX_ALTERNATIVES,
            });
        }
        Ok(Self {
            alternatives,
            options,
        })
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Always false: a union has at least two alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl Type for UnionType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        if value.is_none() {
            if let Some(default) = &self.options.default_value {
                tracing::debug!(path = %path, "substituting default for absent value");
                run_validator(self.options.validate.as_ref(), default, path)?;
                return Ok(Some(default.clone()));
            }
        }

        let mut failures = Vec::with_capacity(self.alternatives.len());
        for (index, alternative) in self.alternatives.iter().enumerate() {
            match alternative.validate_at(value, path) {
                Ok(output) => {
                    if let Some(output) = &output {
                        run_validator(self.options.validate.as_ref(), output, path)?;
                    }
                    return Ok(output);
                }
                Err(err) => {
                    tracing::trace!(path = %path, alternative = index, error = %err, "union alternative rejected input");
                    failures.push(err);
                }
            }
        }

        tracing::debug!(path = %path, alternatives = failures.len(), "no union alternative accepted input");
        let mut message = String::from("types that failed validation:");
        for (index, err) in failures.iter().enumerate() {
            let detail = if err.path() == path {
                err.message().to_string()
            } else {
                err.to_string()
            };
            let _ = write!(message, "\n- [{index}]: {detail}");
        }
        Err(SchemaError::new(message, path.clone()))
    }
}
