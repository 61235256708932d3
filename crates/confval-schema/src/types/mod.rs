//! # Type Descriptors
//!
//! Every node of a schema tree implements [`Type`]. Descriptors are
//! immutable after construction and never learn where they sit in a tree:
//! the caller hands each node its [`SchemaPath`] during descent.
//!
//! ## Base Contract
//!
//! For every node except `maybe` and `one_of`, validation runs through one
//! shared driver:
//!
//! 1. Absent input is replaced by the configured default. Without a default,
//!    the node decides: `object` validates `{}`, everything else fails with
//!    `value is required`.
//! 2. Present input is coerced by the node's own allow-list.
//! 3. Type-specific checks (ranges, lengths, patterns) run on the coerced or
//!    defaulted value.
//! 4. The custom predicate, if any, runs last; a returned message fails at
//!    the current path.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use confval_core::{SchemaError, SchemaPath};

use crate::value::{detect_type, SchemaValue};

pub mod array;
pub mod boolean;
pub mod byte_size;
pub mod duration;
pub mod literal;
pub mod map;
pub mod maybe;
pub mod number;
pub mod object;
pub mod string;
pub mod union;

pub use array::{ArrayOptions, ArrayType};
pub use boolean::{BooleanOptions, BooleanType};
pub use byte_size::{ByteSizeOption, ByteSizeOptions, ByteSizeType};
pub use duration::{DurationOption, DurationOptions, DurationType};
pub use literal::{Literal, LiteralType};
pub use map::{MapOfOptions, MapOfType};
pub use maybe::MaybeType;
pub use number::{NumberOptions, NumberType};
pub use object::{ObjectOptions, ObjectType};
pub use string::{StringOptions, StringType};
pub use union::{OneOfOptions, UnionType};

/// A node of a schema tree.
///
/// Implementations are `Send + Sync`: a schema built once can be validated
/// against from many threads at the same time.
pub trait Type: fmt::Debug + Send + Sync {
    /// Validate `value` found at `path`.
    ///
    /// `None` means the value is absent. Returns `Ok(None)` only when the
    /// node accepts absence without producing a value (`maybe`).
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError>;

    /// Validate a present value at the root of the input tree.
    fn validate(&self, value: &Value) -> Result<SchemaValue, SchemaError> {
        let root = SchemaPath::root();
        self.validate_at(Some(value), &root)?
            .ok_or_else(|| required(&root))
    }

    /// Validate a possibly-absent value at the root of the input tree.
    fn validate_optional(&self, value: Option<&Value>) -> Result<Option<SchemaValue>, SchemaError> {
        self.validate_at(value, &SchemaPath::root())
    }

    /// Validate `value`, then project the output into `T`.
    ///
    /// Byte sizes project as byte counts and durations as millisecond
    /// counts, so `ByteSizeValue` and `DurationValue` fields deserialize
    /// directly.
    fn validate_as<T: DeserializeOwned>(&self, value: &Value) -> Result<T, SchemaError>
    where
        Self: Sized,
    {
        let output = self.validate(value)?;
        serde_json::from_value(output.to_json()).map_err(|e| {
            SchemaError::at_root(format!("validated value does not fit the target type: {e}"))
        })
    }

    /// Erase the concrete descriptor type for use as a child of a composite.
    fn boxed(self) -> Box<dyn Type>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl Type for Box<dyn Type> {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        (**self).validate_at(value, path)
    }
}

/// Custom validation predicate: returns a failure message, or `None` to accept.
pub struct Validator<T>(Arc<dyn Fn(&T) -> Option<String> + Send + Sync>);

impl<T> Validator<T> {
    /// Wrap a predicate.
    pub fn new(predicate: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Run the predicate.
    pub fn check(&self, value: &T) -> Option<String> {
        (self.0)(value)
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Options every descriptor accepts.
#[derive(Debug, Clone)]
pub struct TypeOptions<T> {
    /// Value substituted when the input is absent.
    pub default_value: Option<T>,
    /// Predicate run after coercion and type-specific checks.
    pub validate: Option<Validator<T>>,
}

impl<T> Default for TypeOptions<T> {
    fn default() -> Self {
        Self {
            default_value: None,
            validate: None,
        }
    }
}

/// The coercion and checking steps a descriptor plugs into [`process`].
pub(crate) trait Process {
    type Output: Clone;

    fn options(&self) -> &TypeOptions<Self::Output>;

    /// Coerce present input into the output type, or reject it.
    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<Self::Output, SchemaError>;

    /// Constraints that apply to coerced and defaulted values alike.
    fn check(&self, value: Self::Output, _path: &SchemaPath) -> Result<Self::Output, SchemaError> {
        Ok(value)
    }

    /// Output for absent input when no default is configured.
    fn absent(&self, _path: &SchemaPath) -> Result<Option<Self::Output>, SchemaError> {
        Ok(None)
    }

    fn output(value: Self::Output) -> SchemaValue;
}

/// Shared driver: default substitution, coercion, checks, custom predicate.
pub(crate) fn process<P: Process>(
    node: &P,
    value: Option<&Value>,
    path: &SchemaPath,
) -> Result<Option<SchemaValue>, SchemaError> {
    let options = node.options();
    let coerced = match value {
        Some(value) => node.coerce(value, path)?,
        None => match &options.default_value {
            Some(default) => {
                tracing::debug!(path = %path, "substituting default for absent value");
                default.clone()
            }
            None => node.absent(path)?.ok_or_else(|| required(path))?,
        },
    };

    let checked = node.check(coerced, path)?;
    run_validator(options.validate.as_ref(), &checked, path)?;
    Ok(Some(P::output(checked)))
}

pub(crate) fn run_validator<T>(
    validator: Option<&Validator<T>>,
    value: &T,
    path: &SchemaPath,
) -> Result<(), SchemaError> {
    match validator.and_then(|v| v.check(value)) {
        Some(message) => Err(SchemaError::new(message, path.clone())),
        None => Ok(()),
    }
}

pub(crate) fn required(path: &SchemaPath) -> SchemaError {
    SchemaError::new("value is required", path.clone())
}

pub(crate) fn type_mismatch(expected: &str, value: &Value, path: &SchemaPath) -> SchemaError {
    SchemaError::new(
        format!(
            "expected value of type [{expected}] but got [{}]",
            detect_type(Some(value))
        ),
        path.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validator_clone_shares_predicate() {
        let validator = Validator::new(|n: &i64| (*n < 0).then(|| "negative".to_string()));
        let clone = validator.clone();
        assert_eq!(clone.check(&-1), Some("negative".to_string()));
        assert_eq!(validator.check(&1), None);
        assert_eq!(format!("{validator:?}"), "Validator(..)");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = type_mismatch("boolean", &json!("true"), &SchemaPath::from("flags.debug"));
        assert_eq!(
            err.to_string(),
            "[flags.debug]: expected value of type [boolean] but got [string]"
        );
    }

    #[test]
    fn test_boxed_type_delegates() {
        let boxed = BooleanType::new(BooleanOptions::default()).boxed();
        assert_eq!(boxed.validate(&json!(true)).unwrap(), SchemaValue::Bool(true));
        assert!(boxed.validate(&json!(1)).is_err());
    }

    #[test]
    fn test_validate_as_reports_projection_mismatch() {
        let number = NumberType::new(NumberOptions::default());
        let err = number.validate_as::<String>(&json!(5)).unwrap_err();
        assert!(err.message().starts_with("validated value does not fit the target type"));
    }
}
