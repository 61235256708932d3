//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout confval. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - `SchemaError` is the only way a validation call fails. It carries the
//!   message and the path of the offending node; composite descriptors pass
//!   child errors through untouched.
//! - `ValueError` reports magnitudes that cannot be parsed or represented.
//!   Validation re-raises it as a `SchemaError` at the current path.
//! - `DefinitionError` reports schema-authoring mistakes caught while a
//!   descriptor is constructed, before any input is seen.

use thiserror::Error;

use crate::path::SchemaPath;

/// Top-level error type for confval.
///
/// Lets callers that both define and apply schemas propagate either kind of
/// failure with `?`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfvalError {
    /// Input did not conform to the schema.
    #[error("schema validation error: {0}")]
    Schema(#[from] SchemaError),

    /// A schema descriptor could not be constructed.
    #[error("schema definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// A magnitude could not be parsed.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Validation failure at a specific node of the input tree.
///
/// Renders as `[a.b]: message`, or just `message` at the root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{message}", .path.error_prefix())]
pub struct SchemaError {
    message: String,
    path: SchemaPath,
}

impl SchemaError {
    /// Create an error at the given path.
    pub fn new(message: impl Into<String>, path: SchemaPath) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }

    /// Create an error at the root of the input tree.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(message, SchemaPath::root())
    }

    /// Re-raise a value parsing failure at the given path.
    pub fn from_value_error(err: &ValueError, path: &SchemaPath) -> Self {
        Self::new(err.to_string(), path.clone())
    }

    /// The human-readable failure message, without the path prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The path of the node that failed.
    pub fn path(&self) -> &SchemaPath {
        &self.path
    }
}

/// A byte-size or duration magnitude that cannot be parsed or represented.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The string does not match `<number>[b|kb|mb|gb]`.
    #[error(
        "could not parse byte size value [{0}]. Value must be a number optionally followed by one of [b|kb|mb|gb] (e.g. '1024', '10kb', '1.5gb')"
    )]
    InvalidByteSize(String),

    /// A raw byte count that is negative, fractional, or not a safe integer.
    #[error("Value in bytes is expected to be a safe positive integer, but provided [{0}]")]
    InvalidByteCount(String),

    /// The string does not match `<count>[ms|s|m|h|d|w|M|Y]`.
    #[error(
        "Failed to parse [{0}] as time value. Format must be <count>[ms|s|m|h|d|w|M|Y] (e.g. '70ms', '5s', '3d', '1Y')"
    )]
    InvalidDuration(String),

    /// A raw millisecond count that is negative, fractional, or not a safe integer.
    #[error("Failed to parse [{0}] as time value. Value should be a safe positive integer number.")]
    InvalidDurationCount(String),

    /// The magnitude is well-formed but exceeds the representable range.
    #[error("value [{0}] is too large to be represented")]
    Overflow(String),
}

/// A schema descriptor that cannot be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// A `min`, `max` or `default_value` option could not be normalized.
    #[error("invalid [{option}] option: {source}")]
    InvalidOption {
        /// Name of the offending option.
        option: &'static str,
        /// Why the option value could not be parsed.
        #[source]
        source: ValueError,
    },

    /// `min` is greater than `max`, so no value could ever validate.
    #[error("[min] option [{min}] is greater than [max] option [{max}]")]
    InvertedRange {
        /// Rendered minimum.
        min: String,
        /// Rendered maximum.
        max: String,
    },

    /// A union must have between `min` and `max` alternatives.
    #[error("oneOf expects between {min} and {max} alternatives, got [{got}]")]
    UnionArity {
        /// Number of alternatives supplied.
        got: usize,
        /// Smallest accepted number of alternatives.
        min: usize,
        /// Largest accepted number of alternatives.
        max: usize,
    },
}
