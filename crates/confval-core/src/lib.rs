//! # confval-core: Foundational Types for confval
//!
//! This crate is the leaf of the confval dependency DAG. It defines the
//! types every schema descriptor agrees on: the validation error model, the
//! path threaded through recursive descent, and the two domain value types
//! that human-readable configuration magnitudes coerce into.
//!
//! ## Key Design Principles
//!
//! 1. **One validation error kind.** `SchemaError` carries a message and the
//!    `SchemaPath` at which validation failed. Nothing else signals a failed
//!    validation.
//!
//! 2. **Paths are arguments, not state.** `SchemaPath` is built by the caller
//!    during descent. Descriptors never store their own position.
//!
//! 3. **Magnitudes are values.** `ByteSizeValue` and `DurationValue` are
//!    immutable, totally ordered by their underlying count, and independent
//!    of the unit they were parsed from (`"1kb"` and `1024` are equal).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `confval-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod byte_size;
pub mod duration;
pub mod error;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use byte_size::{ByteSizeUnit, ByteSizeValue};
pub use duration::{DurationUnit, DurationValue};
pub use error::{ConfvalError, DefinitionError, SchemaError, ValueError};
pub use path::SchemaPath;

/// Largest integer a double-precision number represents exactly (2^53 - 1).
///
/// Raw numeric magnitudes (byte counts, millisecond counts) arriving as JSON
/// numbers must not exceed this bound.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;
