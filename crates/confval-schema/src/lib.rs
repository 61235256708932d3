//! # confval-schema: Declarative Schema Validation
//!
//! Build a tree of type descriptors once, then validate untyped input
//! (`serde_json::Value`, usually decoded from YAML or JSON) against it.
//! Validation coerces common textual encodings (`"5601"`, `"10kb"`,
//! `"30s"`), fills in defaults, enforces constraints, and reports the first
//! failure with the dotted path of the offending node.
//!
//! ## Modules
//!
//! - [`types`]: the [`Type`] trait and every descriptor.
//! - [`schema`]: one builder function per descriptor kind.
//! - [`value`]: the validated output tree, [`SchemaValue`].
//! - [`route`]: per-part validation of HTTP request input.
//!
//! ## Crate Policy
//!
//! - Descriptors are immutable and `Send + Sync`; a schema can be shared
//!   across threads and validated concurrently.
//! - Validation is pure: no I/O, no global state. The only side effects are
//!   `tracing` events at `debug` and `trace` level.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod route;
pub mod schema;
pub mod types;
pub mod value;

pub use route::{RequestPart, RequestParts, RouteSchemas, RouteValidationError, ValidatedRequest};
pub use types::{Type, TypeOptions, Validator};
pub use value::{detect_type, SchemaValue};

pub use confval_core::{
    ByteSizeValue, ConfvalError, DefinitionError, DurationValue, SchemaError, SchemaPath,
};
