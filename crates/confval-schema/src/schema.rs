//! # Schema Builders
//!
//! One constructor per descriptor kind, so schemas read as a tree of calls:
//!
//! ```
//! use confval_schema::schema;
//! use confval_schema::types::{NumberOptions, ObjectOptions, StringOptions};
//! use confval_schema::Type;
//!
//! let server = schema::object(
//!     [
//!         ("host", schema::string(StringOptions::default()).boxed()),
//!         (
//!             "port",
//!             schema::number(NumberOptions {
//!                 default_value: Some(5601.into()),
//!                 ..Default::default()
//!             })
//!             .boxed(),
//!         ),
//!     ],
//!     ObjectOptions::default(),
//! );
//!
//! let out = server.validate(&serde_json::json!({ "host": "localhost" })).unwrap();
//! assert_eq!(out.to_json(), serde_json::json!({ "host": "localhost", "port": 5601 }));
//! ```

use serde_json::Value;

use confval_core::{ConfvalError, DefinitionError};

use crate::types::{
    ArrayOptions, ArrayType, BooleanOptions, BooleanType, ByteSizeOptions, ByteSizeType,
    DurationOptions, DurationType, Literal, LiteralType, MapOfOptions, MapOfType, MaybeType,
    NumberOptions, NumberType, ObjectOptions, ObjectType, OneOfOptions, StringOptions, StringType,
    Type, UnionType,
};
use crate::value::SchemaValue;

/// Strict boolean.
pub fn boolean(options: BooleanOptions) -> BooleanType {
    BooleanType::new(options)
}

/// String with optional length bounds and pattern.
pub fn string(options: StringOptions) -> StringType {
    StringType::new(options)
}

/// Exactly one string, number or boolean value.
pub fn literal(value: impl Into<Literal>) -> LiteralType {
    LiteralType::new(value)
}

/// Number, also accepting numeric strings.
pub fn number(options: NumberOptions) -> NumberType {
    NumberType::new(options)
}

/// Byte size such as `"10kb"` or `1024`. Fails if a configured bound does
/// not parse or `min > max`.
pub fn byte_size(options: ByteSizeOptions) -> Result<ByteSizeType, DefinitionError> {
    ByteSizeType::new(options)
}

/// Duration such as `"5s"` or `5000`. Fails if a configured bound does not
/// parse or `min > max`.
pub fn duration(options: DurationOptions) -> Result<DurationType, DefinitionError> {
    DurationType::new(options)
}

/// Optional wrapper: absence is accepted, `null` is not.
pub fn maybe(inner: impl Type + 'static) -> MaybeType {
    MaybeType::new(inner)
}

/// Object with declared fields.
pub fn object<K: Into<String>>(
    props: impl IntoIterator<Item = (K, Box<dyn Type>)>,
    options: ObjectOptions,
) -> ObjectType {
    ObjectType::new(props, options)
}

/// Sequence whose elements all satisfy `item`.
pub fn array_of(item: impl Type + 'static, options: ArrayOptions) -> ArrayType {
    ArrayType::new(item, options)
}

/// Dictionary with validated keys and values.
pub fn map_of(key: impl Type + 'static, value: impl Type + 'static, options: MapOfOptions) -> MapOfType {
    MapOfType::new(key, value, options)
}

/// First of 2 to 10 alternatives that accepts the input.
pub fn one_of(alternatives: Vec<Box<dyn Type>>, options: OneOfOptions) -> Result<UnionType, DefinitionError> {
    UnionType::new(alternatives, options)
}

/// Build a schema and validate `value` against it.
///
/// Schema-authoring mistakes surface as [`ConfvalError::Definition`], input
/// that does not conform as [`ConfvalError::Schema`].
pub fn validate_with<S: Type>(
    build: impl FnOnce() -> Result<S, DefinitionError>,
    value: &Value,
) -> Result<SchemaValue, ConfvalError> {
    let schema = build()?;
    Ok(schema.validate(value)?)
}
