//! `object`: a fixed set of named, declaration-ordered fields.
//!
//! Fields are validated in declaration order and the first failure aborts.
//! Keys present in the input but not declared are rejected unless
//! `allow_unknowns` is set, in which case they are carried through verbatim
//! after the declared fields.

use serde_json::{Map, Value};

use confval_core::{SchemaError, SchemaPath};

use super::{process, Process, Type, TypeOptions, Validator};
use crate::value::{detect_type, SchemaValue};

/// Options for [`ObjectType`].
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    /// Output substituted when the input is absent. Without it, absent input
    /// validates as `{}`.
    pub default_value: Option<SchemaValue>,
    /// Predicate run on the assembled output.
    pub validate: Option<Validator<SchemaValue>>,
    /// Pass undeclared keys through instead of rejecting them.
    pub allow_unknowns: bool,
}

/// Descriptor for plain objects with declared fields.
#[derive(Debug)]
pub struct ObjectType {
    props: Vec<(String, Box<dyn Type>)>,
    options: TypeOptions<SchemaValue>,
    allow_unknowns: bool,
}

impl ObjectType {
    /// Create an object descriptor. Declaring a name twice replaces the
    /// earlier descriptor but keeps its position.
    pub fn new<K: Into<String>>(
        props: impl IntoIterator<Item = (K, Box<dyn Type>)>,
        options: ObjectOptions,
    ) -> Self {
        let mut declared: Vec<(String, Box<dyn Type>)> = Vec::new();
        for (name, descriptor) in props {
            let name = name.into();
            match declared.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = descriptor,
                None => declared.push((name, descriptor)),
            }
        }

        let ObjectOptions {
            default_value,
            validate,
            allow_unknowns,
        } = options;
        Self {
            props: declared,
            options: TypeOptions {
                default_value,
                validate,
            },
            allow_unknowns,
        }
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|(name, _)| name.as_str())
    }

    /// Descriptor of a declared field.
    pub fn field(&self, name: &str) -> Option<&dyn Type> {
        self.props
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, descriptor)| descriptor.as_ref())
    }

    fn validate_fields(
        &self,
        input: &Map<String, Value>,
        path: &SchemaPath,
    ) -> Result<SchemaValue, SchemaError> {
        let mut fields = Vec::with_capacity(self.props.len());
        for (name, descriptor) in &self.props {
            if let Some(validated) = descriptor.validate_at(input.get(name), &path.child(name))? {
                fields.push((name.clone(), validated));
            }
        }

        for (key, value) in input {
            if self.field(key).is_some() {
                continue;
            }
            if !self.allow_unknowns {
                return Err(SchemaError::new(
                    "definition for this key is missing",
                    path.child(key),
                ));
            }
            tracing::trace!(path = %path, key = %key, "passing unknown key through");
            fields.push((key.clone(), SchemaValue::Raw(value.clone())));
        }

        Ok(SchemaValue::Object(fields))
    }
}

impl Process for ObjectType {
    type Output = SchemaValue;

    fn options(&self) -> &TypeOptions<SchemaValue> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<SchemaValue, SchemaError> {
        match value {
            Value::Object(input) => self.validate_fields(input, path),
            other => Err(SchemaError::new(
                format!(
                    "expected a plain object value, but found [{}] instead.",
                    detect_type(Some(other))
                ),
                path.clone(),
            )),
        }
    }

    fn absent(&self, path: &SchemaPath) -> Result<Option<SchemaValue>, SchemaError> {
        self.validate_fields(&Map::new(), path).map(Some)
    }

    fn output(value: SchemaValue) -> SchemaValue {
        value
    }
}

impl Type for ObjectType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BooleanOptions, BooleanType, MaybeType, NumberOptions, NumberType, StringOptions,
        StringType,
    };
    use serde_json::json;

    fn number_with_default(n: i64) -> Box<dyn Type> {
        NumberType::new(NumberOptions {
            default_value: Some(n.into()),
            ..Default::default()
        })
        .boxed()
    }

    fn server() -> ObjectType {
        ObjectType::new(
            [
                ("host", StringType::new(StringOptions::default()).boxed()),
                ("port", number_with_default(5601)),
                ("ssl", MaybeType::new(BooleanType::new(BooleanOptions::default())).boxed()),
            ],
            ObjectOptions::default(),
        )
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let out = server()
            .validate(&json!({ "ssl": true, "port": "80", "host": "localhost" }))
            .unwrap();
        let rendered = serde_json::to_string(&out.to_json()).unwrap();
        assert_eq!(rendered, r#"{"host":"localhost","port":80,"ssl":true}"#);
    }

    #[test]
    fn test_missing_fields_follow_field_policy() {
        let out = server().validate(&json!({ "host": "h" })).unwrap();
        assert_eq!(out.to_json(), json!({ "host": "h", "port": 5601 }));
        assert!(out.get("ssl").is_none());

        let err = server().validate(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "[host]: value is required");
    }

    #[test]
    fn test_rejects_non_objects() {
        let err = server().validate(&json!([1])).unwrap_err();
        assert_eq!(
            err.message(),
            "expected a plain object value, but found [Array] instead."
        );
        let err = server().validate(&Value::Null).unwrap_err();
        assert_eq!(
            err.message(),
            "expected a plain object value, but found [null] instead."
        );
    }

    #[test]
    fn test_unknown_keys_rejected_by_default() {
        let err = server()
            .validate(&json!({ "host": "h", "extra": 1 }))
            .unwrap_err();
        assert_eq!(err.to_string(), "[extra]: definition for this key is missing");
    }

    #[test]
    fn test_unknown_keys_pass_through_when_allowed() {
        let t = ObjectType::new(
            [("a", number_with_default(1))],
            ObjectOptions {
                allow_unknowns: true,
                ..Default::default()
            },
        );
        let out = t.validate(&json!({ "z": { "raw": "x" }, "a": "2" })).unwrap();
        assert_eq!(out.get("z"), Some(&SchemaValue::Raw(json!({ "raw": "x" }))));
        let rendered = serde_json::to_string(&out.to_json()).unwrap();
        assert_eq!(rendered, r#"{"a":2,"z":{"raw":"x"}}"#);
    }

    #[test]
    fn test_nested_error_path() {
        let t = ObjectType::new(
            [(
                "a",
                ObjectType::new(
                    [("b", NumberType::new(NumberOptions::default()).boxed())],
                    ObjectOptions::default(),
                )
                .boxed(),
            )],
            ObjectOptions::default(),
        );
        let err = t.validate(&json!({ "a": { "b": "x" } })).unwrap_err();
        assert_eq!(err.path().as_str(), "a.b");
        assert_eq!(err.to_string(), "[a.b]: expected value of type [number] but got [string]");
    }

    #[test]
    fn test_absent_nested_object_materializes_defaults() {
        let t = ObjectType::new(
            [(
                "limits",
                ObjectType::new([("max", number_with_default(10))], ObjectOptions::default()).boxed(),
            )],
            ObjectOptions::default(),
        );
        assert_eq!(t.validate(&json!({})).unwrap().to_json(), json!({ "limits": { "max": 10 } }));

        let absent = t
            .validate_at(None, &SchemaPath::root())
            .map(|out| out.map(|v| v.to_json()));
        assert_eq!(absent, Ok(Some(json!({ "limits": { "max": 10 } }))));
    }

    #[test]
    fn test_absent_object_with_required_field_fails_at_field() {
        let t = ObjectType::new(
            [("inner", server().boxed())],
            ObjectOptions::default(),
        );
        let err = t.validate(&json!({})).unwrap_err();
        assert_eq!(err.path().as_str(), "inner.host");
    }

    #[test]
    fn test_duplicate_declaration_replaces_in_place() {
        let t = ObjectType::new(
            [
                ("a", number_with_default(1)),
                ("b", number_with_default(2)),
                ("a", number_with_default(3)),
            ],
            ObjectOptions::default(),
        );
        assert_eq!(t.field_names().collect::<Vec<_>>(), ["a", "b"]);
        let rendered = serde_json::to_string(&t.validate(&json!({})).unwrap().to_json()).unwrap();
        assert_eq!(rendered, r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn test_custom_validator_sees_assembled_output() {
        let t = ObjectType::new(
            [("min", number_with_default(0)), ("max", number_with_default(10))],
            ObjectOptions {
                validate: Some(Validator::new(|v: &SchemaValue| {
                    let min = v.get("min").and_then(SchemaValue::as_f64)?;
                    let max = v.get("max").and_then(SchemaValue::as_f64)?;
                    (min > max).then(|| "min must not exceed max".to_string())
                })),
                ..Default::default()
            },
        );
        assert!(t.validate(&json!({ "min": 1 })).is_ok());
        let err = t.validate(&json!({ "min": 20 })).unwrap_err();
        assert_eq!(err.to_string(), "min must not exceed max");
    }
}
