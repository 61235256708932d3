//! # Validated Output Tree
//!
//! `SchemaValue` is what every descriptor produces on success: the coerced,
//! defaulted shape of the input. Leaf coercions are visible in the variant
//! (`"10kb"` arrives as a string and leaves as `SchemaValue::ByteSize`).
//!
//! Output trees are rendered back into `serde_json::Value` with
//! [`SchemaValue::to_json`], or projected into caller-defined types through
//! `serde` (see [`crate::Type::validate_as`]). Byte sizes render as byte counts
//! and durations as millisecond counts.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use confval_core::{ByteSizeValue, DurationValue};

/// A validated, coerced value.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaValue {
    /// Output of `boolean` and boolean literals.
    Bool(bool),
    /// Output of `number` and numeric literals. Integers stay integers.
    Number(Number),
    /// Output of `string` and string literals.
    String(String),
    /// Output of `byte_size`.
    ByteSize(ByteSizeValue),
    /// Output of `duration`.
    Duration(DurationValue),
    /// Output of `array_of`.
    Array(Vec<SchemaValue>),
    /// Output of `object`: declared fields in declaration order, followed by
    /// any passed-through unknown keys in input order.
    Object(Vec<(String, SchemaValue)>),
    /// Output of `map_of`: validated keys and values in input order.
    Map(Vec<(SchemaValue, SchemaValue)>),
    /// Unvalidated input carried through verbatim (unknown object keys).
    Raw(Value),
}

impl SchemaValue {
    /// Look up an object field, or a map entry whose key renders as `key`.
    pub fn get(&self, key: &str) -> Option<&SchemaValue> {
        match self {
            Self::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Self::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.map_key() == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the number as `f64`, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Returns the number as `i64`, if this is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Returns the byte size, if this is one.
    pub fn as_byte_size(&self) -> Option<ByteSizeValue> {
        match self {
            Self::ByteSize(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the duration, if this is one.
    pub fn as_duration(&self) -> Option<DurationValue> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    pub fn as_array(&self) -> Option<&[SchemaValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Render the tree as plain JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::ByteSize(b) => Value::from(b.bytes()),
            Self::Duration(d) => Value::from(d.as_millis()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.map_key(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Raw(v) => v.clone(),
        }
    }

    /// String form of a value used as a map key.
    pub fn map_key(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::ByteSize(b) => b.bytes().to_string(),
            Self::Duration(d) => d.as_millis().to_string(),
            Self::Raw(Value::String(s)) => s.clone(),
            other => other.to_json().to_string(),
        }
    }
}

impl Serialize for SchemaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::ByteSize(b) => b.serialize(serializer),
            Self::Duration(d) => d.serialize(serializer),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(&k.map_key(), v)?;
                }
                map.end()
            }
            Self::Raw(v) => v.serialize(serializer),
        }
    }
}

impl From<bool> for SchemaValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for SchemaValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for SchemaValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i32> for SchemaValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for SchemaValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for SchemaValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<Number> for SchemaValue {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<ByteSizeValue> for SchemaValue {
    fn from(b: ByteSizeValue) -> Self {
        Self::ByteSize(b)
    }
}

impl From<DurationValue> for SchemaValue {
    fn from(d: DurationValue) -> Self {
        Self::Duration(d)
    }
}

/// Runtime type name of a raw input, as reported in validation messages.
pub fn detect_type(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "Array",
        Some(Value::Object(_)) => "Object",
    }
}

/// Render a raw input inside a validation message: strings bare, everything
/// else as compact JSON.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_type_names() {
        assert_eq!(detect_type(None), "undefined");
        assert_eq!(detect_type(Some(&Value::Null)), "null");
        assert_eq!(detect_type(Some(&json!(true))), "boolean");
        assert_eq!(detect_type(Some(&json!(1.5))), "number");
        assert_eq!(detect_type(Some(&json!("x"))), "string");
        assert_eq!(detect_type(Some(&json!([1]))), "Array");
        assert_eq!(detect_type(Some(&json!({}))), "Object");
    }

    #[test]
    fn test_to_json_renders_magnitudes_as_counts() {
        let value = SchemaValue::Object(vec![
            ("limit".to_string(), SchemaValue::ByteSize(ByteSizeValue::new(2048))),
            ("timeout".to_string(), SchemaValue::Duration(DurationValue::from_millis(5000))),
        ]);
        assert_eq!(value.to_json(), json!({ "limit": 2048, "timeout": 5000 }));
    }

    #[test]
    fn test_to_json_keeps_field_order() {
        let value = SchemaValue::Object(vec![
            ("zeta".to_string(), SchemaValue::from(1)),
            ("alpha".to_string(), SchemaValue::from(2)),
        ]);
        let rendered = serde_json::to_string(&value.to_json()).unwrap();
        assert_eq!(rendered, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let value = SchemaValue::Map(vec![
            (SchemaValue::from(1), SchemaValue::from("one")),
            (SchemaValue::from("two"), SchemaValue::Array(vec![SchemaValue::from(true)])),
        ]);
        assert_eq!(serde_json::to_value(&value).unwrap(), value.to_json());
        assert_eq!(value.to_json(), json!({ "1": "one", "two": [true] }));
    }

    #[test]
    fn test_get_on_object_and_map() {
        let object = SchemaValue::Object(vec![("a".to_string(), SchemaValue::from(1))]);
        assert_eq!(object.get("a").and_then(SchemaValue::as_i64), Some(1));
        assert!(object.get("b").is_none());

        let map = SchemaValue::Map(vec![(SchemaValue::from(7), SchemaValue::from("seven"))]);
        assert_eq!(map.get("7").and_then(SchemaValue::as_str), Some("seven"));
        assert!(SchemaValue::from(true).get("a").is_none());
    }

    #[test]
    fn test_render_strings_bare() {
        assert_eq!(render(&json!("abc")), "abc");
        assert_eq!(render(&json!([1, 2])), "[1,2]");
        assert_eq!(render(&Value::Null), "null");
    }
}
