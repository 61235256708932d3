//! `literal`: accepts exactly one fixed string, number or boolean.

use std::fmt;

use serde_json::{Number, Value};

use confval_core::{SchemaError, SchemaPath};

use super::{process, Process, Type, TypeOptions};
use crate::value::{render, SchemaValue};

/// The single value a [`LiteralType`] accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A fixed string.
    String(String),
    /// A fixed number.
    Number(Number),
    /// A fixed boolean.
    Bool(bool),
}

impl Literal {
    fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String(expected), Value::String(actual)) => expected == actual,
            (Self::Bool(expected), Value::Bool(actual)) => expected == actual,
            (Self::Number(expected), Value::Number(actual)) => {
                expected == actual
                    || matches!((expected.as_f64(), actual.as_f64()), (Some(a), Some(b)) if a == b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

/// Descriptor that accepts a single fixed value.
#[derive(Debug)]
pub struct LiteralType {
    expected: Literal,
    options: TypeOptions<Literal>,
}

impl LiteralType {
    /// Create a descriptor accepting only `expected`.
    pub fn new(expected: impl Into<Literal>) -> Self {
        Self {
            expected: expected.into(),
            options: TypeOptions::default(),
        }
    }

    /// The accepted value.
    pub fn expected(&self) -> &Literal {
        &self.expected
    }
}

impl Process for LiteralType {
    type Output = Literal;

    fn options(&self) -> &TypeOptions<Literal> {
        &self.options
    }

    fn coerce(&self, value: &Value, path: &SchemaPath) -> Result<Literal, SchemaError> {
        if self.expected.matches(value) {
            Ok(self.expected.clone())
        } else {
            Err(SchemaError::new(
                format!(
                    "expected value to equal [{}] but got [{}]",
                    self.expected,
                    render(value)
                ),
                path.clone(),
            ))
        }
    }

    fn output(value: Literal) -> SchemaValue {
        match value {
            Literal::String(s) => SchemaValue::String(s),
            Literal::Number(n) => SchemaValue::Number(n),
            Literal::Bool(b) => SchemaValue::Bool(b),
        }
    }
}

impl Type for LiteralType {
    fn validate_at(
        &self,
        value: Option<&Value>,
        path: &SchemaPath,
    ) -> Result<Option<SchemaValue>, SchemaError> {
        process(self, value, path)
    }
}
