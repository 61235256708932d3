//! # Route Validation
//!
//! Validates the three parts of an HTTP request (path parameters, query
//! string and body) against optional per-part object schemas. A part
//! without a schema is replaced by an empty object so unvalidated input
//! never reaches a handler.
//!
//! Status-code mapping and handler wiring belong to the HTTP layer and are
//! not modelled here.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use confval_core::{SchemaError, SchemaPath};

use crate::types::{ObjectType, Type};
use crate::value::SchemaValue;

/// The part of a request a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPart {
    /// Path parameters.
    Params,
    /// Query string.
    Query,
    /// Request body.
    Body,
}

impl fmt::Display for RequestPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Params => "request params",
            Self::Query => "request query",
            Self::Body => "request body",
        })
    }
}

/// Validation failure in one request part.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{part}]: {source}")]
pub struct RouteValidationError {
    /// Which part failed.
    pub part: RequestPart,
    /// The underlying validation failure.
    #[source]
    pub source: SchemaError,
}

/// Raw request input, as decoded by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    /// Path parameters, `None` if the route has none.
    pub params: Option<Value>,
    /// Decoded query string, `None` if absent.
    pub query: Option<Value>,
    /// Decoded body, `None` if the request has no body.
    pub body: Option<Value>,
}

/// Validated request input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Validated path parameters.
    pub params: SchemaValue,
    /// Validated query.
    pub query: SchemaValue,
    /// Validated body.
    pub body: SchemaValue,
}

/// Per-part schemas of one route.
#[derive(Debug, Default)]
pub struct RouteSchemas {
    /// Schema for path parameters.
    pub params: Option<ObjectType>,
    /// Schema for the query string.
    pub query: Option<ObjectType>,
    /// Schema for the body.
    pub body: Option<ObjectType>,
}

impl RouteSchemas {
    /// Validate all parts in order: params, query, body. The first failing
    /// part is reported.
    pub fn validate(&self, request: &RequestParts) -> Result<ValidatedRequest, RouteValidationError> {
        Ok(ValidatedRequest {
            params: validate_part(RequestPart::Params, self.params.as_ref(), request.params.as_ref())?,
            query: validate_part(RequestPart::Query, self.query.as_ref(), request.query.as_ref())?,
            body: validate_part(RequestPart::Body, self.body.as_ref(), request.body.as_ref())?,
        })
    }
}

fn validate_part(
    part: RequestPart,
    schema: Option<&ObjectType>,
    value: Option<&Value>,
) -> Result<SchemaValue, RouteValidationError> {
    let Some(schema) = schema else {
        return Ok(SchemaValue::Object(Vec::new()));
    };

    let root = SchemaPath::root();
    let validated = schema
        .validate_at(value, &root)
        .and_then(|out| out.ok_or_else(|| SchemaError::at_root("value is required")));
    validated.map_err(|source| {
        tracing::debug!(part = %part, error = %source, "request validation failed");
        RouteValidationError { part, source }
    })
}
