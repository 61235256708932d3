//! # Validation Path
//!
//! `SchemaPath` is the dotted address of a node relative to the root of the
//! validated input tree (`server.ssl.certificate`, `hosts.2`). It is created
//! at the root by the top-level entry point and extended by composite
//! descriptors as they recurse into children.

use std::fmt;

/// Dotted address of the node currently being validated.
///
/// The root path is empty. Segments are object field names, stringified
/// array indices or map keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath(String);

impl SchemaPath {
    /// The root of the input tree.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Extend the path by one segment.
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}.{segment}", self.0))
        }
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Access the dotted path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix used when rendering an error at this path: empty at the root,
    /// `"[a.b]: "` otherwise.
    pub fn error_prefix(&self) -> String {
        if self.0.is_empty() {
            String::new()
        } else {
            format!("[{}]: ", self.0)
        }
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemaPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}
