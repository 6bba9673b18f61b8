//! Validation error types.
//!
//! Every failure collapses to one `(schema kind, reason)` pair at the point
//! of failure. There is no multi-error accumulation and no path annotation:
//! nested failures propagate their inner reason verbatim.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The closed set of schema kinds, used to tag failures with the validator
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Enum,
    Optional,
    Nullable,
    Array,
    Object,
}

impl SchemaKind {
    /// Returns the kind name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Enum => "enum",
            SchemaKind::Optional => "optional",
            SchemaKind::Nullable => "nullable",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validation failure with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{reason}")]
pub struct ValidationError {
    kind: SchemaKind,
    reason: String,
}

impl ValidationError {
    /// Creates an error for the given kind, filling a generic reason when
    /// the failing check produced none.
    pub(crate) fn new(kind: SchemaKind, reason: Option<String>) -> Self {
        Self {
            reason: reason.unwrap_or_else(|| format!("invalid {} value", kind.as_str())),
            kind,
        }
    }

    /// Returns the kind of schema that rejected the value.
    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Returns the failure reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
