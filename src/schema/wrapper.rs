//! Optional and Nullable wrapper schemas.
//!
//! Each wraps exactly one inner schema and short-circuits on its sentinel:
//! `Undefined` for Optional, `Null` for Nullable. Everything else delegates
//! to the inner schema unchanged.

use super::errors::SchemaKind;
use super::{Schema, Validate, Verdict};
use crate::value::Value;

/// Accepts `Undefined` as-is; delegates every other value to the inner
/// schema.
#[derive(Debug, Clone)]
pub struct OptionalSchema {
    inner: Box<Schema>,
}

impl OptionalSchema {
    /// Wraps the given schema.
    pub fn new(inner: Schema) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Returns the inner schema, dropping the undefined special case.
    pub fn unwrap(self) -> Schema {
        *self.inner
    }
}

impl Validate for OptionalSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Optional
    }

    fn validate(&self, value: &Value) -> Verdict {
        if matches!(value, Value::Undefined) {
            return Verdict::Valid(Value::Undefined);
        }
        self.inner.validate(value)
    }
}

/// Accepts `Null` as-is; delegates every other value to the inner schema.
#[derive(Debug, Clone)]
pub struct NullableSchema {
    inner: Box<Schema>,
}

impl NullableSchema {
    /// Wraps the given schema.
    pub fn new(inner: Schema) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Returns the inner schema, dropping the null special case.
    pub fn unwrap(self) -> Schema {
        *self.inner
    }
}

impl Validate for NullableSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Nullable
    }

    fn validate(&self, value: &Value) -> Verdict {
        if matches!(value, Value::Null) {
            return Verdict::Valid(Value::Null);
        }
        self.inner.validate(value)
    }
}
