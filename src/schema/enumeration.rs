//! Enumeration schema: a closed set of string literals.

use std::collections::HashMap;

use super::errors::SchemaKind;
use super::{Validate, Verdict};
use crate::value::Value;

/// Schema accepting exactly one of a fixed, ordered set of string literals.
///
/// The literal set is immutable after construction. Membership is
/// exact-string and case-sensitive.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    values: Vec<String>,
}

impl EnumSchema {
    /// Creates an enumeration over the given literals.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty; an enumeration needs at least one
    /// literal.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        assert!(!values.is_empty(), "enumeration requires at least one literal");
        Self { values }
    }

    /// Returns the allowed literals in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the literal-to-itself mapping for reverse lookup.
    ///
    /// Computed on demand, never cached.
    pub fn mapping(&self) -> HashMap<String, String> {
        self.values.iter().map(|v| (v.clone(), v.clone())).collect()
    }
}

impl Validate for EnumSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Enum
    }

    fn validate(&self, value: &Value) -> Verdict {
        let Value::String(input) = value else {
            return Verdict::Invalid(Some(format!(
                "expected string, received {}",
                value.type_name()
            )));
        };

        if self.values.iter().any(|allowed| allowed == input) {
            Verdict::Valid(value.clone())
        } else {
            Verdict::Invalid(Some(format!("expected one of: {}", self.values.join(", "))))
        }
    }
}
