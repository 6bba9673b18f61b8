//! Array schema: homogeneous sequences with length checks.

use super::errors::SchemaKind;
use super::{invalid, Schema, Validate, Verdict};
use crate::value::Value;

#[derive(Debug, Clone)]
enum ArrayCheck {
    Min { length: usize, message: Option<String> },
    Max { length: usize, message: Option<String> },
    Length { length: usize, message: Option<String> },
}

/// Schema for ordered sequences with a single element type.
///
/// Evaluation order: type gate, nonempty flag, length checks in append
/// order, then every element in index order. The first invalid element
/// aborts and its reason is surfaced verbatim, without the index.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    element: Box<Schema>,
    checks: Vec<ArrayCheck>,
    nonempty: bool,
    nonempty_message: Option<String>,
}

impl ArraySchema {
    /// Creates an array schema with the given element schema.
    pub fn new(element: Schema) -> Self {
        Self {
            element: Box::new(element),
            checks: Vec::new(),
            nonempty: false,
            nonempty_message: None,
        }
    }

    /// Returns the element schema.
    pub fn element(&self) -> &Schema {
        &self.element
    }

    /// Appends a minimum-count check.
    pub fn min(mut self, length: usize, message: Option<&str>) -> Self {
        self.checks.push(ArrayCheck::Min {
            length,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends a maximum-count check.
    pub fn max(mut self, length: usize, message: Option<&str>) -> Self {
        self.checks.push(ArrayCheck::Max {
            length,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends an exact-count check.
    pub fn length(mut self, length: usize, message: Option<&str>) -> Self {
        self.checks.push(ArrayCheck::Length {
            length,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Requires at least one element, checked before any length check.
    pub fn nonempty(mut self, message: Option<&str>) -> Self {
        self.nonempty = true;
        self.nonempty_message = message.map(str::to_owned);
        self
    }
}

impl Validate for ArraySchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Array
    }

    fn validate(&self, value: &Value) -> Verdict {
        let Value::Array(items) = value else {
            return Verdict::Invalid(Some(format!(
                "expected array, received {}",
                value.type_name()
            )));
        };

        if self.nonempty && items.is_empty() {
            return invalid(&self.nonempty_message, || "must not be empty".into());
        }

        for check in &self.checks {
            match check {
                ArrayCheck::Min { length, message } => {
                    if items.len() < *length {
                        return invalid(message, || {
                            format!("must contain at least {length} elements")
                        });
                    }
                }
                ArrayCheck::Max { length, message } => {
                    if items.len() > *length {
                        return invalid(message, || {
                            format!("must contain at most {length} elements")
                        });
                    }
                }
                ArrayCheck::Length { length, message } => {
                    if items.len() != *length {
                        return invalid(message, || {
                            format!("must contain exactly {length} elements")
                        });
                    }
                }
            }
        }

        let mut data = Vec::with_capacity(items.len());
        for item in items {
            match self.element.validate(item) {
                Verdict::Valid(element) => data.push(element),
                failed => return failed,
            }
        }

        Verdict::Valid(Value::Array(data))
    }
}
