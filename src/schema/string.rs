//! String schema and its ordered checks.

use std::sync::LazyLock;

use regex::Regex;

use super::errors::SchemaKind;
use super::{invalid, Validate, Verdict};
use crate::value::Value;

/// RFC-light email shape: dot-separated atoms before a single `@`, then at
/// least one domain label and a TLD of two letters or more. Rejects a
/// leading dot and consecutive dots in the local part. Case-insensitive.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_+-]+(\.[a-z0-9_+-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}$")
        .expect("email pattern compiles")
});

#[derive(Debug, Clone)]
enum StringCheck {
    Min { length: usize, message: Option<String> },
    Max { length: usize, message: Option<String> },
    Length { length: usize, message: Option<String> },
    Email { message: Option<String> },
    Regex { pattern: Regex, message: Option<String> },
    Trim,
}

/// Schema for UTF-8 string values.
///
/// Checks run in append order and short-circuit on the first failure.
/// Lengths are measured in characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    checks: Vec<StringCheck>,
}

impl StringSchema {
    /// Creates a string schema with no checks.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Appends a minimum-length check.
    pub fn min(mut self, length: usize, message: Option<&str>) -> Self {
        self.checks.push(StringCheck::Min {
            length,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends a maximum-length check.
    pub fn max(mut self, length: usize, message: Option<&str>) -> Self {
        self.checks.push(StringCheck::Max {
            length,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends an exact-length check.
    pub fn length(mut self, length: usize, message: Option<&str>) -> Self {
        self.checks.push(StringCheck::Length {
            length,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends an email-shape check.
    pub fn email(mut self, message: Option<&str>) -> Self {
        self.checks.push(StringCheck::Email {
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends a pattern check against a pre-compiled regex.
    pub fn regex(mut self, pattern: Regex, message: Option<&str>) -> Self {
        self.checks.push(StringCheck::Regex {
            pattern,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends a trim step.
    ///
    /// Trim always succeeds: it replaces the value with its
    /// whitespace-trimmed form and ends the check walk, so checks appended
    /// after it never run.
    pub fn trim(mut self) -> Self {
        self.checks.push(StringCheck::Trim);
        self
    }
}

impl Validate for StringSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::String
    }

    fn validate(&self, value: &Value) -> Verdict {
        let Value::String(input) = value else {
            return Verdict::Invalid(Some(format!(
                "expected string, received {}",
                value.type_name()
            )));
        };

        for check in &self.checks {
            match check {
                StringCheck::Min { length, message } => {
                    if input.chars().count() < *length {
                        return invalid(message, || {
                            format!("must contain at least {length} characters")
                        });
                    }
                }
                StringCheck::Max { length, message } => {
                    if input.chars().count() > *length {
                        return invalid(message, || {
                            format!("must contain at most {length} characters")
                        });
                    }
                }
                StringCheck::Length { length, message } => {
                    if input.chars().count() != *length {
                        return invalid(message, || {
                            format!("must contain exactly {length} characters")
                        });
                    }
                }
                StringCheck::Email { message } => {
                    if !EMAIL.is_match(input) {
                        return invalid(message, || "is not a valid email address".into());
                    }
                }
                StringCheck::Regex { pattern, message } => {
                    if !pattern.is_match(input) {
                        return invalid(message, || {
                            format!("does not match pattern {}", pattern.as_str())
                        });
                    }
                }
                StringCheck::Trim => {
                    // Terminal: rewrites the value and skips the rest of the
                    // check list.
                    return Verdict::Valid(Value::String(input.trim().to_string()));
                }
            }
        }

        Verdict::Valid(value.clone())
    }
}
