//! Number schema and its ordered checks.
//!
//! Numbers are f64 throughout. The comparison sugar (`gt`, `gte`, `lt`,
//! `lte`, `positive`, `negative`, `nonnegative`, `nonpositive`) all reduce
//! to parameterized min/max checks; `safe` reduces to an inclusive min/max
//! pair at the exactly representable integer bounds.

use super::errors::SchemaKind;
use super::numeric::float_safe_remainder;
use super::{invalid, Validate, Verdict};
use crate::value::Value;

/// Largest integer magnitude an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone)]
enum NumberCheck {
    Min {
        value: f64,
        inclusive: bool,
        message: Option<String>,
    },
    Max {
        value: f64,
        inclusive: bool,
        message: Option<String>,
    },
    Int {
        message: Option<String>,
    },
    MultipleOf {
        step: f64,
        message: Option<String>,
    },
    Finite {
        message: Option<String>,
    },
}

/// Schema for numeric values.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    checks: Vec<NumberCheck>,
}

impl NumberSchema {
    /// Creates a number schema with no checks.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    fn push_min(mut self, value: f64, inclusive: bool, message: Option<&str>) -> Self {
        self.checks.push(NumberCheck::Min {
            value,
            inclusive,
            message: message.map(str::to_owned),
        });
        self
    }

    fn push_max(mut self, value: f64, inclusive: bool, message: Option<&str>) -> Self {
        self.checks.push(NumberCheck::Max {
            value,
            inclusive,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Appends an exclusive lower bound.
    pub fn gt(self, value: f64, message: Option<&str>) -> Self {
        self.push_min(value, false, message)
    }

    /// Appends an inclusive lower bound.
    pub fn gte(self, value: f64, message: Option<&str>) -> Self {
        self.push_min(value, true, message)
    }

    /// Appends an exclusive upper bound.
    pub fn lt(self, value: f64, message: Option<&str>) -> Self {
        self.push_max(value, false, message)
    }

    /// Appends an inclusive upper bound.
    pub fn lte(self, value: f64, message: Option<&str>) -> Self {
        self.push_max(value, true, message)
    }

    /// Requires the value to be greater than zero.
    pub fn positive(self, message: Option<&str>) -> Self {
        self.gt(0.0, message)
    }

    /// Requires the value to be zero or greater.
    pub fn nonnegative(self, message: Option<&str>) -> Self {
        self.gte(0.0, message)
    }

    /// Requires the value to be less than zero.
    pub fn negative(self, message: Option<&str>) -> Self {
        self.lt(0.0, message)
    }

    /// Requires the value to be zero or less.
    pub fn nonpositive(self, message: Option<&str>) -> Self {
        self.lte(0.0, message)
    }

    /// Requires the value to be a mathematical integer.
    pub fn int(mut self, message: Option<&str>) -> Self {
        self.checks.push(NumberCheck::Int {
            message: message.map(str::to_owned),
        });
        self
    }

    /// Requires the value to be an exact multiple of `step`, using
    /// decimal-scaled integer arithmetic so that decimal steps like `0.1`
    /// behave as written.
    pub fn multiple_of(mut self, step: f64, message: Option<&str>) -> Self {
        self.checks.push(NumberCheck::MultipleOf {
            step,
            message: message.map(str::to_owned),
        });
        self
    }

    /// Rejects NaN and the infinities.
    pub fn finite(mut self, message: Option<&str>) -> Self {
        self.checks.push(NumberCheck::Finite {
            message: message.map(str::to_owned),
        });
        self
    }

    /// Bounds the value to the exactly representable integer range,
    /// appending an inclusive min and an inclusive max check.
    pub fn safe(self, message: Option<&str>) -> Self {
        self.push_min(-MAX_SAFE_INTEGER, true, message)
            .push_max(MAX_SAFE_INTEGER, true, message)
    }
}

impl Validate for NumberSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Number
    }

    fn validate(&self, value: &Value) -> Verdict {
        let Value::Number(input) = value else {
            return Verdict::Invalid(Some(format!(
                "expected number, received {}",
                value.type_name()
            )));
        };

        for check in &self.checks {
            match check {
                NumberCheck::Min {
                    value: bound,
                    inclusive,
                    message,
                } => {
                    let passed = if *inclusive { input >= bound } else { input > bound };
                    if !passed {
                        return invalid(message, || {
                            if *inclusive {
                                format!("must be greater than or equal to {bound}")
                            } else {
                                format!("must be greater than {bound}")
                            }
                        });
                    }
                }
                NumberCheck::Max {
                    value: bound,
                    inclusive,
                    message,
                } => {
                    let passed = if *inclusive { input <= bound } else { input < bound };
                    if !passed {
                        return invalid(message, || {
                            if *inclusive {
                                format!("must be less than or equal to {bound}")
                            } else {
                                format!("must be less than {bound}")
                            }
                        });
                    }
                }
                NumberCheck::Int { message } => {
                    if !(input.is_finite() && input.fract() == 0.0) {
                        return invalid(message, || "must be an integer".into());
                    }
                }
                NumberCheck::MultipleOf { step, message } => {
                    if float_safe_remainder(*input, *step) != 0.0 {
                        return invalid(message, || format!("must be a multiple of {step}"));
                    }
                }
                NumberCheck::Finite { message } => {
                    if !input.is_finite() {
                        return invalid(message, || "must be finite".into());
                    }
                }
            }
        }

        Verdict::Valid(value.clone())
    }
}
