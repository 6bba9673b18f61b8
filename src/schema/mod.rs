//! Composable runtime schema validation.
//!
//! Schemas are built bottom-up through a builder-style API (leaf schemas
//! first, wrapped and composed afterward) and validate top-down: a composite
//! schema delegates to its children and surfaces the first failure reason it
//! meets.
//!
//! # Design Principles
//!
//! - Fail-fast: the first failing check decides the outcome, nothing else runs
//! - One reason string per failure, no multi-error accumulation
//! - Builder calls consume `self` and return a new schema, so check lists are
//!   never shared between derived schemas
//! - A fully built schema is read-only and safe to validate against from
//!   multiple threads

mod array;
mod enumeration;
mod errors;
mod number;
mod numeric;
mod object;
mod string;
mod wrapper;

pub use array::ArraySchema;
pub use enumeration::EnumSchema;
pub use errors::{SchemaKind, ValidationError, ValidationResult};
pub use number::NumberSchema;
pub use object::{ExtraKeyPolicy, ObjectSchema};
pub use string::StringSchema;
pub use wrapper::{NullableSchema, OptionalSchema};

use crate::value::Value;

/// Outcome of one validation step.
///
/// The data on the `Valid` branch may differ from the input: the string
/// `trim` check rewrites the value, every other check passes it through.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The value passed; carries the resulting data.
    Valid(Value),
    /// The value failed; carries the reason, if the check produced one.
    Invalid(Option<String>),
}

/// Builds an `Invalid` verdict, preferring the check's custom message over
/// the default reason.
pub(crate) fn invalid(message: &Option<String>, default: impl FnOnce() -> String) -> Verdict {
    Verdict::Invalid(Some(message.clone().unwrap_or_else(default)))
}

/// The uniform validation capability every schema variant supports.
pub trait Validate: Into<Schema> + Sized {
    /// Returns the schema kind, used to tag failures.
    fn kind(&self) -> SchemaKind;

    /// Validates a value against this schema.
    fn validate(&self, value: &Value) -> Verdict;

    /// Validates a value, returning the normalized data or the failure.
    ///
    /// Never panics.
    fn safe_parse(&self, value: &Value) -> ValidationResult<Value> {
        match self.validate(value) {
            Verdict::Valid(data) => Ok(data),
            Verdict::Invalid(reason) => {
                let err = ValidationError::new(self.kind(), reason);
                tracing::debug!(kind = %err.kind(), reason = err.reason(), "validation rejected");
                Err(err)
            }
        }
    }

    /// Validates a value, returning the normalized data.
    ///
    /// # Panics
    ///
    /// Panics with the failure reason when the value does not satisfy this
    /// schema. Use [`Validate::safe_parse`] to recover the failure instead.
    fn parse(&self, value: &Value) -> Value {
        match self.safe_parse(value) {
            Ok(data) => data,
            Err(err) => panic!("{err}"),
        }
    }

    /// Wraps this schema so that `Undefined` input is accepted as-is.
    fn optional(self) -> OptionalSchema {
        OptionalSchema::new(self.into())
    }

    /// Wraps this schema so that `Null` input is accepted as-is.
    fn nullable(self) -> NullableSchema {
        NullableSchema::new(self.into())
    }

    /// Derives an array schema with this schema as the element type.
    fn array(self) -> ArraySchema {
        ArraySchema::new(self.into())
    }
}

/// A schema over the closed set of validator kinds.
///
/// Composites hold their children through this type, never through concrete
/// schema structs.
#[derive(Debug, Clone)]
pub enum Schema {
    /// String schema with ordered checks.
    String(StringSchema),
    /// Number schema with ordered checks.
    Number(NumberSchema),
    /// Closed set of string literals.
    Enum(EnumSchema),
    /// Wrapper accepting `Undefined`.
    Optional(OptionalSchema),
    /// Wrapper accepting `Null`.
    Nullable(NullableSchema),
    /// Homogeneous sequence schema.
    Array(ArraySchema),
    /// Structural record schema.
    Object(ObjectSchema),
}

impl Validate for Schema {
    fn kind(&self) -> SchemaKind {
        match self {
            Schema::String(s) => s.kind(),
            Schema::Number(s) => s.kind(),
            Schema::Enum(s) => s.kind(),
            Schema::Optional(s) => s.kind(),
            Schema::Nullable(s) => s.kind(),
            Schema::Array(s) => s.kind(),
            Schema::Object(s) => s.kind(),
        }
    }

    fn validate(&self, value: &Value) -> Verdict {
        match self {
            Schema::String(s) => s.validate(value),
            Schema::Number(s) => s.validate(value),
            Schema::Enum(s) => s.validate(value),
            Schema::Optional(s) => s.validate(value),
            Schema::Nullable(s) => s.validate(value),
            Schema::Array(s) => s.validate(value),
            Schema::Object(s) => s.validate(value),
        }
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        Schema::String(schema)
    }
}

impl From<NumberSchema> for Schema {
    fn from(schema: NumberSchema) -> Self {
        Schema::Number(schema)
    }
}

impl From<EnumSchema> for Schema {
    fn from(schema: EnumSchema) -> Self {
        Schema::Enum(schema)
    }
}

impl From<OptionalSchema> for Schema {
    fn from(schema: OptionalSchema) -> Self {
        Schema::Optional(schema)
    }
}

impl From<NullableSchema> for Schema {
    fn from(schema: NullableSchema) -> Self {
        Schema::Nullable(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Schema::Array(schema)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

/// Creates a string schema with no checks.
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Creates a number schema with no checks.
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// Creates an enumeration schema over the given literals.
///
/// # Panics
///
/// Panics if `values` is empty; an enumeration needs at least one literal.
pub fn enumeration<I, S>(values: I) -> EnumSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumSchema::new(values)
}

/// Wraps a schema so that `Undefined` input is accepted as-is.
pub fn optional(schema: impl Into<Schema>) -> OptionalSchema {
    OptionalSchema::new(schema.into())
}

/// Wraps a schema so that `Null` input is accepted as-is.
pub fn nullable(schema: impl Into<Schema>) -> NullableSchema {
    NullableSchema::new(schema.into())
}

/// Creates an array schema with the given element schema.
pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(element.into())
}

/// Creates an object schema from `(field name, field schema)` pairs.
///
/// Field declaration order is preserved; missing-field reporting and field
/// validation follow it.
pub fn object<I, K, S>(shape: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Schema>,
{
    ObjectSchema::new(shape)
}
