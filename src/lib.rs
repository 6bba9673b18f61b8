//! shapeguard - A strict, composable runtime schema validator
//!
//! Build a schema bottom-up, then parse untrusted values against it:
//!
//! ```
//! use shapeguard::{enumeration, number, object, string, Schema, Validate, Value};
//! use serde_json::json;
//!
//! let patient = object([
//!     ("name", Schema::from(string().min(1, None))),
//!     ("age", number().int(None).nonnegative(None).into()),
//!     ("blood_type", enumeration(["A", "B", "AB", "O"]).into()),
//! ]);
//!
//! let data = patient
//!     .safe_parse(&Value::from(json!({
//!         "name": "mike",
//!         "age": 20,
//!         "blood_type": "A",
//!         "unknown": "stripped",
//!     })))
//!     .unwrap();
//! assert!(data.get("unknown").is_none());
//! ```

pub mod schema;
pub mod value;

pub use schema::{
    array, enumeration, nullable, number, object, optional, string, ArraySchema, EnumSchema,
    ExtraKeyPolicy, NullableSchema, NumberSchema, ObjectSchema, OptionalSchema, Schema,
    SchemaKind, StringSchema, Validate, ValidationError, ValidationResult, Verdict,
};
pub use value::Value;
