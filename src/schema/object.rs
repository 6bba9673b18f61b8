//! Object schema: shape reconciliation, extra-key policies, and structural
//! combinators.
//!
//! Validation proceeds in a fixed order:
//! 1. Type gates, each with its own failure reason
//! 2. Presence of every declared field, in shape declaration order
//! 3. Extra-key collection and the strict-policy rejection
//! 4. Reshaping (strip drops extras, the other policies keep them)
//! 5. Per-field validation in shape order, failing fast with the field's
//!    inner reason verbatim
//!
//! Combinators never mutate the receiver's shape in place as seen by other
//! schemas: they consume `self` and return a new schema.

use super::errors::SchemaKind;
use super::{EnumSchema, Schema, Validate, Verdict};
use crate::value::Value;

/// How an object schema treats input keys not declared in its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraKeyPolicy {
    /// Drop undeclared keys from the output record.
    #[default]
    Strip,
    /// Keep undeclared keys, copied through unvalidated.
    Passthrough,
    /// Reject the input when undeclared keys are present.
    Strict,
}

/// Schema for plain structural records.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    shape: Vec<(String, Schema)>,
    policy: ExtraKeyPolicy,
}

impl ObjectSchema {
    /// Creates an object schema from `(field name, field schema)` pairs,
    /// with the default strip policy.
    ///
    /// Field names are keyed uniquely: a repeated name overrides the
    /// earlier definition, the same way `extend` does.
    pub fn new<I, K, S>(shape: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        Self {
            shape: Vec::new(),
            policy: ExtraKeyPolicy::Strip,
        }
        .extend(shape)
    }

    /// Returns the shape in declaration order.
    pub fn shape(&self) -> &[(String, Schema)] {
        &self.shape
    }

    /// Returns the extra-key policy.
    pub fn policy(&self) -> ExtraKeyPolicy {
        self.policy
    }

    fn declares(&self, key: &str) -> bool {
        self.shape.iter().any(|(name, _)| name == key)
    }

    /// Returns the same shape under the strip policy.
    pub fn strip(mut self) -> Self {
        self.policy = ExtraKeyPolicy::Strip;
        self
    }

    /// Returns the same shape under the passthrough policy.
    pub fn passthrough(mut self) -> Self {
        self.policy = ExtraKeyPolicy::Passthrough;
        self
    }

    /// Returns the same shape under the strict policy.
    pub fn strict(mut self) -> Self {
        self.policy = ExtraKeyPolicy::Strict;
        self
    }

    /// Derives an enumeration over the declared field names.
    ///
    /// # Panics
    ///
    /// Panics if the shape has no fields, since an enumeration needs at
    /// least one literal.
    pub fn keyof(&self) -> EnumSchema {
        EnumSchema::new(self.shape.iter().map(|(key, _)| key.clone()))
    }

    /// Adds fields to the shape. A field with an already-declared name
    /// overrides it in place; new names are appended in order.
    pub fn extend<I, K, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        for (key, schema) in fields {
            let key = key.into();
            let schema = schema.into();
            match self.shape.iter_mut().find(|(name, _)| *name == key) {
                Some(entry) => entry.1 = schema,
                None => self.shape.push((key, schema)),
            }
        }
        self
    }

    /// Merges another object schema's shape into this one. Same-named
    /// fields take the other schema's definition.
    pub fn merge(self, other: &ObjectSchema) -> Self {
        self.extend(other.shape.iter().map(|(key, schema)| (key.clone(), schema.clone())))
    }

    /// Restricts the shape to the named fields.
    pub fn pick(mut self, mask: &[&str]) -> Self {
        self.shape.retain(|(key, _)| mask.contains(&key.as_str()));
        self
    }

    /// Removes the named fields from the shape.
    pub fn omit(mut self, mask: &[&str]) -> Self {
        self.shape.retain(|(key, _)| !mask.contains(&key.as_str()));
        self
    }

    /// Wraps the selected fields in Optional. Selects every field when
    /// `mask` is `None`; unselected fields are left untouched.
    pub fn partial(self, mask: Option<&[&str]>) -> Self {
        let shape = self
            .shape
            .into_iter()
            .map(|(key, schema)| {
                if selected(mask, &key) {
                    let wrapped = Schema::Optional(super::OptionalSchema::new(schema));
                    (key, wrapped)
                } else {
                    (key, schema)
                }
            })
            .collect();
        Self {
            shape,
            policy: self.policy,
        }
    }

    /// Strips any chain of Optional wrappers off the selected fields,
    /// down to the innermost non-Optional schema. Selects every field when
    /// `mask` is `None`; unselected fields are left untouched.
    pub fn required(self, mask: Option<&[&str]>) -> Self {
        let shape = self
            .shape
            .into_iter()
            .map(|(key, mut schema)| {
                if selected(mask, &key) {
                    while let Schema::Optional(wrapper) = schema {
                        schema = wrapper.unwrap();
                    }
                }
                (key, schema)
            })
            .collect();
        Self {
            shape,
            policy: self.policy,
        }
    }
}

fn selected(mask: Option<&[&str]>, key: &str) -> bool {
    mask.map_or(true, |names| names.contains(&key))
}

impl Validate for ObjectSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Object
    }

    fn validate(&self, value: &Value) -> Verdict {
        // Gate order is fixed; each rejected shape has its own reason.
        let entries = match value {
            Value::Null => return Verdict::Invalid(Some("is null".into())),
            Value::Array(_) => return Verdict::Invalid(Some("is an array".into())),
            Value::Promise => return Verdict::Invalid(Some("is promise".into())),
            Value::Pattern(_) => return Verdict::Invalid(Some("is a regex".into())),
            Value::Date(_) => return Verdict::Invalid(Some("is a date".into())),
            Value::Set(_) => return Verdict::Invalid(Some("is a set".into())),
            Value::Map(_) => return Verdict::Invalid(Some("is a map".into())),
            Value::Object(entries) => entries,
            other => {
                return Verdict::Invalid(Some(format!(
                    "expected object, received {}",
                    other.type_name()
                )))
            }
        };

        // Every declared field must be present as a key. The first missing
        // one, in shape declaration order, decides the reason.
        for (key, _) in &self.shape {
            if !entries.iter().any(|(name, _)| name == key) {
                return Verdict::Invalid(Some(format!("{key} is in shape, but not in data")));
            }
        }

        let extras: Vec<&str> = entries
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(|key| !self.declares(key))
            .collect();

        if !extras.is_empty() && self.policy == ExtraKeyPolicy::Strict {
            return Verdict::Invalid(Some(format!(
                "{} are in data, but not in shape",
                extras.join(", ")
            )));
        }

        // Reshape: strip drops extras, the other policies copy everything.
        let mut reshaped: Vec<(String, Value)> = entries
            .iter()
            .filter(|(key, _)| self.policy != ExtraKeyPolicy::Strip || self.declares(key))
            .cloned()
            .collect();

        // Declared fields validate in shape order; retained extras are
        // copied through unvalidated.
        for (key, field_schema) in &self.shape {
            let Some((_, field_value)) = reshaped.iter_mut().find(|(name, _)| name == key) else {
                continue;
            };
            match field_schema.validate(field_value) {
                Verdict::Valid(data) => *field_value = data,
                failed => return failed,
            }
        }

        Verdict::Valid(Value::Object(reshaped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{number, object, string};
    use chrono::Utc;
    use serde_json::json;

    fn person() -> ObjectSchema {
        object([
            ("name", Schema::from(string())),
            ("age", Schema::from(number())),
        ])
    }

    fn input(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_gates_have_fixed_reasons() {
        let schema = person();
        let cases = [
            (Value::Null, "is null"),
            (Value::Array(vec![]), "is an array"),
            (Value::Promise, "is promise"),
            (Value::Pattern("x+".into()), "is a regex"),
            (Value::Date(Utc::now()), "is a date"),
            (Value::Set(vec![]), "is a set"),
            (Value::Map(vec![]), "is a map"),
        ];
        for (value, reason) in cases {
            assert_eq!(
                schema.validate(&value),
                Verdict::Invalid(Some(reason.into())),
                "gate for {}",
                value.type_name()
            );
        }
    }

    #[test]
    fn test_non_record_scalar_fails() {
        let verdict = person().validate(&Value::Number(3.0));
        assert_eq!(
            verdict,
            Verdict::Invalid(Some("expected object, received number".into()))
        );
    }

    #[test]
    fn test_first_missing_field_in_shape_order() {
        let verdict = person().validate(&input(json!({})));
        assert_eq!(
            verdict,
            Verdict::Invalid(Some("name is in shape, but not in data".into()))
        );

        let verdict = person().validate(&input(json!({"name": "mike"})));
        assert_eq!(
            verdict,
            Verdict::Invalid(Some("age is in shape, but not in data".into()))
        );
    }

    #[test]
    fn test_strip_is_the_default_policy() {
        let verdict = person().validate(&input(json!({
            "name": "mike", "age": 20, "extra": "x"
        })));
        assert_eq!(verdict, Verdict::Valid(input(json!({"name": "mike", "age": 20}))));
    }

    #[test]
    fn test_passthrough_keeps_extras_unvalidated() {
        let schema = person().passthrough();
        let verdict = schema.validate(&input(json!({
            "name": "mike", "age": 20, "extra": {"deep": true}
        })));
        assert_eq!(
            verdict,
            Verdict::Valid(input(json!({
                "name": "mike", "age": 20, "extra": {"deep": true}
            })))
        );
    }

    #[test]
    fn test_strict_lists_extras_in_input_order() {
        let schema = person().strict();
        let verdict = schema.validate(&input(json!({
            "z_extra": 1, "name": "mike", "age": 20, "a_extra": 2
        })));
        assert_eq!(
            verdict,
            Verdict::Invalid(Some("z_extra, a_extra are in data, but not in shape".into()))
        );
    }

    #[test]
    fn test_field_failure_surfaces_inner_reason_verbatim() {
        let verdict = person().validate(&input(json!({"name": "mike", "age": "old"})));
        assert_eq!(
            verdict,
            Verdict::Invalid(Some("expected number, received string".into()))
        );
    }

    #[test]
    fn test_fields_validate_in_shape_order() {
        let verdict = person().validate(&input(json!({"age": true, "name": 1})));
        // name is declared first, so its failure wins even though age also
        // fails.
        assert_eq!(
            verdict,
            Verdict::Invalid(Some("expected string, received number".into()))
        );
    }

    #[test]
    fn test_field_transforms_land_in_the_output() {
        let schema = object([("tag", Schema::from(string().trim()))]);
        let verdict = schema.validate(&input(json!({"tag": "  x  "})));
        assert_eq!(verdict, Verdict::Valid(input(json!({"tag": "x"}))));
    }

    #[test]
    fn test_policy_combinators_are_idempotent() {
        let value = input(json!({"name": "a", "age": 1, "extra": 2}));
        let once = person().strict();
        let twice = person().strict().strict();
        assert_eq!(once.validate(&value), twice.validate(&value));

        let once = person().strip();
        let twice = person().strip().strip();
        assert_eq!(once.validate(&value), twice.validate(&value));
    }

    #[test]
    fn test_keyof_enumerates_field_names() {
        let keys = person().keyof();
        assert_eq!(keys.values(), ["name", "age"]);
        assert!(matches!(
            keys.validate(&Value::String("age".into())),
            Verdict::Valid(_)
        ));
        assert!(matches!(
            keys.validate(&Value::String("height".into())),
            Verdict::Invalid(_)
        ));
    }

    #[test]
    fn test_extend_overrides_same_named_fields() {
        let schema = person().extend([("age", Schema::from(string()))]);
        let verdict = schema.validate(&input(json!({"name": "mike", "age": "twenty"})));
        assert!(matches!(verdict, Verdict::Valid(_)));

        // Position of the overridden field is preserved.
        let keys: Vec<&str> = schema.shape().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["name", "age"]);
    }

    #[test]
    fn test_merge_takes_the_other_shape() {
        let extra = object([("city", Schema::from(string()))]);
        let schema = person().merge(&extra);
        let verdict = schema.validate(&input(json!({
            "name": "mike", "age": 20, "city": "oslo"
        })));
        assert!(matches!(verdict, Verdict::Valid(_)));
    }

    #[test]
    fn test_pick_and_omit_are_complementary() {
        let picked = person().pick(&["name"]);
        let omitted = person().omit(&["name"]);

        let names: Vec<&str> = picked.shape().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["name"]);
        let names: Vec<&str> = omitted.shape().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["age"]);
    }

    #[test]
    fn test_partial_accepts_explicit_undefined() {
        let schema = person().partial(None);
        let value = Value::Object(vec![
            ("name".into(), Value::Undefined),
            ("age".into(), Value::Undefined),
        ]);
        assert!(matches!(schema.validate(&value), Verdict::Valid(_)));
    }

    #[test]
    fn test_partial_with_mask_leaves_other_fields_strict() {
        let schema = person().partial(Some(&["age"]));
        let value = Value::Object(vec![
            ("name".into(), Value::Undefined),
            ("age".into(), Value::Undefined),
        ]);
        // name was not selected, so undefined still fails its string schema.
        assert!(matches!(schema.validate(&value), Verdict::Invalid(_)));
    }

    #[test]
    fn test_required_unwraps_optional_chains() {
        let schema = person().partial(None).partial(None).required(None);
        let value = Value::Object(vec![
            ("name".into(), Value::Undefined),
            ("age".into(), Value::Number(20.0)),
        ]);
        assert!(matches!(schema.validate(&value), Verdict::Invalid(_)));
    }

    #[test]
    fn test_required_with_mask_leaves_other_fields_optional() {
        let schema = person().partial(None).required(Some(&["name"]));
        let value = Value::Object(vec![
            ("name".into(), Value::String("mike".into())),
            ("age".into(), Value::Undefined),
        ]);
        assert!(matches!(schema.validate(&value), Verdict::Valid(_)));
    }

    #[test]
    fn test_combinators_leave_the_receiver_clone_untouched() {
        let base = person();
        let derived = base.clone().extend([("city", Schema::from(string()))]);

        assert_eq!(base.shape().len(), 2);
        assert_eq!(derived.shape().len(), 3);
    }
}
