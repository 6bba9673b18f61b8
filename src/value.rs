//! Dynamic value model for untrusted input.
//!
//! Validation consumes already-decoded in-memory values. The model is wider
//! than JSON:
//! - The optional wrapper needs an explicit absent sentinel (`Undefined`),
//!   distinct from `Null`.
//! - The object validator must tell a plain structural record apart from
//!   dates, pattern objects, sets, keyed maps, and deferred handles.
//!
//! Record entry order is preserved end to end; extra-key reporting depends
//! on the order keys appeared in the input.

use chrono::{DateTime, Utc};

/// An untrusted dynamic value, as produced by a decoder bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent sentinel.
    Undefined,
    /// The null sentinel.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit floating point; integers are represented exactly up to 2^53.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered, indexable, non-keyed sequence.
    Array(Vec<Value>),
    /// Plain structural record. Entry order is insertion order.
    Object(Vec<(String, Value)>),
    /// Date/time value.
    Date(DateTime<Utc>),
    /// Regular-expression object, carried as its pattern source.
    Pattern(String),
    /// Uniqueness-set container.
    Set(Vec<Value>),
    /// Key-value container, distinct from a plain structural record.
    Map(Vec<(Value, Value)>),
    /// Opaque deferred-computation handle.
    Promise,
}

impl Value {
    /// Returns the type name used in failure reasons.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Date(_) => "date",
            Value::Pattern(_) => "regex",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Promise => "promise",
        }
    }

    /// Looks up a record entry by exact key match.
    ///
    /// Returns `None` for non-record values and for absent keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Returns true when the record contains the key.
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Best-effort bridge back to JSON.
    ///
    /// Dates render as RFC 3339 strings. Values with no JSON form
    /// (`Undefined`, `Pattern`, `Set`, `Map`, `Promise`, non-finite numbers,
    /// and containers holding any of those) yield `None`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Undefined => None,
            Value::Null => Some(serde_json::Value::Null),
            Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Value::Number(n) => serde_json::Number::from_f64(*n).map(serde_json::Value::Number),
            Value::String(s) => Some(serde_json::Value::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Option<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Object(entries) => entries
                .iter()
                .map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
            Value::Date(d) => Some(serde_json::Value::String(d.to_rfc3339())),
            Value::Pattern(_) | Value::Set(_) | Value::Map(_) | Value::Promise => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Integers beyond 2^53 lose precision here, matching the engine's
            // f64 number model.
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => {
                Value::Object(entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::Pattern("a+".into()).type_name(), "regex");
        assert_eq!(Value::Promise.type_name(), "promise");
    }

    #[test]
    fn test_json_bridge_preserves_entry_order() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let Value::Object(entries) = value else {
            panic!("expected a record");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_record_lookup_is_exact_match() {
        let value = Value::from(json!({"name": "mike", "Name": "other"}));
        assert_eq!(value.get("name"), Some(&Value::String("mike".into())));
        assert_eq!(value.get("NAME"), None);
        assert!(value.has_key("Name"));
    }

    #[test]
    fn test_json_roundtrip() {
        // Integer JSON numbers come back as floats after the f64 bridge, so
        // the fixture sticks to shapes that survive the round trip exactly.
        let json = json!({"a": [1.25, 2.5, null], "b": {"c": true}, "d": "text"});
        let value = Value::from(json.clone());
        assert_eq!(value.to_json(), Some(json));
    }

    #[test]
    fn test_non_json_values_have_no_json_form() {
        assert_eq!(Value::Undefined.to_json(), None);
        assert_eq!(Value::Promise.to_json(), None);
        assert_eq!(Value::Set(vec![]).to_json(), None);
        assert_eq!(Value::Array(vec![Value::Promise]).to_json(), None);
        assert_eq!(Value::Number(f64::INFINITY).to_json(), None);
    }

    #[test]
    fn test_date_renders_rfc3339() {
        let date = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = Value::Date(date).to_json().unwrap();
        assert_eq!(json, json!("2024-03-01T12:00:00+00:00"));
    }
}
