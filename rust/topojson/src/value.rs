// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property values attached to features.
//!
//! Feature properties are copied verbatim from the input document, without
//! any schema. They are kept in a small recursive value type that each
//! geometry owns outright.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// A property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<Value>),
    Object(Properties),
}

/// A keyed property bag, the usual shape of a feature's `properties` member.
pub type Properties = FxHashMap<String, Value>;

impl Value {
    /// Returns the value under `key` when this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 beyond i64::MAX and all fractional numbers
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_scalars() {
        assert_eq!(Value::from(&json!(null)), Value::Null);
        assert_eq!(Value::from(&json!(true)), Value::Bool(true));
        assert_eq!(Value::from(&json!(42)), Value::Int(42));
        assert_eq!(Value::from(&json!(1.5)), Value::Double(1.5));
        assert_eq!(
            Value::from(&json!("Texas")),
            Value::String("Texas".to_string())
        );
    }

    #[test]
    fn converts_nested_object() {
        let value = Value::from(&json!({
            "name": "Lake",
            "depth": 12.5,
            "tags": ["water", 3, null],
        }));

        assert_eq!(value.get("name").and_then(Value::as_str), Some("Lake"));
        assert_eq!(value.get("depth").and_then(Value::as_f64), Some(12.5));

        if let Some(Value::List(items)) = value.get("tags") {
            assert_eq!(items.len(), 3);
            assert_eq!(items[1], Value::Int(3));
            assert!(items[2].is_null());
        } else {
            panic!("expected list");
        }
    }

    #[test]
    fn get_on_non_object_is_none() {
        assert!(Value::Int(1).get("x").is_none());
        assert!(Value::List(vec![]).get("x").is_none());
    }

    #[test]
    fn serializes_untagged() {
        let value = Value::from(&json!({"a": [1, 2.5, "b", false]}));
        let out = serde_json::to_value(&value).unwrap();
        assert_eq!(out, json!({"a": [1, 2.5, "b", false]}));
    }
}
