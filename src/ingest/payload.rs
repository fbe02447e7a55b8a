//! Decoded request payload shapes.

use serde_json::{Map, Value};

/// A decoded JSON value, split by the shape the normalizer cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Null,
    Text(String),
    Object(Map<String, Value>),
    Array(Vec<Value>),
    /// Numbers and booleans.
    Scalar(Value),
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            Value::String(s) => Payload::Text(s),
            Value::Object(map) => Payload::Object(map),
            Value::Array(items) => Payload::Array(items),
            scalar @ (Value::Bool(_) | Value::Number(_)) => Payload::Scalar(scalar),
        }
    }
}

/// Parse a request body as JSON. Blank or invalid bodies yield `None`.
pub fn parse_body(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "Body is not JSON, treating as plain text");
            None
        }
    }
}

/// Loose truthiness: null, false, zero, and empty strings or collections
/// count as "not supplied".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// First value among `keys` that is present and truthy.
pub fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| is_truthy(value))
}
