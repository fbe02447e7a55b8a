//! Canonical message record and the coercions used to finalize it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A stored message as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
    pub raw: Value,
}

/// An intermediate record produced by normalization.
///
/// Fields are kept as loose JSON so the store decides how to fill
/// defaults when a value is missing or has the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub text: Value,
    pub id: Option<Value>,
    pub ts: Option<Value>,
    pub raw: Value,
}

impl Draft {
    /// A draft carrying only text, as produced for plain string items.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: Value::String(text.clone()),
            text: Value::String(text),
            id: None,
            ts: None,
        }
    }

    /// Finalize into a [`Message`], stamping defaults against `now`.
    pub fn finalize(self, now: i64) -> Message {
        Message {
            id: coerce_id(self.id.as_ref()).unwrap_or_else(generate_id),
            text: coerce_text(&self.text),
            ts: coerce_ts(self.ts.as_ref()).unwrap_or(now),
            raw: self.raw,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Fresh opaque message id (32 lowercase hex characters).
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// String form of a text value. Null becomes empty; strings are verbatim.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Trimmed string form of a supplied id, or `None` when nothing usable was given.
pub fn coerce_id(value: Option<&Value>) -> Option<String> {
    let id = match value? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!id.is_empty()).then_some(id)
}

/// Integer timestamp from a numeric value. Floats truncate toward zero.
pub fn coerce_ts(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| u.min(i64::MAX as u64) as i64))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finalize_fills_defaults() {
        let msg = Draft::text("hello").finalize(42);
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.ts, 42);
        assert_eq!(msg.raw, json!("hello"));
        assert_eq!(msg.id.len(), 32);
        assert!(msg.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_finalize_keeps_supplied_fields() {
        let draft = Draft {
            text: json!("hi"),
            id: Some(json!("  x1 ")),
            ts: Some(json!(1000)),
            raw: json!({"message": "hi"}),
        };
        let msg = draft.finalize(5);
        assert_eq!(msg.id, "x1");
        assert_eq!(msg.ts, 1000);
    }

    #[test]
    fn test_coerce_ts() {
        assert_eq!(coerce_ts(Some(&json!(1500))), Some(1500));
        assert_eq!(coerce_ts(Some(&json!(1500.9))), Some(1500));
        assert_eq!(coerce_ts(Some(&json!("1500"))), None);
        assert_eq!(coerce_ts(Some(&json!(true))), None);
        assert_eq!(coerce_ts(None), None);
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id(Some(&json!(7))), Some("7".to_string()));
        assert_eq!(coerce_id(Some(&json!("   "))), None);
        assert_eq!(coerce_id(Some(&Value::Null)), None);
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text(&Value::Null), "");
        assert_eq!(coerce_text(&json!(3)), "3");
        assert_eq!(coerce_text(&json!(false)), "false");
        assert_eq!(coerce_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_serialized_shape() {
        let msg = Message {
            id: "a".into(),
            text: "b".into(),
            ts: 1,
            raw: Value::Null,
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"id": "a", "text": "b", "ts": 1, "raw": null})
        );
    }
}
