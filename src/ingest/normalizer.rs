//! Conversion of arbitrary payloads into message drafts.

use serde_json::{Map, Value};

use crate::ingest::payload::{first_present, Payload};
use crate::store::message::{coerce_text, Draft};

const TEXT_KEYS: &[&str] = &["text", "message", "body", "content"];
const ID_KEYS: &[&str] = &["id", "messageId", "uuid"];
const TS_KEYS: &[&str] = &["ts", "time", "createdAt"];

/// Split a request into individual items.
///
/// A parsed payload wins over the raw text; the raw text is only used
/// when nothing parsed at all. A body of literal `null` counts as
/// nothing parsed.
pub fn extract_items(payload: Option<Value>, raw_text: &str) -> Vec<Value> {
    let Some(payload) = payload.filter(|value| !value.is_null()) else {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![Value::String(trimmed.to_string())];
    };

    match Payload::from(payload) {
        Payload::Array(items) => items,
        Payload::Object(mut map) if map.contains_key("messages") => {
            match map.remove("messages").unwrap_or(Value::Null) {
                Value::Array(items) => items,
                single => vec![single],
            }
        }
        Payload::Object(map) => vec![Value::Object(map)],
        Payload::Null => Vec::new(),
        Payload::Text(s) => vec![Value::String(s)],
        Payload::Scalar(v) => vec![v],
    }
}

/// Normalize one item. Null items produce nothing.
pub fn normalize_item(item: Value) -> Option<Draft> {
    match Payload::from(item) {
        Payload::Null => None,
        Payload::Text(text) => Some(Draft::text(text)),
        Payload::Object(map) => Some(normalize_object(map)),
        Payload::Array(items) => {
            let raw = Value::Array(items);
            Some(Draft {
                text: Value::String(raw.to_string()),
                id: None,
                ts: None,
                raw,
            })
        }
        Payload::Scalar(value) => Some(Draft {
            text: Value::String(coerce_text(&value)),
            id: None,
            ts: None,
            raw: value,
        }),
    }
}

fn normalize_object(map: Map<String, Value>) -> Draft {
    let text = first_present(&map, TEXT_KEYS)
        .filter(|text| !coerce_text(text).trim().is_empty())
        .cloned();
    let id = first_present(&map, ID_KEYS).cloned();
    let ts = first_present(&map, TS_KEYS).cloned();
    let raw = Value::Object(map);
    let text = text.unwrap_or_else(|| Value::String(raw.to_string()));

    Draft { text, id, ts, raw }
}

/// Parsed payload plus raw body in, ordered drafts out.
pub fn normalize(payload: Option<Value>, raw_text: &str) -> Vec<Draft> {
    extract_items(payload, raw_text)
        .into_iter()
        .filter_map(normalize_item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_expands_to_items() {
        let drafts = normalize(Some(json!(["a", "b"])), "");
        let texts: Vec<_> = drafts.iter().map(|d| d.text.clone()).collect();
        assert_eq!(texts, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_messages_wrapper() {
        let items = extract_items(Some(json!({"messages": [{"text": "x"}, "y"]})), "");
        assert_eq!(items, vec![json!({"text": "x"}), json!("y")]);

        let single = extract_items(Some(json!({"messages": {"text": "x"}})), "");
        assert_eq!(single, vec![json!({"text": "x"})]);
    }

    #[test]
    fn test_raw_text_fallback() {
        assert_eq!(extract_items(None, "  not json \n"), vec![json!("not json")]);
        assert!(extract_items(None, "   ").is_empty());
    }

    #[test]
    fn test_null_items_skipped() {
        let drafts = normalize(Some(json!([null, "a", null])), "");
        assert_eq!(drafts.len(), 1);
        assert!(normalize(Some(json!({"messages": null})), "").is_empty());
    }

    #[test]
    fn test_literal_null_body_is_text() {
        let drafts = normalize(Some(Value::Null), "null");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].text, json!("null"));
    }

    #[test]
    fn test_object_field_lookup() {
        let draft = normalize_item(json!({"message": "hi", "id": "x1", "ts": 1000})).unwrap();
        assert_eq!(draft.text, json!("hi"));
        assert_eq!(draft.id, Some(json!("x1")));
        assert_eq!(draft.ts, Some(json!(1000)));
        assert_eq!(draft.raw, json!({"message": "hi", "id": "x1", "ts": 1000}));
    }

    #[test]
    fn test_alternate_keys() {
        let draft =
            normalize_item(json!({"content": "c", "messageId": 9, "createdAt": 5})).unwrap();
        assert_eq!(draft.text, json!("c"));
        assert_eq!(draft.id, Some(json!(9)));
        assert_eq!(draft.ts, Some(json!(5)));
    }

    #[test]
    fn test_blank_text_uses_compact_json() {
        let draft = normalize_item(json!({"text": "   ", "user": "bob"})).unwrap();
        assert_eq!(draft.text, json!(r#"{"text":"   ","user":"bob"}"#));

        let draft = normalize_item(json!({"zeta": 1, "alpha": 2})).unwrap();
        assert_eq!(draft.text, json!(r#"{"zeta":1,"alpha":2}"#));
    }

    #[test]
    fn test_scalar_items() {
        let draft = normalize_item(json!(42)).unwrap();
        assert_eq!(draft.text, json!("42"));
        assert_eq!(draft.raw, json!(42));
        assert!(draft.id.is_none() && draft.ts.is_none());

        let draft = normalize_item(json!(true)).unwrap();
        assert_eq!(draft.text, json!("true"));
    }

    #[test]
    fn test_nested_array_item() {
        let draft = normalize_item(json!([1, 2])).unwrap();
        assert_eq!(draft.text, json!("[1,2]"));
        assert_eq!(draft.raw, json!([1, 2]));
    }
}
