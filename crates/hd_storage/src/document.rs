//! Conversion between loosely-typed JSON documents and [`RawRecord`]s.
//!
//! Documents follow the shape of a document-store export: arbitrary keys,
//! any of which may be missing or hold an unexpected type. Only `title`,
//! `content` and `published_at` are read; everything else is ignored.
//! `published_at` may be plain text or an extended-JSON date
//! (`{"$date": "..."}`, `{"$date": 1577836800000}` or
//! `{"$date": {"$numberLong": "1577836800000"}}`).

use chrono::{DateTime, TimeZone, Utc};
use hd_core::{RawRecord, RawTimestamp};
use serde_json::{json, Map, Value};
use tracing::debug;

fn text_field(doc: &Map<String, Value>, key: &str) -> Option<String> {
    match doc.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            debug!("Ignoring non-text {} field: {}", key, other);
            None
        }
    }
}

fn millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        Value::Object(obj) => obj.get("$numberLong").and_then(millis),
        _ => None,
    }
}

fn extended_date(value: &Value) -> Option<RawTimestamp> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(RawTimestamp::Structured),
        other => millis(other)
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .map(RawTimestamp::from),
    }
}

fn timestamp_field(doc: &Map<String, Value>) -> Option<RawTimestamp> {
    match doc.get("published_at") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(RawTimestamp::Text(s.clone())),
        Some(Value::Object(obj)) if obj.contains_key("$date") => obj
            .get("$date")
            .and_then(extended_date)
            .or_else(|| Some(RawTimestamp::Text(Value::Object(obj.clone()).to_string()))),
        // Let the normalizer reject it with a warning
        Some(other) => Some(RawTimestamp::Text(other.to_string())),
    }
}

/// Decodes one document. Anything that is not a JSON object yields `None`.
pub fn from_document(doc: &Value) -> Option<RawRecord> {
    let obj = doc.as_object()?;
    Some(RawRecord {
        title: text_field(obj, "title"),
        content: text_field(obj, "content"),
        published_at: timestamp_field(obj),
    })
}

pub fn to_document(record: &RawRecord) -> Value {
    let mut doc = Map::new();
    if let Some(title) = &record.title {
        doc.insert("title".to_string(), json!(title));
    }
    if let Some(content) = &record.content {
        doc.insert("content".to_string(), json!(content));
    }
    match &record.published_at {
        Some(RawTimestamp::Structured(dt)) => {
            doc.insert("published_at".to_string(), json!({ "$date": dt.to_rfc3339() }));
        }
        Some(RawTimestamp::Text(text)) => {
            doc.insert("published_at".to_string(), json!(text));
        }
        None => {}
    }
    Value::Object(doc)
}
