//! Content classification and record naming for ingested files.

use crate::parse::parse_or_fallback;
use crate::types::{FileEntry, Record};
use serde_json::Value;

/// Declared content type of a file, as far as ingestion cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Json,
    JavaScript,
    Other(String),
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "application/json" => ContentType::Json,
            // mime_guess reports .js as application/javascript in older tables
            "text/javascript" | "application/javascript" => ContentType::JavaScript,
            other => ContentType::Other(other.to_string()),
        }
    }
}

/// Strip one trailing `.json` or `.js`.
pub fn base_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(".json")
        .or_else(|| file_name.strip_suffix(".js"))
        .unwrap_or(file_name)
}

/// Payload of a file according to its content type. Never fails.
pub fn payload(entry: &FileEntry) -> Value {
    match ContentType::from_mime(&entry.content_type) {
        ContentType::Json => parse_or_fallback(&entry.text).into_value(),
        ContentType::JavaScript | ContentType::Other(_) => Value::String(entry.text.clone()),
    }
}

/// Key a record is stored under inside its bucket.
///
/// The plain-data bucket always uses the file base name. Elsewhere a truthy
/// `id` on an object payload wins.
pub fn logical_name(bucket: &str, json_bucket: &str, base: &str, payload: &Value) -> String {
    if bucket == json_bucket {
        return base.to_string();
    }
    payload
        .as_object()
        .and_then(|object| object.get("id"))
        .and_then(id_key)
        .unwrap_or_else(|| base.to_string())
}

/// Key for a truthy `id`. Integral floats print without a fraction (`1.0`
/// keys as `1`). Object and array ids fall back to the base name.
fn id_key(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_key(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_key(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Wrap a payload for its bucket.
pub fn into_record(bucket: &str, function_bucket: &str, name: &str, payload: Value) -> Record {
    if bucket == function_bucket {
        Record::Function {
            function: payload,
            id: name.to_string(),
        }
    } else {
        Record::Plain(payload)
    }
}
