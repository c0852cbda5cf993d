//! Shallow per-bucket merge.

use serde_json::{Map, Value};

/// Merge `incoming` into `state`, bucket by bucket.
///
/// Object buckets are merged key-wise (incoming wins, existing keys kept).
/// Any other incoming value replaces the bucket. Buckets absent from
/// `incoming` are untouched.
pub fn shallow_merge(state: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (bucket, value) in incoming {
        match value {
            Value::Object(records) => {
                let slot = state
                    .entry(bucket)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(existing) = slot {
                    for (key, record) in records {
                        existing.insert(key, record);
                    }
                }
            }
            other => {
                state.insert(bucket, other);
            }
        }
    }
}

/// JavaScript-style falsiness for bucket values.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
