//! Lenient JSON parsing.
//!
//! Both file payloads and persisted snapshots are parsed through
//! [`parse_or_fallback`], which never fails: it hands back either the parsed
//! value or the untouched input.

use serde_json::Value;

/// Outcome of a lenient parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Value(Value),
    Raw(String),
}

impl Parsed {
    pub fn is_value(&self) -> bool {
        matches!(self, Parsed::Value(_))
    }

    /// Parsed value, or the raw input as a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Parsed::Value(value) => value,
            Parsed::Raw(raw) => Value::String(raw),
        }
    }
}

pub fn parse_or_fallback(text: &str) -> Parsed {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Parsed::Value(value),
        Err(e) => {
            tracing::debug!(error = %e, "Payload is not valid JSON, keeping raw text");
            Parsed::Raw(text.to_string())
        }
    }
}
