//! Core types shared by the ingestion engine and the record store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Bucket holding plain data records; names are always the file base name.
pub const JSON_BUCKET: &str = "json-files";

/// Bucket holding function-like records wrapped as `{ function, id }`.
pub const FUNCTION_BUCKET: &str = "js-files";

/// Name the attached root directory must carry.
pub const ROOT_NAME: &str = "resources";

/// Child of the root that holds the buckets.
pub const SOURCE_DIR: &str = "src";

/// One file read during an ingestion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    /// Declared MIME type, e.g. `application/json`.
    pub content_type: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub last_modified: i64,
}

/// Value derived from one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Function { function: Value, id: String },
    Plain(Value),
}

impl Record {
    pub fn into_value(self) -> Value {
        match self {
            Record::Plain(value) => value,
            Record::Function { function, id } => {
                let mut object = Map::new();
                object.insert("function".to_string(), function);
                object.insert("id".to_string(), Value::String(id));
                Value::Object(object)
            }
        }
    }
}

/// `bucket -> logical name -> record`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordsByType(pub BTreeMap<String, BTreeMap<String, Record>>);

impl RecordsByType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a bucket exists, empty if it was not seen before.
    pub fn init_bucket(&mut self, bucket: &str) {
        self.0.entry(bucket.to_string()).or_default();
    }

    pub fn insert(&mut self, bucket: &str, name: String, record: Record) {
        self.0
            .entry(bucket.to_string())
            .or_default()
            .insert(name, record);
    }

    pub fn bucket(&self, bucket: &str) -> Option<&BTreeMap<String, Record>> {
        self.0.get(bucket)
    }

    pub fn get(&self, bucket: &str, name: &str) -> Option<&Record> {
        self.0.get(bucket).and_then(|records| records.get(name))
    }

    pub fn bucket_count(&self) -> usize {
        self.0.len()
    }

    pub fn record_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into the JSON object accepted by `RecordStore::update`.
    pub fn into_update(self) -> Map<String, Value> {
        self.0
            .into_iter()
            .map(|(bucket, records)| {
                let records: Map<String, Value> = records
                    .into_iter()
                    .map(|(name, record)| (name, record.into_value()))
                    .collect();
                (bucket, Value::Object(records))
            })
            .collect()
    }
}
