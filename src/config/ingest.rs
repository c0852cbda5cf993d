//! Directory layout expected by the ingestion engine.

use crate::types::{FUNCTION_BUCKET, JSON_BUCKET, ROOT_NAME, SOURCE_DIR};
use serde::{Deserialize, Serialize};

fn default_root_name() -> String {
    ROOT_NAME.to_string()
}

fn default_source_dir() -> String {
    SOURCE_DIR.to_string()
}

fn default_json_bucket() -> String {
    JSON_BUCKET.to_string()
}

fn default_function_bucket() -> String {
    FUNCTION_BUCKET.to_string()
}

/// Ingestion configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Exact name the attached directory must have
    #[serde(default = "default_root_name")]
    pub root_name: String,

    /// Child directory of the root holding the buckets
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Bucket whose records are always keyed by file base name
    #[serde(default = "default_json_bucket")]
    pub json_bucket: String,

    /// Bucket whose records are wrapped as `{ function, id }`
    #[serde(default = "default_function_bucket")]
    pub function_bucket: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            root_name: default_root_name(),
            source_dir: default_source_dir(),
            json_bucket: default_json_bucket(),
            function_bucket: default_function_bucket(),
        }
    }
}
