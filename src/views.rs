//! Record Views
//!
//! Renders store contents as text or JSON, and binds live views that
//! re-render whenever the store changes.

use crate::error::ApiError;
use crate::ingest::IngestionEngine;
use crate::store::{RecordStore, Subscription};
use crate::types::{FUNCTION_BUCKET, JSON_BUCKET};
use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self, ApiError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::InvalidQuery(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Human heading for a bucket.
pub fn bucket_heading(bucket: &str) -> String {
    match bucket {
        FUNCTION_BUCKET => "JS files".to_string(),
        JSON_BUCKET => "JSON files".to_string(),
        other => other.to_string(),
    }
}

fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// One bucket under its heading.
pub fn render_bucket(store: &RecordStore, bucket: &str, format: OutputFormat) -> String {
    let value = store.bucket(bucket).unwrap_or(Value::Null);
    match format {
        OutputFormat::Json => pretty(&value),
        OutputFormat::Text => format!(
            "{}\n{}\n",
            format_section_heading(&bucket_heading(bucket)),
            pretty(&value)
        ),
    }
}

/// Every bucket in the store.
pub fn render_records(store: &RecordStore, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(&Value::Object(store.snapshot())),
        OutputFormat::Text => store
            .bucket_names()
            .iter()
            .map(|bucket| render_bucket(store, bucket, format))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// A bucket or a single record, `null` when absent.
pub fn render_query(
    store: &RecordStore,
    bucket: &str,
    id: Option<&str>,
    format: OutputFormat,
) -> String {
    let value = store.query(bucket, id).unwrap_or(Value::Null);
    match (format, id) {
        (OutputFormat::Json, _) => pretty(&value),
        (OutputFormat::Text, None) => render_bucket(store, bucket, format),
        (OutputFormat::Text, Some(id)) => format!(
            "{}\n{}\n",
            format_section_heading(&format!("{} / {}", bucket_heading(bucket), id)),
            pretty(&value)
        ),
    }
}

/// Record count for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub bucket: String,
    /// `None` when the bucket holds a primitive instead of records
    pub records: Option<usize>,
}

/// Store and engine summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    pub directory: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    pub buckets: Vec<BucketCount>,
}

impl StoreStatus {
    pub fn collect(store: &RecordStore, engine: Option<&IngestionEngine>) -> Self {
        let snapshot = store.snapshot();
        let buckets = snapshot
            .iter()
            .map(|(bucket, value)| BucketCount {
                bucket: bucket.clone(),
                records: value.as_object().map(|records| records.len()),
            })
            .collect();

        let last_modified = engine
            .map(IngestionEngine::last_read)
            .filter(|ms| *ms > 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|t| t.to_rfc3339());

        Self {
            directory: engine.and_then(|e| e.attached_name().map(str::to_string)),
            active: engine.map(IngestionEngine::is_active).unwrap_or(false),
            last_modified,
            buckets,
        }
    }
}

pub fn render_status(status: &StoreStatus, format: OutputFormat) -> Result<String, ApiError> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(status)
            .map_err(|e| ApiError::InvalidQuery(format!("Failed to serialize status: {}", e)));
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Record Store")));
    match &status.directory {
        Some(dir) => out.push_str(&format!("  Directory: {}\n", dir)),
        None => out.push_str("  Directory: not attached\n"),
    }
    if let Some(ts) = &status.last_modified {
        out.push_str(&format!("  Newest file: {}\n", ts));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Bucket", "Records"]);
    for row in &status.buckets {
        let records = row
            .records
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![row.bucket.clone(), records]);
    }
    out.push_str(&format!("{}\n", table));
    Ok(out)
}

/// View bound to a store; re-renders on every change until unbound.
pub struct LiveView {
    subscription: Subscription,
}

impl LiveView {
    /// Subscribe `render` to `store`. The view keeps only a weak reference,
    /// so it never keeps the store alive.
    pub fn bind<F>(store: &Arc<RecordStore>, render: F) -> Self
    where
        F: Fn(&RecordStore) + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(store);
        let subscription = store.subscribe(move || {
            if let Some(store) = weak.upgrade() {
                render(&store);
            }
        });
        Self { subscription }
    }

    pub fn unbind(&self) {
        self.subscription.unsubscribe();
    }
}
