//! Ingestion Engine
//!
//! Reads an attached `resources` directory two levels deep
//! (`src/<bucket>/<file>`), classifies and parses each file, and assembles
//! the records mapping `bucket -> logical name -> record`. Tracks the newest
//! modification time seen so callers can tell whether anything changed
//! between reads.

pub mod classify;

use crate::config::IngestConfig;
use crate::error::ApiError;
use crate::host::{DirectoryHandle, DirectoryPicker, Entry, PickOutcome};
use crate::types::RecordsByType;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bookkeeping owned by the engine.
#[derive(Default)]
pub struct IngestionState {
    handle: Option<Box<dyn DirectoryHandle>>,
    /// Newest modification time recorded by the previous read (ms).
    last_read: i64,
    /// Running maximum modification time across reads (ms).
    last_modified: i64,
    modified: bool,
}

/// Directory ingestion engine.
pub struct IngestionEngine {
    config: IngestConfig,
    picker: Arc<dyn DirectoryPicker>,
    state: IngestionState,
}

impl IngestionEngine {
    pub fn new(config: IngestConfig, picker: Arc<dyn DirectoryPicker>) -> Self {
        Self {
            config,
            picker,
            state: IngestionState::default(),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// True once the user has granted a directory.
    pub fn is_active(&self) -> bool {
        self.state.handle.is_some()
    }

    /// True if the last read saw a newer modification time than the one before.
    pub fn is_modified(&self) -> bool {
        self.state.modified
    }

    /// Newest modification time recorded by the last read, in ms since epoch.
    pub fn last_read(&self) -> i64 {
        self.state.last_read
    }

    /// Name of the attached directory, if any.
    pub fn attached_name(&self) -> Option<&str> {
        self.state.handle.as_deref().map(|h| h.name())
    }

    /// Attach a directory, discarding all previous bookkeeping.
    pub fn attach(&mut self, handle: Box<dyn DirectoryHandle>) {
        info!(directory = handle.name(), "Attached directory");
        self.state = IngestionState {
            handle: Some(handle),
            ..IngestionState::default()
        };
    }

    pub fn detach(&mut self) {
        self.state.handle = None;
    }

    /// Read the attached directory, asking the picker first if none is attached.
    ///
    /// Returns `Ok(None)` when no directory could be obtained (unsupported
    /// environment or declined prompt). A root with an unexpected name yields
    /// an empty mapping. A missing source directory is an error.
    pub async fn read(&mut self) -> Result<Option<RecordsByType>, ApiError> {
        if self.state.handle.is_none() {
            match self.picker.pick_directory().await? {
                PickOutcome::Selected(handle) => self.attach(handle),
                PickOutcome::Declined => {
                    info!("Directory selection declined");
                    return Ok(None);
                }
                PickOutcome::Unsupported => {
                    warn!("Directory selection is not supported in this environment");
                    return Ok(None);
                }
            }
        }

        let Some(root) = self.state.handle.as_deref() else {
            return Ok(None);
        };

        let mut newest = self.state.last_modified;
        let records = if root.name() == self.config.root_name {
            collect(root, &self.config, &mut newest).await?
        } else {
            warn!(
                directory = root.name(),
                expected = %self.config.root_name,
                "Attached directory has an unexpected name, nothing to read"
            );
            RecordsByType::new()
        };

        self.state.last_modified = newest;
        self.state.modified = self.state.last_read != self.state.last_modified;
        self.state.last_read = self.state.last_modified;

        info!(
            buckets = records.bucket_count(),
            records = records.record_count(),
            modified = self.state.modified,
            "Read directory"
        );
        Ok(Some(records))
    }
}

/// Walk `root/<source_dir>/<bucket>/<file>`.
async fn collect(
    root: &dyn DirectoryHandle,
    config: &IngestConfig,
    newest: &mut i64,
) -> Result<RecordsByType, ApiError> {
    let source = root.get_directory_handle(&config.source_dir).await?;
    let mut records = RecordsByType::new();

    for bucket_entry in source.entries().await? {
        let bucket = bucket_entry.name().to_string();
        records.init_bucket(&bucket);

        let Entry::Directory(bucket_dir) = bucket_entry else {
            debug!(bucket = %bucket, "Bucket is not a directory, skipping");
            continue;
        };

        for entry in bucket_dir.entries().await? {
            let file = match entry {
                Entry::File(file) => file,
                Entry::Directory(dir) => {
                    debug!(bucket = %bucket, entry = dir.name(), "Skipping nested directory");
                    continue;
                }
            };

            let file = file.get_file().await?;
            *newest = (*newest).max(file.last_modified);

            let base = classify::base_name(&file.name);
            let payload = classify::payload(&file);
            let name = classify::logical_name(&bucket, &config.json_bucket, base, &payload);
            let record = classify::into_record(&bucket, &config.function_bucket, &name, payload);

            debug!(bucket = %bucket, file = %file.name, record = %name, "Ingested file");
            records.insert(&bucket, name, record);
        }
    }

    Ok(records)
}
