//! Application root
//!
//! Owns one ingestion engine and one shared record store, and wires a
//! refresh: ingest the attached directory, then merge the records into the
//! store and notify its subscribers.

use crate::error::ApiError;
use crate::ingest::IngestionEngine;
use crate::store::RecordStore;
use serde::Serialize;
use std::sync::Arc;

/// What a refresh did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// No directory was granted; the store is unchanged.
    NoSelection,
    Ingested {
        buckets: usize,
        records: usize,
        modified: bool,
    },
}

pub struct Application {
    engine: IngestionEngine,
    store: Arc<RecordStore>,
}

impl Application {
    pub fn new(engine: IngestionEngine, store: Arc<RecordStore>) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &IngestionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut IngestionEngine {
        &mut self.engine
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Ingest and publish the result through `RecordStore::change`.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, ApiError> {
        let Some(records) = self.engine.read().await? else {
            return Ok(RefreshOutcome::NoSelection);
        };

        let outcome = RefreshOutcome::Ingested {
            buckets: records.bucket_count(),
            records: records.record_count(),
            modified: self.engine.is_modified(),
        };
        self.store.change(records.into_update())?;
        Ok(outcome)
    }
}
