//! Durable snapshot storage.
//!
//! A synchronous get/set-by-key string store. The record store keeps its
//! whole state under a single key.

use crate::error::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;

pub trait SnapshotStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Snapshot storage backed by a sled database.
pub struct SledSnapshotStorage {
    db: sled::Db,
}

impl SledSnapshotStorage {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Ok(Self::from_db(db))
    }

    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    /// Temporary database removed on drop.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self::from_db(db))
    }
}

impl SnapshotStorage for SledSnapshotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

/// In-process storage, mostly for tests and dry runs.
#[derive(Default)]
pub struct MemorySnapshotStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
