//! Record Store
//!
//! Observable key-value state keyed by `(bucket, id)`. Seeded from durable
//! storage on `init`, updated by shallow per-bucket merges, persisted in full
//! on every update, and broadcast to subscribers on `change`.

pub mod merge;
pub mod persistence;
pub mod subscribers;

pub use persistence::{MemorySnapshotStorage, SledSnapshotStorage, SnapshotStorage};
pub use subscribers::{Listener, Subscribers, Subscription};

use crate::error::{ApiError, StorageError};
use crate::parse::{parse_or_fallback, Parsed};
use crate::types::{FUNCTION_BUCKET, JSON_BUCKET};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Whole store state: `bucket -> bucket value`.
pub type StoreState = Map<String, Value>;

/// State used when nothing usable is persisted.
pub fn default_state() -> StoreState {
    let mut state = Map::new();
    state.insert(FUNCTION_BUCKET.to_string(), Value::Object(Map::new()));
    state.insert(JSON_BUCKET.to_string(), Value::Object(Map::new()));
    state
}

/// Shared, persisted, observable record store.
pub struct RecordStore {
    state: RwLock<StoreState>,
    storage: Arc<dyn SnapshotStorage>,
    key: String,
    subscribers: Subscribers,
}

impl RecordStore {
    /// Create a store holding the default state. Call [`RecordStore::init`]
    /// to load what is persisted.
    pub fn new(storage: Arc<dyn SnapshotStorage>, key: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(default_state()),
            storage,
            key: key.into(),
            subscribers: Subscribers::new(),
        }
    }

    /// Load the persisted snapshot and notify subscribers.
    ///
    /// A missing, unparsable or non-object snapshot falls back to the default
    /// state. Only failures of the storage backend itself are errors.
    pub fn init(&self) -> Result<(), ApiError> {
        let loaded = match self.storage.get(&self.key)? {
            None => {
                tracing::debug!(key = %self.key, "No persisted snapshot, using defaults");
                default_state()
            }
            Some(raw) => match parse_or_fallback(&raw) {
                Parsed::Value(Value::Object(state)) => state,
                Parsed::Value(_) | Parsed::Raw(_) => {
                    tracing::warn!(key = %self.key, "Persisted snapshot is corrupt, using defaults");
                    default_state()
                }
            },
        };

        *self.state.write() = loaded;
        self.subscribers.notify();
        Ok(())
    }

    /// Shallow-merge `data` into the state and persist. Does not notify.
    pub fn update(&self, data: Map<String, Value>) -> Result<(), ApiError> {
        let serialized = {
            let mut state = self.state.write();
            merge::shallow_merge(&mut state, data);
            serde_json::to_string(&*state).map_err(StorageError::from)?
        };
        self.storage.set(&self.key, &serialized)?;
        Ok(())
    }

    /// `update` followed by notifying subscribers.
    pub fn change(&self, data: Map<String, Value>) -> Result<(), ApiError> {
        self.update(data)?;
        self.subscribers.notify();
        Ok(())
    }

    /// Register a listener called after every `change` (and `init`).
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.add(Arc::new(listener))
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// `query(bucket, None)` returns the bucket unless it is absent or falsy;
    /// `query(bucket, Some(id))` returns one record.
    pub fn query(&self, bucket: &str, id: Option<&str>) -> Option<Value> {
        let state = self.state.read();
        let value = state.get(bucket)?;
        match id {
            None if merge::is_falsy(value) => None,
            None => Some(value.clone()),
            Some(id) => value.as_object()?.get(id).cloned(),
        }
    }

    pub fn bucket(&self, bucket: &str) -> Option<Value> {
        self.query(bucket, None)
    }

    pub fn record(&self, bucket: &str, id: &str) -> Option<Value> {
        self.query(bucket, Some(id))
    }

    pub fn bucket_names(&self) -> Vec<String> {
        self.state.read().keys().cloned().collect()
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn memory_store() -> (Arc<MemorySnapshotStorage>, RecordStore) {
        let storage = Arc::new(MemorySnapshotStorage::new());
        let store = RecordStore::new(storage.clone(), "records");
        (storage, store)
    }

    #[test]
    fn update_merges_and_persists() {
        let (storage, store) = memory_store();
        store.update(object(json!({ "A": { "x": 1 } }))).unwrap();
        store.update(object(json!({ "A": { "y": 2 } }))).unwrap();

        assert_eq!(store.query("A", None), Some(json!({ "x": 1, "y": 2 })));
        let persisted: Value =
            serde_json::from_str(&storage.get("records").unwrap().unwrap()).unwrap();
        assert_eq!(persisted["A"], json!({ "x": 1, "y": 2 }));
        assert_eq!(persisted["js-files"], json!({}));
    }

    #[test]
    fn primitive_buckets_are_replaced() {
        let (_, store) = memory_store();
        store.update(object(json!({ "A": "v1" }))).unwrap();
        store.update(object(json!({ "A": "v2" }))).unwrap();
        assert_eq!(store.query("A", None), Some(json!("v2")));
    }

    #[test]
    fn query_paths() {
        let (_, store) = memory_store();
        store
            .update(object(json!({ "A": { "r": { "v": 1 } }, "Z": 0 })))
            .unwrap();

        assert_eq!(store.record("A", "r"), Some(json!({ "v": 1 })));
        assert_eq!(store.record("A", "missing"), None);
        assert_eq!(store.record("missing", "r"), None);
        assert_eq!(store.bucket("missing"), None);
        assert_eq!(store.bucket("Z"), None);
        assert_eq!(store.record("Z", "r"), None);
    }

    #[test]
    fn change_notifies_and_update_does_not() {
        let (_, store) = memory_store();
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let subscription = store.subscribe(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });

        store.update(object(json!({ "A": {} }))).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        store.change(object(json!({ "A": {} }))).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        subscription.unsubscribe();
        store.change(object(json!({ "A": {} }))).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    struct FailingStorage;

    impl SnapshotStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Database("quota exceeded".to_string()))
        }
    }

    #[test]
    fn write_failure_propagates_without_notifying() {
        let store = RecordStore::new(Arc::new(FailingStorage), "records");
        store.init().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let _subscription = store.subscribe(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });

        let result = store.change(object(json!({ "A": { "x": 1 } })));
        assert!(matches!(
            result,
            Err(ApiError::StorageError(StorageError::Database(_)))
        ));
        assert!(matches!(
            store.update(object(json!({ "A": 1 }))),
            Err(ApiError::StorageError(_))
        ));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn init_recovers_from_corrupt_snapshot() {
        let storage = Arc::new(MemorySnapshotStorage::with_value("records", "{not json"));
        let store = RecordStore::new(storage, "records");

        store.init().unwrap();
        assert_eq!(store.snapshot(), default_state());
        assert_eq!(store.bucket("js-files"), Some(json!({})));
    }

    #[test]
    fn init_rejects_non_object_snapshot() {
        let storage = Arc::new(MemorySnapshotStorage::with_value("records", "[1,2]"));
        let store = RecordStore::new(storage, "records");
        store.init().unwrap();
        assert_eq!(store.snapshot(), default_state());
    }

    #[test]
    fn init_loads_persisted_state_and_notifies() {
        let storage = Arc::new(MemorySnapshotStorage::with_value(
            "records",
            r#"{"json-files":{"a":1}}"#,
        ));
        let store = RecordStore::new(storage, "records");
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let _subscription = store.subscribe(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });

        store.init().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(store.record("json-files", "a"), Some(json!(1)));
        assert_eq!(store.bucket_names(), vec!["json-files".to_string()]);
    }
}
