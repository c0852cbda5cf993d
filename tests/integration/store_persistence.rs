use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fsaccess::store::{RecordStore, SledSnapshotStorage, SnapshotStorage};
use serde_json::json;
use tempfile::TempDir;

use crate::integration::support::object;

fn open_store(path: &std::path::Path) -> RecordStore {
    let storage = Arc::new(SledSnapshotStorage::open(path).unwrap());
    let store = RecordStore::new(storage, "records");
    store.init().unwrap();
    store
}

#[test]
fn state_survives_reopening_the_store() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store");

    {
        let store = open_store(&path);
        store
            .change(object(json!({ "json-files": { "a": { "x": 1 } } })))
            .unwrap();
    }

    let store = open_store(&path);
    assert_eq!(store.record("json-files", "a"), Some(json!({ "x": 1 })));
    assert_eq!(store.bucket("js-files"), Some(json!({})));
}

#[test]
fn merges_accumulate_across_sessions() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store");

    {
        let store = open_store(&path);
        store
            .update(object(json!({ "json-files": { "a": 1 }, "flag": true })))
            .unwrap();
    }
    {
        let store = open_store(&path);
        store
            .update(object(json!({ "json-files": { "b": 2 }, "flag": 0 })))
            .unwrap();
    }

    let store = open_store(&path);
    assert_eq!(store.bucket("json-files"), Some(json!({ "a": 1, "b": 2 })));
    assert_eq!(store.bucket("flag"), None);
    assert!(store.bucket_names().contains(&"flag".to_string()));
}

#[test]
fn persisted_snapshot_is_the_full_serialized_state() {
    let storage = Arc::new(SledSnapshotStorage::temporary().unwrap());
    let store = RecordStore::new(Arc::clone(&storage) as Arc<dyn SnapshotStorage>, "records");
    store.init().unwrap();
    store
        .update(object(json!({ "notes": { "readme.txt": "hello" } })))
        .unwrap();

    let raw = storage.get("records").unwrap().unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        persisted,
        json!({
            "js-files": {},
            "json-files": {},
            "notes": { "readme.txt": "hello" }
        })
    );
}

#[test]
fn init_notifies_and_unsubscribed_listeners_stay_quiet() {
    let temp = TempDir::new().unwrap();
    let storage = Arc::new(SledSnapshotStorage::open(&temp.path().join("store")).unwrap());
    let store = RecordStore::new(storage, "records");

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let subscription = store.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.init().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    subscription.unsubscribe();
    store.change(object(json!({ "json-files": {} }))).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.subscriber_count(), 0);
}
