use std::sync::Arc;

use fsaccess::app::{Application, RefreshOutcome};
use fsaccess::config::IngestConfig;
use fsaccess::host::FixedPicker;
use fsaccess::ingest::IngestionEngine;
use fsaccess::store::{MemorySnapshotStorage, RecordStore};
use fsaccess::types::Record;
use serde_json::json;
use tempfile::TempDir;

use crate::integration::support::{resources_root, write_file};

fn engine(root: &std::path::Path) -> IngestionEngine {
    IngestionEngine::new(IngestConfig::default(), Arc::new(FixedPicker::new(root)))
}

#[tokio::test]
async fn one_bucket_per_subdirectory_and_one_record_per_file() {
    let temp = TempDir::new().unwrap();
    let root = resources_root(&temp);
    write_file(&root, "src/json-files/a.json", r#"{"a":1}"#);
    write_file(&root, "src/json-files/b.json", r#"{"b":2}"#);
    write_file(&root, "src/js-files/f1.js", "console.log(1)");
    write_file(&root, "src/notes/readme.txt", "hello");
    std::fs::create_dir_all(root.join("src/empty")).unwrap();
    std::fs::create_dir_all(root.join("src/notes/nested")).unwrap();

    let records = engine(&root).read().await.unwrap().unwrap();

    let buckets: Vec<&String> = records.0.keys().collect();
    assert_eq!(buckets, vec!["empty", "js-files", "json-files", "notes"]);
    assert_eq!(records.bucket("json-files").unwrap().len(), 2);
    assert_eq!(records.bucket("js-files").unwrap().len(), 1);
    assert_eq!(records.bucket("notes").unwrap().len(), 1);
    assert_eq!(records.bucket("empty").unwrap().len(), 0);
    assert_eq!(
        records.get("notes", "readme.txt"),
        Some(&Record::Plain(json!("hello")))
    );
}

#[tokio::test]
async fn malformed_json_falls_back_to_raw_text() {
    let temp = TempDir::new().unwrap();
    let root = resources_root(&temp);
    write_file(&root, "src/any-bucket/bad.json", "not-json");

    let records = engine(&root).read().await.unwrap().unwrap();
    assert_eq!(
        records.get("any-bucket", "bad"),
        Some(&Record::Plain(json!("not-json")))
    );
}

#[tokio::test]
async fn function_bucket_wraps_payload_with_id() {
    let temp = TempDir::new().unwrap();
    let root = resources_root(&temp);
    write_file(&root, "src/js-files/f1.js", "console.log(1)");

    let records = engine(&root).read().await.unwrap().unwrap();
    let value = serde_json::to_value(records.get("js-files", "f1").unwrap()).unwrap();
    assert_eq!(value, json!({ "function": "console.log(1)", "id": "f1" }));
}

#[tokio::test]
async fn embedded_id_overrides_file_name_outside_json_bucket() {
    let temp = TempDir::new().unwrap();
    let root = resources_root(&temp);
    write_file(&root, "src/things/rec.json", r#"{"id":"custom"}"#);
    write_file(&root, "src/json-files/rec.json", r#"{"id":"custom"}"#);
    write_file(&root, "src/js-files/handler.json", r#"{"id":"h1","body":"x"}"#);

    let records = engine(&root).read().await.unwrap().unwrap();
    assert!(records.get("things", "custom").is_some());
    assert!(records.get("things", "rec").is_none());
    assert!(records.get("json-files", "rec").is_some());
    assert_eq!(
        records.get("js-files", "h1"),
        Some(&Record::Function {
            function: json!({ "id": "h1", "body": "x" }),
            id: "h1".to_string()
        })
    );
}

#[tokio::test]
async fn repeated_reads_are_stable() {
    let temp = TempDir::new().unwrap();
    let root = resources_root(&temp);
    write_file(&root, "src/json-files/a.json", "[1]");

    let mut engine = engine(&root);
    let first = engine.read().await.unwrap().unwrap();
    let second = engine.read().await.unwrap().unwrap();
    assert!(!engine.is_modified());
    assert_eq!(first, second);
}

#[tokio::test]
async fn refresh_publishes_to_store_subscribers() {
    let temp = TempDir::new().unwrap();
    let root = resources_root(&temp);
    write_file(&root, "src/json-files/a.json", r#"{"v":1}"#);

    let store = Arc::new(RecordStore::new(
        Arc::new(MemorySnapshotStorage::new()),
        "records",
    ));
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let observer = Arc::clone(&store);
    let _subscription = store.subscribe(move || {
        sink.lock().push(observer.record("json-files", "a"));
    });

    let mut app = Application::new(engine(&root), Arc::clone(&store));
    let outcome = app.refresh().await.unwrap();

    assert!(matches!(outcome, RefreshOutcome::Ingested { records: 1, .. }));
    assert_eq!(seen.lock().as_slice(), &[Some(json!({ "v": 1 }))]);
}
