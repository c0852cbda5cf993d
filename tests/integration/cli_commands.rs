use std::sync::Arc;

use fsaccess::config::FsAccessConfig;
use fsaccess::store::MemorySnapshotStorage;
use fsaccess::tooling::cli::{CliContext, Commands};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::integration::support::{resources_root, write_file};

fn context(workspace: &TempDir) -> CliContext {
    CliContext::with_storage(
        workspace.path().to_path_buf(),
        FsAccessConfig::default(),
        Arc::new(MemorySnapshotStorage::new()),
    )
    .unwrap()
}

#[test]
fn read_then_show_returns_ingested_records() {
    let workspace = TempDir::new().unwrap();
    let resources = TempDir::new().unwrap();
    let root = resources_root(&resources);
    write_file(&root, "src/json-files/a.json", r#"{"a":1}"#);
    write_file(&root, "src/js-files/f1.js", "console.log(1)");

    let cli = context(&workspace);
    let output = cli
        .execute(&Commands::Read {
            dir: Some(root.clone()),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.starts_with("Read 2 records in 2 buckets"));

    let shown = cli
        .execute(&Commands::Show {
            bucket: Some("js-files".to_string()),
            id: Some("f1".to_string()),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(parsed, json!({ "function": "console.log(1)", "id": "f1" }));
}

#[test]
fn read_of_wrong_root_leaves_store_unchanged() {
    let workspace = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    write_file(other.path(), "src/json-files/a.json", "{}");
    let cli = context(&workspace);

    let output = cli
        .execute(&Commands::Read {
            dir: Some(other.path().to_path_buf()),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.starts_with("Read 0 records in 0 buckets"));
    assert_eq!(cli.store().bucket("json-files"), Some(json!({})));
}

#[test]
fn read_without_source_dir_fails() {
    let workspace = TempDir::new().unwrap();
    let resources = TempDir::new().unwrap();
    let root = resources.path().join("resources");
    std::fs::create_dir_all(&root).unwrap();
    let cli = context(&workspace);

    let result = cli.execute(&Commands::Read {
        dir: Some(root),
        format: "text".to_string(),
    });
    assert!(result.is_err());
}

#[test]
fn status_counts_records_per_bucket() {
    let workspace = TempDir::new().unwrap();
    let resources = TempDir::new().unwrap();
    let root = resources_root(&resources);
    write_file(&root, "src/json-files/a.json", "{}");
    write_file(&root, "src/json-files/b.json", "{}");

    let cli = context(&workspace);
    cli.execute(&Commands::Read {
        dir: Some(root),
        format: "json".to_string(),
    })
    .unwrap();

    let status = cli
        .execute(&Commands::Status {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: Value = serde_json::from_str(&status).unwrap();
    let buckets = parsed["buckets"].as_array().unwrap();
    let json_bucket = buckets
        .iter()
        .find(|b| b["bucket"] == json!("json-files"))
        .unwrap();
    assert_eq!(json_bucket["records"], json!(2));
}
