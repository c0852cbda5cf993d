use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create `<temp>/resources/src` and return the `resources` path.
pub fn resources_root(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("resources");
    fs::create_dir_all(root.join("src")).unwrap();
    root
}

/// Write a file below `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}
