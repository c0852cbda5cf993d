//! Local filesystem handles backed by `tokio::fs`.

use super::contract::{DirectoryHandle, Entry, FileHandle};
use crate::error::ApiError;
use crate::types::FileEntry;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    name: String,
    path: PathBuf,
}

impl LocalDirectory {
    /// Open an existing directory. The handle name is the last component of
    /// the canonical path, so `.` resolves to the real directory name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|e| {
            ApiError::DirectoryNotFound(format!("{}: {}", path.display(), e))
        })?;
        if !canonical.is_dir() {
            return Err(ApiError::DirectoryNotFound(format!(
                "{} is not a directory",
                canonical.display()
            )));
        }
        let name = canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            path: canonical,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DirectoryHandle for LocalDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_directory_handle(&self, name: &str) -> Result<Box<dyn DirectoryHandle>, ApiError> {
        let path = self.path.join(name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Ok(Box::new(LocalDirectory {
                name: name.to_string(),
                path,
            })),
            Ok(_) => Err(ApiError::DirectoryNotFound(format!(
                "{} is not a directory",
                path.display()
            ))),
            Err(e) => Err(ApiError::DirectoryNotFound(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn entries(&self) -> Result<Vec<Entry>, ApiError> {
        let mut reader = tokio::fs::read_dir(&self.path)
            .await
            .map_err(|e| ApiError::FileReadError {
                path: self.path.display().to_string(),
                source: e,
            })?;

        let mut entries = Vec::new();
        loop {
            let next = reader.next_entry().await.map_err(|e| ApiError::FileReadError {
                path: self.path.display().to_string(),
                source: e,
            })?;
            let Some(dir_entry) = next else { break };

            let path = dir_entry.path();
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks; dangling links are dropped.
            let meta = match tokio::fs::metadata(&path).await {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if meta.is_dir() {
                entries.push(Entry::Directory(Box::new(LocalDirectory { name, path })));
            } else {
                entries.push(Entry::File(Box::new(LocalFile { name, path })));
            }
        }

        entries.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(entries)
    }
}

/// File on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    name: String,
    path: PathBuf,
}

impl LocalFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Content type declared for a file name, guessed from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(UNKNOWN_CONTENT_TYPE)
}

#[async_trait]
impl FileHandle for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_file(&self) -> Result<FileEntry, ApiError> {
        let read_error = |e| ApiError::FileReadError {
            path: self.path.display().to_string(),
            source: e,
        };
        let meta = tokio::fs::metadata(&self.path).await.map_err(read_error)?;
        let bytes = tokio::fs::read(&self.path).await.map_err(read_error)?;

        let last_modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        Ok(FileEntry {
            name: self.name.clone(),
            content_type: content_type_for(&self.path).to_string(),
            text: String::from_utf8_lossy(&bytes).into_owned(),
            last_modified,
        })
    }
}
