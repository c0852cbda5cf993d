//! Directory and file handle contracts.

use crate::error::ApiError;
use crate::types::FileEntry;
use async_trait::async_trait;

/// Capability over one directory.
#[async_trait]
pub trait DirectoryHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Open an immediate child directory. Fails with
    /// [`ApiError::DirectoryNotFound`] when it does not exist.
    async fn get_directory_handle(&self, name: &str) -> Result<Box<dyn DirectoryHandle>, ApiError>;

    /// List immediate children, kind resolved once here.
    async fn entries(&self) -> Result<Vec<Entry>, ApiError>;
}

/// Capability over one file.
#[async_trait]
pub trait FileHandle: Send + Sync {
    fn name(&self) -> &str;

    async fn get_file(&self) -> Result<FileEntry, ApiError>;
}

/// Directory entry, tagged by kind.
pub enum Entry {
    File(Box<dyn FileHandle>),
    Directory(Box<dyn DirectoryHandle>),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => file.name(),
            Entry::Directory(dir) => dir.name(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::File(file) => f.debug_tuple("File").field(&file.name()).finish(),
            Entry::Directory(dir) => f.debug_tuple("Directory").field(&dir.name()).finish(),
        }
    }
}
