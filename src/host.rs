//! Directory Capability
//!
//! The host side of ingestion: handles over directories and files, and the
//! pickers that decide which directory the user grants access to.

pub mod contract;
pub mod local;
pub mod picker;

pub use contract::{DirectoryHandle, Entry, FileHandle};
pub use local::{LocalDirectory, LocalFile};
pub use picker::{DirectoryPicker, FixedPicker, PickOutcome, PromptPicker, UnsupportedPicker};
