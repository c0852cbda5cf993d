//! Directory pickers: how the user grants access to a directory.

use super::contract::DirectoryHandle;
use super::local::LocalDirectory;
use crate::error::ApiError;
use async_trait::async_trait;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Result of asking for a directory.
pub enum PickOutcome {
    Selected(Box<dyn DirectoryHandle>),
    /// The user cancelled or gave no answer.
    Declined,
    /// Directory selection is not available in this environment.
    Unsupported,
}

impl std::fmt::Debug for PickOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickOutcome::Selected(dir) => f.debug_tuple("Selected").field(&dir.name()).finish(),
            PickOutcome::Declined => f.write_str("Declined"),
            PickOutcome::Unsupported => f.write_str("Unsupported"),
        }
    }
}

#[async_trait]
pub trait DirectoryPicker: Send + Sync {
    async fn pick_directory(&self) -> Result<PickOutcome, ApiError>;
}

/// Picks a directory given up front, e.g. on the command line.
#[derive(Debug, Clone)]
pub struct FixedPicker {
    path: PathBuf,
}

impl FixedPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DirectoryPicker for FixedPicker {
    async fn pick_directory(&self) -> Result<PickOutcome, ApiError> {
        let dir = LocalDirectory::open(&self.path)?;
        Ok(PickOutcome::Selected(Box::new(dir)))
    }
}

/// Asks for a directory path on the terminal.
#[derive(Debug, Clone)]
pub struct PromptPicker {
    prompt: String,
}

impl PromptPicker {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Default for PromptPicker {
    fn default() -> Self {
        Self::new("Path to the resources directory (empty to cancel)")
    }
}

#[async_trait]
impl DirectoryPicker for PromptPicker {
    async fn pick_directory(&self) -> Result<PickOutcome, ApiError> {
        if !std::io::stdin().is_terminal() {
            return Ok(PickOutcome::Unsupported);
        }

        let answer = dialoguer::Input::<String>::new()
            .with_prompt(&self.prompt)
            .allow_empty(true)
            .interact_text();

        let answer = match answer {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Directory prompt aborted: {}", e);
                return Ok(PickOutcome::Declined);
            }
        };

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(PickOutcome::Declined);
        }

        let dir = LocalDirectory::open(answer)?;
        Ok(PickOutcome::Selected(Box::new(dir)))
    }
}

/// Environment without directory selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPicker;

#[async_trait]
impl DirectoryPicker for UnsupportedPicker {
    async fn pick_directory(&self) -> Result<PickOutcome, ApiError> {
        Ok(PickOutcome::Unsupported)
    }
}
