//! Persistent storage
//!
//! This module handles persistence of settings, the API credential, and
//! saved prompt/output pairs.

use std::path::PathBuf;
use thiserror::Error;

pub mod archive;
pub mod secret;
pub mod settings;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize/deserialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get the application config directory
///
/// Returns the platform-specific configuration directory:
/// - Windows: `C:\Users\{user}\AppData\Roaming\PromptDesk\PromptDesk\config`
/// - macOS: `/Users/{user}/Library/Application Support/com.PromptDesk.PromptDesk`
/// - Linux: `/home/{user}/.config/promptdesk`
pub fn get_config_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "PromptDesk", "PromptDesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            StorageError::ConfigDirError("Could not determine config directory".to_string())
        })
}
