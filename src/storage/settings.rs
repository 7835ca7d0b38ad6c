//! Settings storage
//!
//! Manages persistence of user preferences: folder paths, the selected
//! model, and the dark-mode flag. The API key is kept out of this file and
//! lives in the platform secret store instead (see `storage::secret`).

use crate::storage::{get_config_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Models the user can pick from
pub const AVAILABLE_MODELS: &[&str] = &["gpt-3.5-turbo", "gpt-4"];

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// User preferences, stored as a flat JSON object
///
/// Every field carries a serde default so a settings file with missing keys
/// still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Folder where prompt files are written
    #[serde(default)]
    pub prompts_folder: PathBuf,
    /// Folder where output files are written
    #[serde(default)]
    pub outputs_folder: PathBuf,
    /// UI color theme toggle
    #[serde(default)]
    pub dark_mode: bool,
    /// Selected model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompts_folder: PathBuf::new(),
            outputs_folder: PathBuf::new(),
            dark_mode: false,
            model: default_model(),
        }
    }
}

impl Settings {
    /// Coerce out-of-range values back to usable ones
    pub fn validate(&mut self) {
        if !AVAILABLE_MODELS.contains(&self.model.as_str()) {
            self.model = default_model();
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_config_dir()?.join("config.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> Settings {
    match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

fn load_settings_from(path: &Path) -> Result<Settings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(Settings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: Settings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk, overwriting the whole file
pub fn save_settings(settings: &Settings) -> Result<(), StorageError> {
    save_settings_to(&get_settings_path()?, settings)
}

fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.prompts_folder, PathBuf::new());
        assert_eq!(settings.outputs_folder, PathBuf::new());
        assert!(!settings.dark_mode);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"dark_mode": true}"#).unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.prompts_folder, PathBuf::new());
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_unknown_model_is_coerced() {
        let mut settings = Settings {
            model: "gpt-99-ultra".to_string(),
            ..Settings::default()
        };
        settings.validate();
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_settings_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let settings = Settings {
            prompts_folder: PathBuf::from("/tmp/prompts"),
            outputs_folder: PathBuf::from("/tmp/outputs"),
            dark_mode: true,
            model: "gpt-4".to_string(),
        };

        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_json_key_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        for key in ["prompts_folder", "outputs_folder", "dark_mode", "model"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
