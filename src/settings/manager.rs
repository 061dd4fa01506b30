//! Settings manager for loading and saving application settings
//!
//! Settings live in `<data dir>/settings.json` and are written atomically
//! to prevent corruption.

use crate::error::{Result, RigbookError, StringError};
use crate::settings::models::Settings;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "RIGBOOK_HOME";

const SETTINGS_FILE: &str = "settings.json";

/// Settings manager
pub struct SettingsManager;

impl SettingsManager {
    /// Resolve the data directory
    ///
    /// Order: explicit override, `RIGBOOK_HOME`, the platform data directory
    /// joined with `rigbook`, then `./rigbook`.
    pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(home);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rigbook")
    }

    /// Path of the settings file inside `data_dir`
    pub fn settings_path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    /// Load settings from `data_dir`
    ///
    /// A missing or corrupt settings file yields default settings.
    pub fn load(data_dir: &Path) -> Result<Settings> {
        let settings_path = Self::settings_path(data_dir);

        if !settings_path.exists() {
            info!("Settings file not found, using defaults");
            return Ok(Settings::default());
        }

        let json = std::fs::read_to_string(&settings_path)
            .map_err(|e| RigbookError::SettingsError(Box::new(e)))?;

        match serde_json::from_str(&json) {
            Ok(settings) => {
                info!("Settings loaded from {}", settings_path.display());
                Ok(settings)
            }
            Err(e) => {
                warn!("Failed to parse settings, using defaults: {}", e);
                Ok(Settings::default())
            }
        }
    }

    /// Save settings to `data_dir` with an atomic write
    pub fn save(data_dir: &Path, settings: &Settings) -> Result<()> {
        std::fs::create_dir_all(data_dir).map_err(|e| RigbookError::SettingsError(Box::new(e)))?;
        let settings_path = Self::settings_path(data_dir);
        let parent = settings_path
            .parent()
            .ok_or_else(|| RigbookError::SettingsError(StringError::new("Invalid settings path")))?;

        // Atomic write: write to temp file, then rename
        let temp_path = parent.join(format!("{SETTINGS_FILE}.tmp"));
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&temp_path, json).map_err(|e| RigbookError::SettingsError(Box::new(e)))?;
        std::fs::rename(&temp_path, &settings_path)
            .map_err(|e| RigbookError::SettingsError(Box::new(e)))?;

        info!("Settings saved to {}", settings_path.display());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{HomeGuard, create_test_dir};

    #[test]
    fn test_override_wins() {
        let temp_dir = create_test_dir();
        let _guard = HomeGuard::new(&temp_dir);
        let explicit = Path::new("/explicit/dir");
        assert_eq!(SettingsManager::data_dir(Some(explicit)), explicit);
    }

    #[test]
    fn test_env_var_used_without_override() {
        let temp_dir = create_test_dir();
        let _guard = HomeGuard::new(&temp_dir);
        assert_eq!(SettingsManager::data_dir(None), temp_dir.path());
    }

    #[test]
    fn test_load_missing_settings() {
        let temp_dir = create_test_dir();
        let settings = SettingsManager::load(temp_dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_corrupt_settings_uses_defaults() {
        let temp_dir = create_test_dir();
        std::fs::write(SettingsManager::settings_path(temp_dir.path()), "{ broken").unwrap();
        let settings = SettingsManager::load(temp_dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = create_test_dir();
        let data_dir = temp_dir.path().join("home");
        let settings = Settings {
            storage_key: "builds".to_string(),
            export_dir: Some(PathBuf::from("/tmp/exports")),
            log_level: "debug".to_string(),
            max_log_files: 3,
        };

        SettingsManager::save(&data_dir, &settings).unwrap();
        assert!(!data_dir.join("settings.json.tmp").exists());
        assert_eq!(SettingsManager::load(&data_dir).unwrap(), settings);
    }
}
