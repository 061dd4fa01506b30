//! Settings data model
//!
//! Application settings persisted next to the configuration store.

use crate::storage::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of historical log files kept (`rigbook.log.1` through `.9`)
pub const DEFAULT_MAX_LOG_FILES: u8 = 9;

/// User-adjustable application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Key the configuration list is stored under
    pub storage_key: String,
    /// Directory exports are written to, `<data dir>/exports` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Number of historical log files kept across sessions
    pub max_log_files: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_dir: None,
            log_level: "info".to_string(),
            max_log_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

impl Settings {
    /// Directory exports go to
    pub fn resolve_export_dir(&self, data_dir: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("exports"))
    }

    /// Directory log files go to
    pub fn log_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("logs")
    }
}
