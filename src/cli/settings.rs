//! `rigbook settings` arguments

use anyhow::{Context, Result};
use clap::Args;
use rigbook::settings::{Settings, SettingsManager};
use rigbook::storage::FileStore;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Settings changes given on the command line; no flags means show only
#[derive(Debug, Default, Args)]
pub struct SettingsArgs {
    /// Key the configuration list is stored under
    #[arg(long, value_name = "KEY")]
    pub storage_key: Option<String>,
    /// Directory exports are written to
    #[arg(long, value_name = "DIR", conflicts_with = "reset_export_dir")]
    pub export_dir: Option<PathBuf>,
    /// Go back to writing exports to `<data dir>/exports`
    #[arg(long)]
    pub reset_export_dir: bool,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
    /// Number of historical log files kept
    #[arg(long, value_name = "N")]
    pub max_log_files: Option<u8>,
}

impl SettingsArgs {
    /// Apply the requested changes, returning whether anything differs from before
    pub fn apply(self, settings: &mut Settings) -> bool {
        let before = settings.clone();
        if let Some(key) = self.storage_key {
            settings.storage_key = key;
        }
        if let Some(dir) = self.export_dir {
            settings.export_dir = Some(dir);
        }
        if self.reset_export_dir {
            settings.export_dir = None;
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
        if let Some(max) = self.max_log_files {
            settings.max_log_files = max;
        }
        *settings != before
    }
}

/// Apply `args` to a copy of `settings` and write it to `data_dir` if anything changed
///
/// Invalid storage keys and log filters are rejected before anything is written.
pub fn update(args: SettingsArgs, settings: &Settings, data_dir: &Path) -> Result<Settings> {
    let mut updated = settings.clone();
    if !args.apply(&mut updated) {
        return Ok(updated);
    }

    FileStore::new(data_dir).path_for(&updated.storage_key)?;
    EnvFilter::try_new(&updated.log_level)
        .with_context(|| format!("Invalid log level {:?}", updated.log_level))?;

    SettingsManager::save(data_dir, &updated)?;
    info!("Settings updated, changes apply from the next command");
    Ok(updated)
}
