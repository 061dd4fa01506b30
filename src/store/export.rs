//! Single-configuration export and import
//!
//! An export is a pretty-printed JSON document of one [`Configuration`],
//! labelled `<name>.json`. Producing the bytes is pure; only
//! [`ExportFile::write_to_dir`] touches the filesystem.

use crate::build::Configuration;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// File name used when a configuration's name has no usable characters
const FALLBACK_STEM: &str = "configuration";

/// A downloadable JSON document for one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested file name, `<configuration name>.json`
    pub file_name: String,
    /// Pretty-printed JSON
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Serialize `config` into an export document
    pub fn from_configuration(config: &Configuration) -> Result<Self> {
        let bytes = serde_json::to_vec_pretty(config)?;
        Ok(Self {
            file_name: export_file_name(&config.name),
            bytes,
        })
    }

    /// Write the document into `dir`, creating the directory if needed
    ///
    /// Returns the path written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!("Exported configuration to {}", path.display());
        Ok(path)
    }
}

/// `<name>.json` with characters that are not allowed in file names replaced by `_`
pub fn export_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        format!("{FALLBACK_STEM}.json")
    } else {
        format!("{stem}.json")
    }
}

/// Parse an exported document back into a configuration
///
/// The `id` field may be missing since importing assigns a fresh id anyway;
/// such documents come back with the nil id.
pub fn parse_exported(bytes: &[u8]) -> Result<Configuration> {
    let mut document: serde_json::Value = serde_json::from_slice(bytes)?;
    if let Some(fields) = document.as_object_mut() {
        fields
            .entry("id")
            .or_insert_with(|| serde_json::Value::String(Uuid::nil().to_string()));
    }
    Ok(serde_json::from_value(document)?)
}
