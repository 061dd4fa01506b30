//! File-backed key-value store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go through a temporary file in
//! the same directory that is then persisted over the target, so a crash never
//! leaves a half-written document behind.

use crate::error::{Result, RigbookError, StringError};
use crate::storage::KeyValueStore;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Key-value store keeping one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the store's files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(RigbookError::StorageError(StringError::new(format!(
                "Invalid storage key: {key:?}"
            ))));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                debug!("Read {} bytes from {}", contents.len(), path.display());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RigbookError::StorageError(Box::new(e))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| RigbookError::StorageError(Box::new(e)))?;

        // Atomic write: write to temp file, then rename
        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| RigbookError::StorageError(Box::new(e)))?;
        temp.write_all(value.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| RigbookError::StorageError(Box::new(e)))?;
        temp.persist(&path)
            .map_err(|e| RigbookError::StorageError(Box::new(e.error)))?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
