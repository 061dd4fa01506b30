//! Durable key-value storage
//!
//! The configuration list lives in a single slot of a [`KeyValueStore`],
//! overwritten wholesale after every change.
//!
//! - [`FileStore`]: one JSON file per key inside a data directory, written atomically
//! - [`MemoryStore`]: process-local map for tests and throwaway sessions

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Key under which the configuration list is stored unless settings override it
pub const DEFAULT_STORAGE_KEY: &str = "pcConfigs";

/// A string key-value store holding serialized documents
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing has been stored yet
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
