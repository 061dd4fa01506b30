//! Shared test utilities for `rigbook` unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

use crate::build::{Component, ComponentSlot, Configuration};
use crate::error::{Result, RigbookError, StringError};
use crate::storage::KeyValueStore;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify the `RIGBOOK_HOME` environment variable.
static HOME_LOCK: Mutex<()> = Mutex::new(());

/// Reference prices: motherboard, case, PSU, RAM, CPU, SSD, HDD, GPU (total 850).
pub const REFERENCE_PRICES: [f64; 8] = [100.0, 50.0, 40.0, 60.0, 200.0, 70.0, 30.0, 300.0];

/// Create a temporary test directory that is removed when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Configuration with every slot named `"<label> part"` and priced from `prices`
/// in [`ComponentSlot::ALL`] order. Sale target is 0.
pub fn priced_configuration(name: &str, prices: [f64; 8]) -> Configuration {
    let mut config = Configuration::new(name);
    for (slot, price) in ComponentSlot::ALL.into_iter().zip(prices) {
        *config.component_mut(slot) = Component::new(format!("{} part", slot.label()), price);
    }
    config
}

/// Complete configuration with the reference prices and a sale target of 1000.
pub fn complete_configuration(name: &str) -> Configuration {
    let mut config = priced_configuration(name, REFERENCE_PRICES);
    config.sale_target = 1000.0;
    config
}

/// Store whose reads and writes always fail.
#[derive(Debug, Clone, Copy)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(RigbookError::StorageError(StringError::new("storage unavailable")))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(RigbookError::StorageError(StringError::new("storage unavailable")))
    }
}

/// RAII guard that points `RIGBOOK_HOME` at a temp directory for a test scope
/// and restores the original value when dropped.
///
/// `HOME_LOCK` is held for the guard's lifetime so tests touching the variable
/// run one at a time.
pub struct HomeGuard {
    original: Option<String>,
    // Held for the lifetime of the guard
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding HOME_LOCK"
)]
impl HomeGuard {
    /// Set `RIGBOOK_HOME` to the given temp directory.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = HOME_LOCK.lock().unwrap();

        let original = std::env::var("RIGBOOK_HOME").ok();
        // SAFETY: HOME_LOCK serializes every writer of RIGBOOK_HOME and no test
        // spawns threads that read it while the guard is alive.
        unsafe {
            std::env::set_var("RIGBOOK_HOME", temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding HOME_LOCK"
)]
impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: see `HomeGuard::new`; the lock is still held here.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var("RIGBOOK_HOME", original);
            }
        } else {
            unsafe {
                std::env::remove_var("RIGBOOK_HOME");
            }
        }
    }
}
