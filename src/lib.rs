//! `rigbook` - Inventory manager for PC build configurations
//!
//! Keeps a list of named PC builds, each made of eight priced components and a
//! target sale price, persisted as one JSON document in a key-value store.
//! `ConfigStore` owns the list and offers create, update, delete, duplicate,
//! export, import and search; `build::metrics` derives totals, margins,
//! completeness and aggregate statistics.
//!
//! # Example
//!
//! ```
//! use rigbook::build::{Component, Configuration, total_price};
//! use rigbook::storage::MemoryStore;
//! use rigbook::store::ConfigStore;
//!
//! let mut store = ConfigStore::load(MemoryStore::new());
//! let mut config = Configuration::new("Gaming rig");
//! config.cpu = Component::new("Ryzen 7 7800X3D", 399.0);
//! store.create(config)?.into_result()?;
//!
//! assert_eq!(store.search("ryzen").len(), 1);
//! assert_eq!(total_price(&store.configs()[0]), 399.0);
//! # Ok::<(), rigbook::RigbookError>(())
//! ```

// Module declarations
pub mod build;
pub mod error;
pub mod settings;
pub mod storage;
pub mod store;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{Result, RigbookError};
