//! Application settings
//!
//! Handles locating the data directory and loading/saving `settings.json`
//! inside it.

pub mod manager;
pub mod models;

pub use manager::SettingsManager;
pub use models::Settings;
