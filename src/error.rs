//! Error types for `rigbook`
//!
//! This module defines all error types used throughout the crate,
//! providing clear error messages and proper error propagation.
//!
//! Storage and settings variants use `#[source]` to preserve error chains
//! from the underlying filesystem or serialization layer.

use thiserror::Error;
use uuid::Uuid;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `rigbook`
#[derive(Debug, Error)]
pub enum RigbookError {
    /// Reading from or writing to the key-value store failed
    #[error("Storage error: {0}")]
    StorageError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Application settings could not be resolved, loaded or saved
    #[error("Settings error: {0}")]
    SettingsError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The log file or global subscriber could not be set up
    #[error("Logging setup failed: {0}")]
    LoggingError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A configuration with this id is already in the list
    #[error("A configuration with id {0} already exists")]
    DuplicateId(Uuid),

    /// No configuration matches the given id or id prefix
    #[error("Configuration not found: {0}")]
    ConfigurationNotFound(String),

    /// An id prefix matches more than one configuration
    #[error("Ambiguous configuration id: {0}")]
    AmbiguousId(String),

    /// Unknown component slot name
    #[error("Unknown component slot: {0}")]
    InvalidComponentSlot(String),

    /// A `SLOT=NAME@PRICE` part specification could not be parsed
    #[error("Invalid part specification: {0}")]
    InvalidPartSpec(String),
}

/// Result type alias for `rigbook` operations
pub type Result<T> = std::result::Result<T, RigbookError>;

/// Convert an error to a user-friendly message
///
/// The presentation layer shows these instead of the raw `Display` output.
pub fn get_user_friendly_error(error: &RigbookError) -> String {
    match error {
        RigbookError::StorageError(e) => {
            format!(
                "Failed to read or write saved configurations:\n\n{e}\n\n\
                 Your changes are kept for this session but may not persist.\n\
                 Check that the data directory is writable."
            )
        }
        RigbookError::SettingsError(e) => {
            format!(
                "Failed to load or save settings:\n\n{e}\n\n\
                 Default settings will be used."
            )
        }
        RigbookError::LoggingError(e) => {
            format!(
                "Failed to set up logging:\n\n{e}\n\n\
                 Check that the logs folder in the data directory is writable."
            )
        }
        RigbookError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        RigbookError::JsonError(e) => {
            format!(
                "The data is not a valid configuration document:\n\n{e}\n\n\
                 Check that the file was produced by an export."
            )
        }
        RigbookError::DuplicateId(id) => {
            format!(
                "A configuration with id {id} already exists.\n\n\
                 Create the configuration again to get a fresh id."
            )
        }
        RigbookError::ConfigurationNotFound(id) => {
            format!(
                "No configuration matches '{id}'.\n\n\
                 Run `rigbook list` to see the available ids."
            )
        }
        RigbookError::AmbiguousId(id) => {
            format!(
                "'{id}' matches more than one configuration.\n\n\
                 Type more characters of the id."
            )
        }
        RigbookError::InvalidComponentSlot(slot) => {
            format!(
                "Unknown component slot: {slot}\n\n\
                 Valid slots: motherboard, case, power-supply, ram, cpu, ssd, hdd, graphics-card."
            )
        }
        RigbookError::InvalidPartSpec(spec) => {
            format!(
                "Invalid part specification: {spec}\n\n\
                 Use SLOT=NAME@PRICE, SLOT=NAME or SLOT=@PRICE, for example cpu=\"Ryzen 7\"@329.90"
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::nil();
        let error = RigbookError::DuplicateId(id);
        assert_eq!(
            error.to_string(),
            "A configuration with id 00000000-0000-0000-0000-000000000000 already exists"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: RigbookError = io_error.into();
        assert!(matches!(error, RigbookError::IoError(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let error: RigbookError = json_error.into();
        assert!(matches!(error, RigbookError::JsonError(_)));
    }

    #[test]
    fn test_storage_error_preserves_source() {
        use std::error::Error as _;

        let error = RigbookError::StorageError(StringError::new("disk full"));
        assert_eq!(error.to_string(), "Storage error: disk full");
        assert_eq!(error.source().map(ToString::to_string), Some("disk full".to_string()));
    }

    #[test]
    fn test_storage_error_user_friendly() {
        let error = RigbookError::StorageError(StringError::new("disk full"));
        let message = get_user_friendly_error(&error);
        assert!(message.contains("disk full"));
        assert!(message.contains("kept for this session"));
    }

    #[test]
    fn test_logging_error_user_friendly() {
        let error = RigbookError::LoggingError(StringError::new("permission denied"));
        assert_eq!(error.to_string(), "Logging setup failed: permission denied");
        let message = get_user_friendly_error(&error);
        assert!(message.contains("permission denied"));
        assert!(message.contains("logs folder"));
        assert!(!message.contains("Default settings"));
    }

    #[test]
    fn test_not_found_user_friendly() {
        let error = RigbookError::ConfigurationNotFound("abc".to_string());
        let message = get_user_friendly_error(&error);
        assert!(message.contains("'abc'"));
        assert!(message.contains("rigbook list"));
    }

    #[test]
    fn test_invalid_slot_user_friendly() {
        let error = RigbookError::InvalidComponentSlot("floppy".to_string());
        let message = get_user_friendly_error(&error);
        assert!(message.contains("floppy"));
        assert!(message.contains("graphics-card"));
    }
}
