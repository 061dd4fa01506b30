//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `<data dir>/logs/rigbook.log`
//! and rotation on every start, keeping `max_log_files` historical sessions.

use crate::error::{Result, RigbookError, StringError};
use crate::settings::Settings;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PREFIX: &str = "rigbook";
const LOG_SUFFIX: &str = "log";

/// Initialize the logging system
///
/// The filter comes from `RUST_LOG` when set, otherwise from `settings.log_level`.
pub fn init_logging(log_dir: &Path, settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(format!("{LOG_PREFIX}.{LOG_SUFFIX}"));
    rotate_logs_on_startup(&log_path, settings.max_log_files)?;

    // Rotation is handled above, per session, so the appender never rolls on its own
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(log_dir)
        .map_err(|e| RigbookError::LoggingError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| RigbookError::LoggingError(Box::new(e)))?;

    tracing::info!("rigbook v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Shift `rigbook.log` to `rigbook.log.1`, `.1` to `.2` and so on, dropping
/// anything beyond `max_files`. With `max_files == 0` the previous log is deleted.
fn rotate_logs_on_startup(log_path: &Path, max_files: u8) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| RigbookError::LoggingError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| RigbookError::LoggingError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    if max_files == 0 {
        std::fs::remove_file(log_path)?;
        return Ok(());
    }

    let oldest_log = log_dir.join(format!("{log_name}.{max_files}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..max_files).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        if current_log.exists() {
            std::fs::rename(&current_log, log_dir.join(format!("{log_name}.{}", i + 1)))?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    tracing::info!("Log rotation completed on startup");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::fs;

    #[test]
    fn test_rotate_without_existing_log() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("rigbook.log");

        rotate_logs_on_startup(&log_path, 9).unwrap();
        assert!(!temp_dir.path().join("rigbook.log.1").exists());
    }

    #[test]
    fn test_rotate_moves_current_log() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("rigbook.log");
        fs::write(&log_path, "session 1").unwrap();

        rotate_logs_on_startup(&log_path, 9).unwrap();

        assert!(!log_path.exists());
        let rotated = fs::read_to_string(temp_dir.path().join("rigbook.log.1")).unwrap();
        assert_eq!(rotated, "session 1");
    }

    #[test]
    fn test_rotate_respects_max_files() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("rigbook.log");

        for i in 1..=6 {
            fs::write(&log_path, format!("session {i}")).unwrap();
            rotate_logs_on_startup(&log_path, 3).unwrap();
        }

        for i in 1..=3 {
            let content = fs::read_to_string(temp_dir.path().join(format!("rigbook.log.{i}"))).unwrap();
            assert_eq!(content, format!("session {}", 7 - i));
        }
        assert!(!temp_dir.path().join("rigbook.log.4").exists());
    }

    #[test]
    fn test_rotate_rejects_path_without_parent() {
        let result = rotate_logs_on_startup(Path::new("/"), 3);
        assert!(matches!(result, Err(RigbookError::LoggingError(_))));
    }

    #[test]
    fn test_rotate_with_zero_history_discards_log() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("rigbook.log");
        fs::write(&log_path, "old").unwrap();

        rotate_logs_on_startup(&log_path, 0).unwrap();

        assert!(!log_path.exists());
        assert!(!temp_dir.path().join("rigbook.log.1").exists());
    }
}
