// src/logging.rs

use crate::errors::{MentorError, MentorResult};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::Path;

/// Starts the file logger. Stdout belongs to the TUI, so everything goes to
/// a log file next to the persisted transcript. The returned handle must be
/// kept alive for the process lifetime.
pub fn init(log_level: &str, dir: &Path) -> MentorResult<LoggerHandle> {
    Logger::try_with_str(log_level)
        .map_err(|e| MentorError::config_error(format!("invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().directory(dir).basename("mentora"))
        .start()
        .map_err(|e| MentorError::config_error(format!("failed to start logger: {}", e)))
}
