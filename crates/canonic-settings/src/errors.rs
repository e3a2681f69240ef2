//! Error handling for canonic-settings
//!
//! Wraps canonic-core ExError with settings-specific helpers

use std::io;
use std::path::Path;

use canonic_core::errors::{ExError, ExErrorKind};
use serde_json::error::Category;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
///
/// A file that does not exist maps to `NotFound`; every other failure,
/// permissions or a directory in place of the file included, is `Io`.
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ExErrorKind::NotFound,
        _ => ExErrorKind::Io,
    };
    ExError::new(kind)
        .with_op(operation.to_string())
        .with_key(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error from a failed settings document parse
///
/// Malformed JSON is a serialization error; well-formed JSON of the wrong
/// shape (anything but an object) is invalid input.
pub fn parse_error(path: &Path, err: serde_json::Error) -> ExError {
    let kind = match err.classify() {
        Category::Io => ExErrorKind::Io,
        Category::Syntax | Category::Eof => ExErrorKind::Serialization,
        Category::Data => ExErrorKind::InvalidInput,
    };
    ExError::new(kind)
        .with_op("settings_parse")
        .with_key(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a missing setting error
pub fn missing_setting(key: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("setting")
        .with_key(key.to_string())
        .with_message("Not in settings file and no default")
}

/// Create an invalid log level error
pub fn invalid_log_level(value: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("log_level")
        .with_message(format!(
            "Invalid log level '{}', expected one of NOTSET, DEBUG, INFO, WARNING, ERROR, CRITICAL",
            value
        ))
}

/// Create an error for a cache whose lock was poisoned
pub fn cache_poisoned(operation: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(operation.to_string())
        .with_message("Settings cache lock poisoned")
}
