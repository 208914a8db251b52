//! Error types module
//!
//! This module provides the error types used throughout the Trainia client.
//! All errors are unified under the `AppError` enum which can represent
//! transport, server-reported, validation, timeout, and local storage errors.
//!
//! Errors carry only owned strings so store snapshots can clone them freely;
//! source errors are flattened into the message at the conversion boundary.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like timeouts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error presentation - defines how an error should be surfaced.
/// This trait allows errors to self-describe their user-facing characteristics.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (the operation can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn user_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Failed to decode response: {0}")]
    Deserialize(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Storage(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Deserialize(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
/// Reduces duplication in the ErrorMetadata impl; user_message stays per-variant
/// for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::Transport(_) => (
            "TRANSPORT_ERROR",
            true,
            Some("Check your connection and retry"),
            LogLevel::Error,
        ),
        AppError::Api { .. } => (
            "API_ERROR",
            false,
            Some("Contact support if this error persists"),
            LogLevel::Warn,
        ),
        AppError::Validation(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the submitted values and try again"),
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the resource still exists"),
            LogLevel::Debug,
        ),
        AppError::Timeout(_) => (
            "TIMEOUT",
            true,
            Some("Try again in a moment"),
            LogLevel::Warn,
        ),
        AppError::Deserialize(_) => (
            "DECODE_ERROR",
            false,
            Some("Update the client if this error persists"),
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Server-assigned machine code, when the API provided one.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            AppError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether this error came from a racing timer rather than the operation
    /// itself. Timeout messaging says "try again" instead of implying a
    /// permanent failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout(_))
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn user_message(&self) -> String {
        match self {
            AppError::Transport(_) => "Could not reach the server".to_string(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Validation(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Timeout(_) => "The operation took too long. Try again.".to_string(),
            AppError::Deserialize(_) => "Received an unexpected response".to_string(),
            AppError::Storage(_) => "Could not access local storage".to_string(),
            AppError::Internal(_) => "Something went wrong".to_string(),
        }
    }
}
