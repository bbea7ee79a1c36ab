//! Error types for the rtdbsh crate.

use thiserror::Error;

/// Main error type for shell and database operations.
///
/// The `Display` strings double as the shell's user-facing messages, so
/// they are worded exactly the way the REPL prints them.
#[derive(Error, Debug)]
pub enum RtdbError {
    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP request failed with a status code and no usable error body.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// The database rejected an operation with a diagnostic message.
    #[error("{message}")]
    ApiError { status: u16, message: String },

    /// A path expression could not be resolved to an addressable node.
    /// Carries the original expression for display.
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// A command was invoked with the wrong argument shape.
    #[error("usage: {0}")]
    UsageError(&'static str),

    /// `update` was given data that does not decode to an object.
    #[error("data must be a map")]
    DataNotMap,

    /// Startup configuration problem (bad or missing database URL).
    #[error("{0}")]
    ConfigError(String),

    /// Failure writing to the shell's output sink.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for rtdbsh operations.
pub type Result<T> = std::result::Result<T, RtdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display_quotes_expression() {
        let err = RtdbError::InvalidPath("..".to_string());
        assert_eq!(err.to_string(), "Invalid path: \"..\"");
    }

    #[test]
    fn test_usage_display() {
        let err = RtdbError::UsageError("set [path] <data>");
        assert_eq!(err.to_string(), "usage: set [path] <data>");
    }

    #[test]
    fn test_backend_messages_print_verbatim() {
        let err = RtdbError::Custom("something failed".to_string());
        assert_eq!(err.to_string(), "something failed");

        let err = RtdbError::ApiError {
            status: 401,
            message: "Permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "Permission denied");
    }
}
