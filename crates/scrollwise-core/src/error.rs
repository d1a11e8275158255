//! Error types for scrollwise.

use thiserror::Error;

/// Result type alias using scrollwise's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scrollwise operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input (missing or malformed field)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transcript retrieval failed (no captions, disabled, fetch fault)
    #[error("Transcript error: {0}")]
    Transcript(String),

    /// Summarization/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("bookmark 42".to_string());
        assert_eq!(err.to_string(), "Not found: bookmark 42");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("text is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: text is required");
    }

    #[test]
    fn test_error_display_transcript() {
        let err = Error::Transcript("captions disabled".to_string());
        assert_eq!(err.to_string(), "Transcript error: captions disabled");
    }

    #[test]
    fn test_error_display_inference() {
        let err = Error::Inference("model timeout".to_string());
        assert_eq!(err.to_string(), "Inference error: model timeout");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("network unreachable".to_string());
        assert_eq!(err.to_string(), "Request error: network unreachable");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("bad port".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad port");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::NotFound("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NotFound"));
    }
}
