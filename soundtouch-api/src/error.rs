//! Error types for SoundTouch API communication.

use thiserror::Error;

/// Errors that can occur while talking to a speaker's WebServer API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect timeout, unreachable device, broken
    /// response body)
    #[error("Network error: {0}")]
    Network(String),

    /// The device answered, but the response XML could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The device rejected the request with a non-success HTTP status
    #[error("Device rejected request: HTTP {0}")]
    Status(u16),
}

/// Type alias for results that can return an ApiError.
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<ureq::Error> for ApiError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, _) => ApiError::Status(code),
            ureq::Error::Transport(t) => ApiError::Network(t.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(error: std::io::Error) -> Self {
        ApiError::Network(error.to_string())
    }
}
