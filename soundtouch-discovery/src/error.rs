//! Error types for the discovery system.

use std::fmt;

/// Error type for discovery operations.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Network-related errors (socket creation, multicast send, HTTP fetch)
    NetworkError(String),
    /// Parsing errors (device description XML)
    ParseError(String),
    /// Responder turned out not to be a SoundTouch speaker
    InvalidDevice(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DiscoveryError::InvalidDevice(msg) => write!(f, "Invalid device: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
