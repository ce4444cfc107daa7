//! Error types for endpoint resolution

use std::fmt;

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Errors that can occur while resolving an endpoint
#[derive(Debug)]
pub enum DiscoveryError {
    /// Every candidate was probed and none responded; carries the full
    /// candidate list for diagnosis
    NoReachableEndpoint { candidates: Vec<String> },

    /// Invalid candidate URL format
    InvalidUrl(String),

    /// Configuration error
    Config(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NoReachableEndpoint { candidates } => {
                write!(f, "no reachable endpoint; candidates tried: {}", candidates.join(", "))
            },
            DiscoveryError::InvalidUrl(msg) => write!(f, "invalid candidate URL: {}", msg),
            DiscoveryError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

impl From<url::ParseError> for DiscoveryError {
    fn from(e: url::ParseError) -> Self {
        DiscoveryError::InvalidUrl(e.to_string())
    }
}
