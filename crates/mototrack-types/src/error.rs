use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the yard-tracking client
///
/// Every failure is returned to the immediate caller; nothing is retried
/// or swallowed at this layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Every candidate endpoint was probed and none responded
    #[error("no reachable endpoint; candidates tried: {}", .candidates.join(", "))]
    NoReachableEndpoint { candidates: Vec<String> },

    /// Connection refused, DNS failure, or timeout against a resolved endpoint
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote responded with a non-success status
    #[error("service returned status {status}: {body}")]
    Service { status: u16, body: String },

    /// Validation errors
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// HTTP status carried by the error, if the remote responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_reachable_endpoint_lists_candidates() {
        let err = Error::NoReachableEndpoint {
            candidates: vec![
                "http://10.0.2.2:8080/api/moto".to_string(),
                "http://localhost:8080/api/moto".to_string(),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("http://10.0.2.2:8080/api/moto"));
        assert!(message.contains("http://localhost:8080/api/moto"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::Transport("connection refused".to_string());
        assert!(err.to_string().contains("transport error"));

        let err = Error::Service { status: 500, body: "boom".to_string() };
        assert!(err.to_string().contains("500"));

        let err = Error::Validation("modelo must not be empty".to_string());
        assert!(err.to_string().contains("validation error"));

        let err = Error::Config("no candidates".to_string());
        assert!(err.to_string().contains("configuration error"));
    }

    #[test]
    fn test_status_accessor() {
        let err = Error::Service { status: 404, body: String::new() };
        assert_eq!(err.status(), Some(404));

        let err = Error::Transport("timed out".to_string());
        assert_eq!(err.status(), None);
    }
}
