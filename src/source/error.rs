//! Errors raised while retrieving merged options

use thiserror::Error;

/// Failure to obtain a complete merged options snapshot
///
/// Every variant means no data was produced; sources never hand out partially
/// populated snapshots.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection or transport failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Endpoint answered with a non-success status
    #[error("Endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// Body was not a valid merged options document
    #[error("Invalid merged options JSON: {message}")]
    InvalidJson { message: String },

    /// Local source could not be read
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network {
            message: message.into(),
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        FetchError::InvalidJson {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FetchError::Status { status: 503 }.to_string(), "Endpoint returned HTTP 503");
        assert_eq!(
            FetchError::Timeout { seconds: 10 }.to_string(),
            "Request timed out after 10 seconds"
        );
        assert!(FetchError::invalid_json("eof").to_string().contains("eof"));
    }
}
