// crates/network/src/error.rs
//! Error types for network operations

use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur during network operations
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport-level failure (connect, TLS, body read, decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Body could not be decoded as the expected JSON shape
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NetworkError {
    /// Returns the HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetworkError::Status { code, .. } => Some(*code),
            NetworkError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true for 404 responses
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns true if the error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(code) if (400..500).contains(&code))
    }

    /// Returns true if the error is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(code) if (500..600).contains(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NetworkError::InvalidUrl("test".to_string());
        assert!(err.to_string().contains("Invalid URL"));

        let err = NetworkError::Status {
            code: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_status_classification() {
        let not_found = NetworkError::Status {
            code: 404,
            reason: "Not Found".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let server = NetworkError::Status {
            code: 500,
            reason: "Internal Server Error".to_string(),
        };
        assert!(server.is_server_error());
        assert!(!server.is_not_found());
    }

    #[test]
    fn test_invalid_url_has_no_status() {
        assert_eq!(NetworkError::InvalidUrl("x".to_string()).status_code(), None);
    }
}
