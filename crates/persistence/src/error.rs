// crates/persistence/src/error.rs
//! Error types for persistence backends

use readlog_network::NetworkError;
use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors raised by a persistence backend
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Write attempted without a live session
    #[error("Not authenticated")]
    Unauthenticated,

    /// HTTP transport or status failure
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Target document does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Backend refused or could not complete the call
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be mapped to a record
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl AdapterError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AdapterError::Unauthenticated)
    }
}
