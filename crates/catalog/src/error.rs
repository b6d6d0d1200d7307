// crates/catalog/src/error.rs
//! Errors from catalog sources

use readlog_network::NetworkError;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog throttled us (HTTP 429)
    #[error("Rate limit exceeded, wait a moment and try again")]
    RateLimited,

    /// Query cannot be sent as given
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Any other transport or decode failure
    #[error("Catalog request failed: {0}")]
    Network(NetworkError),
}

impl From<NetworkError> for CatalogError {
    fn from(err: NetworkError) -> Self {
        if err.status_code() == Some(429) {
            CatalogError::RateLimited
        } else {
            CatalogError::Network(err)
        }
    }
}
