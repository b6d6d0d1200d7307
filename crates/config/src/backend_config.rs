//! Persistence backend configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Where the book collection is persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Root of the REST API serving `/books`
    pub base_url: String,

    /// Whole-request timeout in seconds; 0 waits indefinitely
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            request_timeout_secs: 0,
        }
    }
}

impl ConfigSection for BackendConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::http_url(&self.base_url, "backend.base_url"),
            Validator::in_range(self.request_timeout_secs, 0, 600, "backend.request_timeout_secs"),
        ])
    }
}
