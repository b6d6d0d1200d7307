//! External catalog configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Catalog search settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root of the volumes API
    pub base_url: String,

    /// Hits requested per search (the API caps this at 40)
    pub max_results: usize,

    /// Quiet period before a typed query is sent
    pub debounce_ms: u64,

    /// Whole-request timeout in seconds; 0 waits indefinitely
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/books/v1".to_string(),
            max_results: 20,
            debounce_ms: 300,
            request_timeout_secs: 10,
        }
    }
}

impl ConfigSection for CatalogConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::http_url(&self.base_url, "catalog.base_url"),
            Validator::in_range(self.max_results, 1, 40, "catalog.max_results"),
            Validator::in_range(self.debounce_ms, 0, 5000, "catalog.debounce_ms"),
            Validator::in_range(self.request_timeout_secs, 0, 600, "catalog.request_timeout_secs"),
        ])
    }
}
