//! Collection store configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};

/// Collection store behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Restore a book to its pre-edit state when saving the edit fails
    pub rollback_failed_edits: bool,
}

impl ConfigSection for StoreConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_failed_edits() {
        assert!(!StoreConfig::default().rollback_failed_edits);
    }
}
