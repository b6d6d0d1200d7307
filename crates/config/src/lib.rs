//! ReadLog configuration system
//!
//! Configuration lives in a single TOML file split into sections, each a
//! type implementing [`ConfigSection`].
//!
//! - **Graceful degradation**: a missing file means defaults; invalid values
//!   warn on load but are refused on save
//! - **Atomic writes**: the file is replaced via a temp file and rename
//! - **Env overrides**: `READLOG_<SECTION>_<FIELD>` variables win over the file
//!
//! # Example
//!
//! ```rust,no_run
//! use readlog_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Backend: {}", config.backend.base_url);
//! ```

mod error;
mod manager;
mod file;
mod validation;

// Config sections
pub mod app_config;
mod backend_config;
mod catalog_config;
mod store_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::ConfigManager;
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use backend_config::BackendConfig;
pub use catalog_config::CatalogConfig;
pub use store_config::StoreConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    pub app: AppConfig,

    /// Book persistence backend
    pub backend: BackendConfig,

    /// External catalog search
    pub catalog: CatalogConfig,

    pub store: StoreConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.backend.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.catalog.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.store.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            backend: BackendConfig::default(),
            catalog: CatalogConfig::default(),
            store: StoreConfig::default(),
        }
    }
}
