//! Locating, loading and initializing the config file

use crate::error::join;
use crate::{file, Config, ConfigError, ConfigResult, LogLevel, CONFIG_VERSION};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "config.toml";

/// Owns the path of one `config.toml`
///
/// By default that is `readlog/config.toml` under the platform config
/// directory (`~/.config` on Linux, `~/Library/Application Support` on
/// macOS, `%APPDATA%` on Windows).
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "readlog").ok_or(ConfigError::NoConfigDir)?;
        Self::with_directory(dirs.config_dir().to_path_buf())
    }

    /// Uses `dir/config.toml`; `dir` need not exist yet
    pub fn with_directory(dir: PathBuf) -> ConfigResult<Self> {
        Ok(Self {
            path: dir.join(FILE_NAME),
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, falling back to defaults when there is none
    ///
    /// Out-of-range values are logged and kept so the user can see and fix
    /// them; only [`save`](Self::save) rejects them.
    pub fn load(&self) -> ConfigResult<Config> {
        let Some(config) = file::read(&self.path)? else {
            log::info!("No config at {}, using defaults", self.path.display());
            return Ok(Config::default());
        };

        if config.version > CONFIG_VERSION {
            log::warn!(
                "{} is format version {}, this build knows {}",
                self.path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        if let Err(errors) = config.validate() {
            log::warn!("{}: {}", self.path.display(), join(&errors));
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        file::write(&self.path, config)
    }

    /// Writes a default file unless one is already there
    ///
    /// Returns whether a file was written.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.path.exists() {
            log::debug!("Keeping existing {}", self.path.display());
            return Ok(false);
        }
        self.save(&Config::default())?;
        Ok(true)
    }

    /// [`load`](Self::load), then `READLOG_*` variables on top
    ///
    /// | variable | field |
    /// |---|---|
    /// | `READLOG_BACKEND_BASE_URL` | `backend.base_url` |
    /// | `READLOG_CATALOG_BASE_URL` | `catalog.base_url` |
    /// | `READLOG_APP_LOG_LEVEL` | `app.log_level` |
    /// | `READLOG_STORE_ROLLBACK_FAILED_EDITS` | `store.rollback_failed_edits` |
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        if let Err(errors) = config.validate() {
            log::warn!("After READLOG_* overrides: {}", join(&errors));
        }
        Ok(config)
    }
}

fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("READLOG_BACKEND_BASE_URL") {
        config.backend.base_url = url;
    }
    if let Some(url) = var("READLOG_CATALOG_BASE_URL") {
        config.catalog.base_url = url;
    }

    if let Some(level) = var("READLOG_APP_LOG_LEVEL") {
        match level.parse::<LogLevel>() {
            Ok(level) => config.app.log_level = level,
            Err(e) => log::warn!("Ignoring READLOG_APP_LOG_LEVEL: {}", e),
        }
    }

    if let Some(flag) = var("READLOG_STORE_ROLLBACK_FAILED_EDITS") {
        match parse_flag(&flag) {
            Some(on) => config.store.rollback_failed_edits = on,
            None => log::warn!("Ignoring READLOG_STORE_ROLLBACK_FAILED_EDITS={}", flag),
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(dir: &TempDir) -> ConfigManager {
        ConfigManager::with_directory(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_default_location_ends_in_readlog() {
        if let Ok(manager) = ConfigManager::new() {
            let path = manager.config_path();
            assert!(path.ends_with("config.toml"));
            assert!(path.parent().is_some_and(|p| p.ends_with("readlog")));
        }
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(manager_in(&dir).load().unwrap(), Config::default());
    }

    #[test]
    fn test_initialize_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        assert!(manager.initialize().unwrap());
        assert_eq!(manager.load().unwrap(), Config::default());

        let mut edited = Config::default();
        edited.catalog.max_results = 35;
        manager.save(&edited).unwrap();

        assert!(!manager.initialize().unwrap());
        assert_eq!(manager.load().unwrap().catalog.max_results, 35);
    }

    #[test]
    fn test_initialize_surfaces_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let manager = ConfigManager::with_directory(blocker).unwrap();
        assert!(matches!(manager.initialize(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_env_overrides_applied() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| match key {
            "READLOG_BACKEND_BASE_URL" => Some("http://books.internal:9000".to_string()),
            "READLOG_APP_LOG_LEVEL" => Some("debug".to_string()),
            "READLOG_STORE_ROLLBACK_FAILED_EDITS" => Some("yes".to_string()),
            _ => None,
        });

        assert_eq!(config.backend.base_url, "http://books.internal:9000");
        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert!(config.store.rollback_failed_edits);
        assert_eq!(config.catalog, Config::default().catalog);
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| match key {
            "READLOG_APP_LOG_LEVEL" => Some("shouty".to_string()),
            "READLOG_STORE_ROLLBACK_FAILED_EDITS" => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_load_with_env_overrides_from_process() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);
        manager.initialize().unwrap();

        std::env::set_var("READLOG_CATALOG_BASE_URL", "http://catalog.test/v1");
        let config = manager.load_with_env_overrides();
        std::env::remove_var("READLOG_CATALOG_BASE_URL");

        assert_eq!(config.unwrap().catalog.base_url, "http://catalog.test/v1");
    }
}
