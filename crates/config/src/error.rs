//! Config failures

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory to hang `readlog/config.toml` off
    #[error("No user config directory on this platform; pass --config <dir>")]
    NoConfigDir,

    #[error("Could not {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but holds nothing
    #[error("{path} is empty; delete it or run `readlog config init`")]
    Empty { path: PathBuf },

    #[error("{path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not encode config as TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Refused to write values that would not validate
    #[error("Invalid config: {}", join(.0))]
    Invalid(Vec<ValidationError>),
}

impl ConfigError {
    pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| ConfigError::Io {
            action,
            path,
            source,
        }
    }
}

/// One bad field, named by its dotted path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {problem}")]
pub struct ValidationError {
    /// e.g. `backend.base_url`
    pub field: String,
    pub problem: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }

    /// Appends the rejected value to the problem text
    pub fn got(mut self, value: impl std::fmt::Display) -> Self {
        self.problem = format!("{} (got {})", self.problem, value);
        self
    }
}

pub(crate) fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
