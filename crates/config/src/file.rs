//! Reading and writing `config.toml`
//!
//! A write never leaves a half-written file behind: the TOML goes to a temp
//! file beside the target and is renamed over it. Whatever was there before
//! survives as `config.toml.backup`.

use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Parses the file at `path`, or `None` when there is no file yet
pub(crate) fn read(path: &Path) -> ConfigResult<Option<Config>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::io("read", path)(e)),
    };

    if text.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Validates `config` and replaces the file at `path` with it
pub(crate) fn write(path: &Path, config: &Config) -> ConfigResult<()> {
    config.validate().map_err(ConfigError::Invalid)?;
    let text = toml::to_string_pretty(config)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(ConfigError::io("create", dir))?;

    if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup).map_err(ConfigError::io("back up", path))?;
        log::debug!("Previous config kept at {}", backup.display());
    }

    let mut tmp = NamedTempFile::new_in(dir).map_err(ConfigError::io("create a temp file in", dir))?;
    let written = tmp.write_all(text.as_bytes()).and_then(|()| tmp.flush());
    written.map_err(ConfigError::io("write", tmp.path()))?;
    tmp.persist(path)
        .map_err(|e| ConfigError::io("replace", path)(e.error))?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

pub(crate) fn backup_path(path: &Path) -> PathBuf {
    path.with_extension("toml.backup")
}
