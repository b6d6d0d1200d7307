//! Edge case and error scenario tests

use readlog_config::{Config, ConfigError, ConfigManager};
use std::fs;
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
    Ok((temp_dir, manager))
}

#[test]
fn test_corrupted_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "this is not valid TOML {{{")?;

    let err = manager.load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
    Ok(())
}

#[test]
fn test_empty_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "")?;

    assert!(matches!(manager.load(), Err(ConfigError::Empty { .. })));
    // init leaves the empty file for the user to deal with
    assert!(!manager.initialize()?);
    Ok(())
}

#[test]
fn test_save_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let nested_path = temp_dir.path().join("a").join("b").join("c");
    let manager = ConfigManager::with_directory(nested_path)?;

    manager.save(&Config::default())?;
    assert!(manager.config_path().exists());
    Ok(())
}

#[test]
fn test_invalid_values_in_file_still_load() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(
        manager.config_path(),
        "[backend]\nbase_url = \"localhost\"\n\n[catalog]\nmax_results = 400\n",
    )?;

    let config = manager.load()?;
    assert_eq!(config.backend.base_url, "localhost");
    assert_eq!(config.validate().unwrap_err().len(), 2);

    // but they cannot be written back
    assert!(matches!(manager.save(&config), Err(ConfigError::Invalid(e)) if e.len() == 2));
    Ok(())
}

#[test]
fn test_unknown_keys_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(
        manager.config_path(),
        "version = 1\n[player]\nvolume = 3\n[store]\nrollback_failed_edits = true\n",
    )?;

    let config = manager.load()?;
    assert!(config.store.rollback_failed_edits);
    Ok(())
}

#[test]
fn test_rejected_save_leaves_file_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    manager.initialize()?;

    let mut config = manager.load()?;
    config.backend.base_url = String::new();
    assert!(matches!(manager.save(&config), Err(ConfigError::Invalid(_))));

    assert_eq!(manager.load()?, Config::default());
    Ok(())
}

#[test]
fn test_rapid_saves() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    for i in 1..=20 {
        let mut config = manager.load()?;
        config.catalog.max_results = i;
        manager.save(&config)?;
    }
    assert_eq!(manager.load()?.catalog.max_results, 20);
    Ok(())
}

#[test]
fn test_concurrent_config_loads() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let config_dir = temp_dir.path().to_path_buf();
    let manager = ConfigManager::with_directory(config_dir.clone())?;
    manager.initialize()?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dir = config_dir.clone();
            std::thread::spawn(move || -> bool {
                match ConfigManager::with_directory(dir) {
                    Ok(mgr) => (0..10).all(|_| mgr.load().is_ok()),
                    Err(_) => false,
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap_or(false));
    }
    Ok(())
}
