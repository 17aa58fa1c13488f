use std::fs;

use purse_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_usable_fields() {
    let cfg = Config::default();

    assert_eq!(cfg.history_capacity, 50);
    assert!(!cfg.log_filter.is_empty());
    assert!(cfg.data_dir.is_none());
    assert!(cfg.resolve_data_dir().ends_with("data"));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, Config::default());
    assert!(!manager.config_path().exists());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.history_capacity = 10;
    cfg.data_dir = Some(dir.path().join("budget"));

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.history_capacity, 10);
    assert_eq!(loaded.resolve_data_dir(), dir.path().join("budget"));
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("nested").join("config.json"));

    manager.save(&Config::default()).expect("save config");
    assert!(manager.config_path().exists());
}

#[test]
fn invalid_files_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    fs::write(manager.config_path(), "{ broken").expect("write config");
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));

    fs::write(manager.config_path(), r#"{ "history_capacity": 0 }"#).expect("write config");
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));
}
