//! Config file layer against real files on disk.

use std::fs;

use market_agent_core::config::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use market_agent_core::{Config, ConfigError};

#[test]
fn loads_partial_file_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[api]\nbase_url = \"https://agent.example.com/\"\n").unwrap();

    let config = Config::load_file(&path).unwrap();
    assert_eq!(config.base_url(), "https://agent.example.com");
    assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.log.filter, "info");
    assert!(!config.base_url_is_default());
}

#[test]
fn empty_file_is_all_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();

    let config = Config::load_file(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.base_url(), DEFAULT_API_BASE);
}

#[test]
fn missing_explicit_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    match Config::load(Some(&path)) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_toml_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[api\nbase_url = 3").unwrap();
    assert!(matches!(Config::load_file(&path), Err(ConfigError::Toml(_))));
}

#[test]
fn log_file_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let log = dir.path().join("logs").join("agent.log");
    let content = format!(
        "[log]\nfile = {:?}\nfilter = \"debug\"\n",
        log.display().to_string()
    );
    fs::write(&path, content).unwrap();

    let config = Config::load_file(&path).unwrap();
    assert_eq!(config.log_file(), log);
    assert_eq!(config.log.filter, "debug");
}
