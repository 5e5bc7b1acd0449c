use super::data::Config;
use super::defaults::{DEFAULT_API_URL, DEFAULT_MODELS, DEFAULT_RESPONSE_DELAY_MS};
use super::io::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.api_url(), DEFAULT_API_URL);
    assert_eq!(config.models(), DEFAULT_MODELS.map(String::from).to_vec());
    assert_eq!(
        config.response_delay(),
        Duration::from_millis(DEFAULT_RESPONSE_DELAY_MS)
    );
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn test_save_and_load_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        api_url: Some("http://localhost:8000/api/generate".to_string()),
        models: vec!["gpt-4".to_string(), "deepseek".to_string()],
        response_delay_ms: Some(0),
        request_timeout_secs: Some(30),
        storage_path: Some(PathBuf::from("/tmp/multichat-storage.toml")),
    };
    config.save_to_path(&config_path).expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);
    assert_eq!(loaded.response_delay(), Duration::ZERO);
    assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(
        loaded.storage_path().expect("storage path"),
        PathBuf::from("/tmp/multichat-storage.toml")
    );
}

#[test]
fn blank_api_url_and_zero_timeout_mean_defaults() {
    let config = Config {
        api_url: Some("  ".to_string()),
        request_timeout_secs: Some(0),
        ..Default::default()
    };
    assert_eq!(config.api_url(), DEFAULT_API_URL);
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn invalid_toml_reports_the_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "models = \"not a list\"").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}
