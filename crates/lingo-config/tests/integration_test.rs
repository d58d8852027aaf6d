//! Integration tests for lingo-config crate.

use lingo_common::test_utils::init_test_logging;
use lingo_config::{Config, ConfigError, ConfigLoader};
use std::path::PathBuf;

#[tokio::test]
async fn test_load_toml_file() {
    init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lingo.toml");
    std::fs::write(
        &path,
        r#"
[i18n]
default_language = "en"
locales_dir = "assets/locales"
preload = ["zh", "en"]

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new(&path).load().await.unwrap();
    assert_eq!(config.i18n.locales_dir, PathBuf::from("assets/locales"));
    assert_eq!(config.i18n.startup_languages().len(), 2);
    assert_eq!(config.logging.format, "json");
}

#[tokio::test]
async fn test_save_then_load_json() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new(dir.path().join("lingo.json"));

    let mut config = Config::default();
    config.i18n.preload = vec!["de".to_string()];
    loader.save(&config).await.unwrap();

    assert!(!dir.path().join("lingo.tmp").exists());
    let loaded = loader.load().await.unwrap();
    assert_eq!(loaded.i18n.preload, vec!["de".to_string()]);
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new(dir.path().join("absent.toml"));

    assert!(matches!(loader.load().await, Err(ConfigError::Io { .. })));
    assert!(loader.load_or_default().await.is_ok());
}

#[tokio::test]
async fn test_invalid_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lingo.toml");
    std::fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

    let err = ConfigLoader::new(&path).load().await.unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}
