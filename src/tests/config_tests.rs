//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{
    get_global_config, init_global_config, ConfigLoader, KapuConfig, SourceConfig, Validate,
};
use crate::data_structures::ScanMode;
use crate::error::config::ConfigError;
use crate::tests::TestFixture;
use crate::vocabulary::MergePolicy;
use std::path::PathBuf;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = KapuConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.matching.scan_mode, ScanMode::Substring);
    assert_eq!(config.vocabulary.merge_policy, MergePolicy::Combined);
    assert!(config.vocabulary.trim_whitespace);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = KapuConfig::default();

    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    config.vocabulary.sources = vec![
        SourceConfig {
            name: "ads".to_string(),
            path: PathBuf::from("ads.txt"),
        },
        SourceConfig {
            name: "ads".to_string(),
            path: PathBuf::from("other.txt"),
        },
    ];
    assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

    config.vocabulary.sources[1].name = " ".to_string();
    assert!(config.validate().is_err());

    config.vocabulary.sources[1].name = "urls".to_string();
    config.vocabulary.sources[1].path = PathBuf::new();
    assert!(config.validate().is_err());

    config.vocabulary.sources[1].path = PathBuf::from("urls.txt");
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a TOML file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .write_file(
            "kapu.toml",
            r#"
            [vocabulary]
            merge_policy = "last_source_wins"
            trim_whitespace = false

            [[vocabulary.sources]]
            name = "ads"
            path = "words/ads.txt"

            [[vocabulary.sources]]
            name = "politics"
            path = "words/politics.txt"

            [matching]
            scan_mode = "cursor_walk"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "KAPU_FILE_TEST").load().unwrap();

    assert_eq!(config.vocabulary.merge_policy, MergePolicy::LastSourceWins);
    assert!(!config.vocabulary.trim_whitespace);
    assert_eq!(config.vocabulary.sources.len(), 2);
    assert_eq!(config.vocabulary.sources[1].name, "politics");
    assert_eq!(config.vocabulary.sources[1].path, PathBuf::from("words/politics.txt"));
    assert_eq!(config.matching.scan_mode, ScanMode::CursorWalk);
    assert_eq!(config.log.level, "debug");
    // Unset values keep their defaults
    assert!(!config.log.json);
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .write_file(
            "kapu.json",
            r#"{ "vocabulary": { "sources": [ { "name": "urls", "path": "urls.txt" } ] } }"#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "KAPU_JSON_TEST").load().unwrap();
    assert_eq!(config.vocabulary.sources, vec![SourceConfig {
        name: "urls".to_string(),
        path: PathBuf::from("urls.txt"),
    }]);
}

/// Test that environment variables override file values.
#[test]
fn test_environment_overrides() {
    let mut fixture = TestFixture::new().unwrap();
    fixture.set_env("KAPU_ENV_TEST__MATCHING__SCAN_MODE", "cursor_walk");
    fixture.set_env("KAPU_ENV_TEST__LOG__LEVEL", "warn");

    let config = ConfigLoader::new(None::<PathBuf>, "KAPU_ENV_TEST").load().unwrap();
    assert_eq!(config.matching.scan_mode, ScanMode::CursorWalk);
    assert_eq!(config.log.level, "warn");
}

/// Test that loader errors are reported with the right variant.
#[test]
fn test_loader_errors() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.missing_file("absent.toml");
    let err = ConfigLoader::new(Some(&missing), "KAPU_ERR_TEST").load().unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(path) if path == missing));

    let unsupported = fixture.write_file("kapu.ini", "level = debug").unwrap();
    let err = ConfigLoader::new(Some(&unsupported), "KAPU_ERR_TEST").load().unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));

    let invalid = fixture.write_file("invalid.toml", "[log]\nlevel = \"loud\"\n").unwrap();
    let err = ConfigLoader::new(Some(&invalid), "KAPU_ERR_TEST").load().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

/// Test that the generated default configuration loads back.
#[test]
fn test_default_config_round_trips_through_toml() {
    let fixture = TestFixture::new().unwrap();
    let toml = KapuConfig::default().to_toml_string().unwrap();
    assert!(toml.contains("scan_mode = \"substring\""));
    assert!(toml.contains("merge_policy = \"combined\""));

    let path = fixture.write_file("generated.toml", toml).unwrap();
    let config = ConfigLoader::new(Some(&path), "KAPU_GEN_TEST").load().unwrap();
    assert!(config.vocabulary.sources.is_empty());
}

#[test]
fn test_global_config_is_set_once() {
    let mut first = KapuConfig::default();
    first.log.level = "debug".to_string();
    assert!(init_global_config(first));

    let mut second = KapuConfig::default();
    second.log.level = "error".to_string();
    assert!(!init_global_config(second));

    let global = get_global_config().unwrap();
    assert_eq!(global.log.level, "debug");
}
