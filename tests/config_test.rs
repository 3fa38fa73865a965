//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test an explicit config file merged over defaults,
//! with BTXML_* environment variables on top.

use std::fs;

use tempfile::TempDir;

use btxml::application::ApplicationError;
use btxml::config::{OutputFormat, Settings};
use btxml::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("btxml.toml");
    fs::write(
        &path,
        r#"
format = "toml"
list_actions = true

[lint]
deny_warnings = true
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.format, OutputFormat::Toml);
    assert!(settings.list_actions);
    assert!(settings.lint.deny_warnings);
    // Not specified: default kept
    assert!(settings.show_parameters);
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "format = [not toml").unwrap();

    // Act
    let result = Settings::load(Some(&path));

    // Assert
    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("broken.toml")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_env_overrides_when_load_then_take_precedence_over_file() {
    // Arrange: file says json, env says toml
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("btxml.toml");
    fs::write(&path, "format = \"json\"\n").unwrap();
    std::env::set_var("BTXML_FORMAT", "toml");
    std::env::set_var("BTXML_LINT__DENY_WARNINGS", "true");

    // Act
    let result = Settings::load(Some(&path));
    std::env::remove_var("BTXML_FORMAT");
    std::env::remove_var("BTXML_LINT__DENY_WARNINGS");

    // Assert
    let settings = result.expect("load settings");
    assert_eq!(settings.format, OutputFormat::Toml);
    assert!(settings.lint.deny_warnings);
}

#[test]
fn given_settings_when_serializing_then_round_trips() {
    // Arrange
    let mut settings = Settings::default();
    settings.format = OutputFormat::Toml;
    settings.list_actions = true;
    settings.lint.deny_warnings = true;

    // Act
    let toml = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&toml).expect("effective config parses");

    // Assert
    assert!(toml.contains("format = \"toml\""));
    assert!(toml.contains("[lint]"));
    assert_eq!(parsed, settings);
}
