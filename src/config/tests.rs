//! Configuration tests
//!
//! These tests serve as compile-time guards to ensure all config fields are
//! properly serialized. When you add a new field, these tests will fail
//! until you update the TOML template and the merge logic.

use super::*;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
/// This catches TOML syntax errors in the hand-written template.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    // Should parse without error
    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// Verify VALUES survive the round-trip (catches mangled serialization)
#[test]
fn test_default_values_survive_roundtrip() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let file: FileConfig = toml::from_str(&toml_str).expect("default config should parse");

    assert_eq!(file.bind_addr, Some(config.bind_addr.to_string()));
    assert_eq!(file.backend_url, Some(config.backend_url.clone()));
    assert_eq!(file.timeout_secs, Some(config.timeout_secs));

    let logging = file.logging.expect("logging section should be present");
    assert_eq!(logging.level, Some(config.logging.level.clone()));
    assert_eq!(logging.file_enabled, Some(config.logging.file_enabled));
    assert_eq!(
        logging.file_rotation,
        Some(config.logging.file_rotation.as_str().to_string())
    );
    assert_eq!(logging.file_prefix, Some(config.logging.file_prefix.clone()));
}

/// Ensures the default template documents the rotation options so users
/// can discover them without reading the source.
#[test]
fn test_default_template_documents_rotation_options() {
    let toml_str = Config::default().to_toml();

    assert!(
        toml_str.contains("# hourly, daily, never"),
        "Rotation options not documented in default template!\nTOML:\n{}",
        toml_str
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Log rotation parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rotation_parse_is_case_insensitive() {
    assert_eq!(LogRotation::from_str("hourly"), LogRotation::Hourly);
    assert_eq!(LogRotation::from_str("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::from_str("Daily"), LogRotation::Daily);
    assert_eq!(LogRotation::from_str("never"), LogRotation::Never);
}

#[test]
fn test_rotation_unknown_value_falls_back_to_daily() {
    assert_eq!(LogRotation::from_str("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::from_str(""), LogRotation::Daily);
}

#[test]
fn test_rotation_as_str_roundtrip() {
    for rotation in [LogRotation::Hourly, LogRotation::Daily, LogRotation::Never] {
        assert_eq!(LogRotation::from_str(rotation.as_str()), rotation);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subconfig merging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_logging_missing_section_uses_defaults() {
    let logging = LoggingConfig::from_file(None);
    let defaults = LoggingConfig::default();

    assert_eq!(logging.level, defaults.level);
    assert_eq!(logging.file_enabled, defaults.file_enabled);
    assert_eq!(logging.file_dir, defaults.file_dir);
    assert_eq!(logging.file_rotation, defaults.file_rotation);
    assert_eq!(logging.file_prefix, defaults.file_prefix);
}

#[test]
fn test_logging_partial_section_merges_with_defaults() {
    let file = FileLogging {
        level: Some("debug".to_string()),
        file_enabled: Some(true),
        file_dir: None,
        file_rotation: Some("hourly".to_string()),
        file_prefix: None,
    };

    let logging = LoggingConfig::from_file(Some(file));
    let defaults = LoggingConfig::default();

    // Set fields come from the file
    assert_eq!(logging.level, "debug");
    assert!(logging.file_enabled);
    assert_eq!(logging.file_rotation, LogRotation::Hourly);

    // Unset fields keep their defaults
    assert_eq!(logging.file_dir, defaults.file_dir);
    assert_eq!(logging.file_prefix, defaults.file_prefix);
}

// ─────────────────────────────────────────────────────────────────────────────
// Config file writing
// ─────────────────────────────────────────────────────────────────────────────

/// The write path behind `config --reset` and `config --update` must create
/// missing parent directories and emit the same template `to_toml` produces.
#[test]
fn test_write_to_creates_parent_dirs_and_roundtrips() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("nested").join("config.toml");

    let config = Config::default();
    config.write_to(&path).expect("write should succeed");

    let written = std::fs::read_to_string(&path).expect("config file should exist");
    assert_eq!(written, config.to_toml());

    let parsed: Result<FileConfig, _> = toml::from_str(&written);
    assert!(
        parsed.is_ok(),
        "Written config should parse back.\nError: {:?}",
        parsed.err()
    );
}
