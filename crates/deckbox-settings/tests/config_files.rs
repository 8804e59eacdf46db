//! Config round-trips through real files

use deckbox_settings::{Config, OutputFormat, SettingsError};
use tempfile::tempdir;

fn custom_config() -> Config {
    let mut config = Config::new();
    config.deck_box.num = 2;
    config.deck_box.deckheight = 40.0;
    config.deck_box.finger_joint.play = 0.05;
    config.output.format = OutputFormat::Gcode;
    config.output.gcode.laser_passes = 5;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = custom_config();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = custom_config();
    config.save_to_file(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"format\": \"gcode\""));
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deckbox").join("config.toml");

    Config::new().save_to_file(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    assert!(matches!(
        Config::new().save_to_file(&path),
        Err(SettingsError::UnsupportedFormat(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_invalid_file_is_not_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[deck_box]\nnum = 0\n").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::BoxParameters(_))
    ));
}

#[test]
fn test_malformed_toml_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[deck_box\nnum = 2\n").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::IoError(_))
    ));
}
