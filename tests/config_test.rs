//! Integration tests for layered Settings loading.
//!
//! These tests run without a global config (temp directories only),
//! so the local `.creatree.toml` merges onto the compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use creatree::config::{local_config_path, Settings};
use creatree::ApplicationError;

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.where_to_create, PathBuf::from("."));
    assert_eq!(settings.comment_delimiter, '#');
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r##"
where_to_create = "/srv/projects"
comment_delimiter = ";"

[comment_markers]
txt = "#"
"##,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.where_to_create, PathBuf::from("/srv/projects"));
    assert_eq!(settings.comment_delimiter, ';');
    assert_eq!(settings.comment_markers.get("txt"), Some(&"#".to_string()));
}

#[test]
fn given_partial_local_config_when_load_then_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "comment_delimiter = \"%\"\n").unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert_eq!(settings.comment_delimiter, '%');
    assert_eq!(settings.where_to_create, PathBuf::from("."));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "where_to_create = [").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_multi_char_delimiter_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "comment_delimiter = \"//\"\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_template_written_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert_eq!(settings, Settings::default());
}
