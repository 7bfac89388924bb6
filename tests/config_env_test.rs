//! Environment layer of Settings loading.
//!
//! Separate test binary: the variables are process-wide.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use creatree::config::{local_config_path, Settings};

#[test]
fn given_creatree_env_vars_when_load_then_override_local_config() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "where_to_create = \"/from/file\"\ncomment_delimiter = \"%\"\n",
    )
    .unwrap();
    std::env::set_var("CREATREE_COMMENT_DELIMITER", ";");
    std::env::set_var("CREATREE_WHERE_TO_CREATE", "/from/env");

    // Act
    let result = Settings::load(Some(dir.path()));
    std::env::remove_var("CREATREE_COMMENT_DELIMITER");
    std::env::remove_var("CREATREE_WHERE_TO_CREATE");

    // Assert
    let settings = result.expect("load settings");
    assert_eq!(settings.comment_delimiter, ';');
    assert_eq!(settings.where_to_create, PathBuf::from("/from/env"));
}
