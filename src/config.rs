//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/creatree/creatree.toml`
//! 3. Local config: `<dir>/.creatree.toml` (usually the working directory)
//! 4. Environment variables: `CREATREE_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, DEFAULT_COMMENT_DELIMITER};

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub where_to_create: Option<PathBuf>,
    pub comment_delimiter: Option<char>,
    pub comment_markers: Option<BTreeMap<String, String>>,
}

/// Unified configuration for creatree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory the tree is created in (default: ".")
    pub where_to_create: PathBuf,
    /// Character starting an inline comment in tree text (default: '#')
    pub comment_delimiter: char,
    /// Extra or replaced comment prefixes by file extension; "" disables
    pub comment_markers: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            where_to_create: PathBuf::from("."),
            comment_delimiter: DEFAULT_COMMENT_DELIMITER,
            comment_markers: BTreeMap::new(),
        }
    }
}

/// Get the XDG config directory for creatree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "creatree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("creatree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".creatree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.where_to_create.to_string_lossy().as_ref());
        self.where_to_create = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Marker map: merged key by key, overlay wins
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut comment_markers = self.comment_markers.clone();
        if let Some(markers) = &overlay.comment_markers {
            comment_markers.extend(markers.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self {
            where_to_create: overlay
                .where_to_create
                .clone()
                .unwrap_or_else(|| self.where_to_create.clone()),
            comment_delimiter: overlay.comment_delimiter.unwrap_or(self.comment_delimiter),
            comment_markers,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.creatree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;
        Ok(current)
    }

    /// Apply CREATREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CREATREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("where_to_create") {
            settings.where_to_create = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("comment_delimiter") {
            settings.comment_delimiter = single_char(&val)?;
        }

        Ok(settings)
    }

    /// Reject settings the parser cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.comment_delimiter.is_whitespace() {
            return Err(ApplicationError::Config {
                message: "comment_delimiter must not be whitespace".to_string(),
            });
        }
        if self.where_to_create.as_os_str().is_empty() {
            return Err(ApplicationError::Config {
                message: "where_to_create must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# creatree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/creatree/creatree.toml
#   Local:  ./.creatree.toml
#   Env:    CREATREE_* environment variables

# Where trees are created when --where is not given
# where_to_create = "."

# Character that starts an inline comment in tree text
# comment_delimiter = "#"

# Comment prefix per file extension, added to the built-in table.
# An empty string disables comments for that extension.
[comment_markers]
# txt = "#"
# json = ""
"##
        .to_string()
    }
}

fn single_char(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("comment_delimiter must be a single character, got '{value}'"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_current_dir_and_hash() {
        let settings = Settings::default();
        assert_eq!(settings.where_to_create, PathBuf::from("."));
        assert_eq!(settings.comment_delimiter, '#');
        assert!(settings.comment_markers.is_empty());
    }

    #[test]
    fn given_overlay_when_merging_then_scalars_replace_and_markers_merge() {
        let base = Settings {
            where_to_create: PathBuf::from("/base"),
            comment_delimiter: '#',
            comment_markers: BTreeMap::from([
                ("txt".to_string(), "#".to_string()),
                ("json".to_string(), "//".to_string()),
            ]),
        };
        let overlay = RawSettings {
            where_to_create: None,
            comment_delimiter: Some(';'),
            comment_markers: Some(BTreeMap::from([("json".to_string(), "".to_string())])),
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.where_to_create, PathBuf::from("/base"));
        assert_eq!(result.comment_delimiter, ';');
        assert_eq!(result.comment_markers.get("txt"), Some(&"#".to_string()));
        assert_eq!(result.comment_markers.get("json"), Some(&"".to_string()));
    }

    #[test]
    fn given_tilde_in_target_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            where_to_create: PathBuf::from("~/projects"),
            ..Default::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.where_to_create.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_whitespace_delimiter_when_validating_then_config_error() {
        let settings = Settings {
            comment_delimiter: ' ',
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_multi_char_value_when_parsing_delimiter_then_error() {
        assert_eq!(single_char(";").unwrap(), ';');
        assert!(single_char("//").is_err());
        assert!(single_char("").is_err());
    }

    #[test]
    fn given_settings_when_serializing_then_roundtrips_through_toml() {
        let settings = Settings {
            comment_markers: BTreeMap::from([("txt".to_string(), "#".to_string())]),
            ..Default::default()
        };
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsing_then_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.where_to_create.is_none());
        assert!(raw.comment_markers.unwrap_or_default().is_empty());
    }
}
