//! Configuration system for sdlx.
//!
//! sdlx uses TOML configuration files named `.sdlx.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sdlx.toml` files
//! found, then loading `~/.sdlx.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{
    CONFIG_FILENAME, SCHEMA_EXTENSIONS, discover_config_files, discover_schema_files,
    global_config_path, is_global_config, is_schema_file, schema_id,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawSchema, RawSearchSettings, RawSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::{resolve_path, resolve_schema_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template, schema_tables};
pub use validate::{ConfigWarning, MAX_FUZZY_DISTANCE, SUPPORTED_STEMMERS};
use validate::validate_config;

/// Top-level merged configuration for sdlx.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Index storage settings.
    pub index: IndexSettings,
    /// Named schemas, sorted by id.
    pub schemas: Vec<SchemaSource>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sdlx.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the configured index root, if one was set.
    pub fn index_root(&self) -> Option<&Path> {
        self.index.directory.as_deref()
    }

    /// Looks up a named schema.
    pub fn schema(&self, id: &str) -> Option<&SchemaSource> {
        self.schemas.iter().find(|s| s.id == id)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// Schemas are not included since their paths are resolved.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            settings: &self.settings,
            search: &self.search,
            index: &self.index,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// General settings for sdlx.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Panels shown side by side while browsing.
    pub visible_panels: usize,
    /// Maximum search results.
    pub default_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visible_panels: 2,
            default_limit: 10,
        }
    }
}

/// Search-related settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Stemming language.
    pub stemmer: String,
    /// Fuzzy matching edit distance; 0 disables fuzzy matching.
    pub fuzzy_distance: u8,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            stemmer: String::from("english"),
            fuzzy_distance: 0,
        }
    }
}

/// Index storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Resolved index root; `None` means the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// A schema registered under an id in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSource {
    /// Identifier, also the schema's index namespace.
    pub id: String,
    /// Resolved absolute path to the SDL file.
    pub path: PathBuf,
    /// Whether this schema was defined in the global `~/.sdlx.toml`.
    pub is_global: bool,
}

/// Borrowed view of the settings sections for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// General settings.
    settings: &'a Settings,
    /// Search-related settings.
    search: &'a SearchSettings,
    /// Index storage settings.
    index: &'a IndexSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.settings.visible_panels, 2);
        assert_eq!(config.settings.default_limit, 10);
        assert_eq!(config.search.stemmer, "english");
        assert_eq!(config.search.fuzzy_distance, 0);
        assert!(config.index_root().is_none());
        assert!(config.schemas.is_empty());
    }

    #[test]
    fn schema_lookup() {
        let config = Config {
            schemas: vec![SchemaSource {
                id: "api".into(),
                path: PathBuf::from("/tmp/api.graphql"),
                is_global: false,
            }],
            ..Default::default()
        };
        assert_eq!(
            config.schema("api").unwrap().path,
            PathBuf::from("/tmp/api.graphql")
        );
        assert!(config.schema("other").is_none());
    }

    #[test]
    fn settings_to_toml() {
        let toml = Config::default().settings_to_toml().unwrap();

        assert!(toml.contains("[settings]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("visible_panels = 2"));
        assert!(toml.contains("default_limit = 10"));
        assert!(toml.contains("stemmer = \"english\""));
        assert!(!toml.contains("directory"));

        let parsed: toml::Value = toml::from_str(&toml).unwrap();
        assert!(parsed.get("settings").is_some());
        assert!(parsed.get("search").is_some());
    }

    #[test]
    fn settings_to_toml_includes_index_directory() {
        let config = Config {
            index: IndexSettings {
                directory: Some(PathBuf::from("/var/sdlx")),
            },
            ..Default::default()
        };
        let toml = config.settings_to_toml().unwrap();
        assert!(toml.contains("directory = \"/var/sdlx\""));
    }
}
