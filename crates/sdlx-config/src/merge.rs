//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::{collections::HashMap, path::PathBuf};

use crate::{
    Config, ConfigError, IndexSettings, SchemaSource, SearchSettings, Settings,
    discovery::is_global_config,
    parse::{RawConfig, RawIndexSettings, RawSearchSettings, RawSettings},
    resolve::{resolve_path, resolve_schema_path},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory holding the config file; relative paths resolve against it.
    fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Schemas: merged by id, first definition wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let settings = merge_settings(configs);
    let search = merge_search_settings(configs);
    let index = merge_index_settings(configs)?;
    let schemas = merge_schemas(configs)?;
    let config_root = configs.first().map(ParsedConfig::dir);

    Ok(Config {
        settings,
        search,
        index,
        schemas,
        config_root,
    })
}

/// Merges general settings, taking first defined value for each field.
fn merge_settings(configs: &[ParsedConfig]) -> Settings {
    let mut result = Settings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref settings) = parsed.config.settings {
            apply_raw_settings(&mut result, settings);
        }
    }

    result
}

/// Applies raw settings to result, overwriting any present values.
fn apply_raw_settings(result: &mut Settings, raw: &RawSettings) {
    if let Some(v) = raw.visible_panels {
        result.visible_panels = v;
    }
    if let Some(v) = raw.default_limit {
        result.default_limit = v;
    }
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(ref v) = raw.stemmer {
        result.stemmer = v.clone();
    }
    if let Some(v) = raw.fuzzy_distance {
        result.fuzzy_distance = v;
    }
}

/// Merges index settings; the directory resolves against its own config file.
fn merge_index_settings(configs: &[ParsedConfig]) -> Result<IndexSettings, ConfigError> {
    for parsed in configs {
        if let Some(RawIndexSettings {
            directory: Some(ref directory),
        }) = parsed.config.index
        {
            return Ok(IndexSettings {
                directory: Some(resolve_path(directory, &parsed.dir())?),
            });
        }
    }
    Ok(IndexSettings::default())
}

/// Merges schemas from all configs, resolving paths.
///
/// `is_global` is set when the declaring file is `~/.sdlx.toml`.
fn merge_schemas(configs: &[ParsedConfig]) -> Result<Vec<SchemaSource>, ConfigError> {
    let mut seen: HashMap<String, SchemaSource> = HashMap::new();

    for parsed in configs {
        let Some(ref schemas) = parsed.config.schema else {
            continue;
        };

        let config_dir = parsed.dir();
        let is_global = is_global_config(&parsed.path);

        for (id, raw) in schemas {
            if seen.contains_key(id) {
                continue;
            }

            let path = resolve_schema_path(&raw.path, &config_dir)?;
            seen.insert(
                id.clone(),
                SchemaSource {
                    id: id.clone(),
                    path,
                    is_global,
                },
            );
        }
    }

    let mut schemas: Vec<SchemaSource> = seen.into_values().collect();
    schemas.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(schemas)
}
