//! Configuration templates for `sdlx init`.
//!
//! Templates are stored as valid TOML files and returned as commented-out
//! example configurations. Schema files found next to a new local config are
//! appended as live `[schema.<id>]` tables.

use std::path::PathBuf;

use crate::discovery::schema_id;

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Renders a `[schema.<id>]` table for each file, with a `./`-relative path.
///
/// Ids come from file stems and are quoted when they are not bare TOML keys.
/// Files without a UTF-8 name are skipped.
pub fn schema_tables(files: &[PathBuf]) -> String {
    files
        .iter()
        .filter_map(|path| {
            let id = schema_id(path)?;
            let name = path.file_name()?.to_str()?;
            Some(format!(
                "\n[schema.{}]\npath = {}\n",
                toml_key(&id),
                toml::Value::String(format!("./{name}"))
            ))
        })
        .collect()
}

/// Writes `key` bare when TOML allows it, quoted otherwise.
fn toml_key(key: &str) -> String {
    if key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        key.to_string()
    } else {
        toml::Value::String(key.to_string()).to_string()
    }
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}
