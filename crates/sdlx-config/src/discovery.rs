//! Locating configuration files and schema documents on disk.
//!
//! Configuration comes from every `.sdlx.toml` between the working directory
//! and the filesystem root, then `~/.sdlx.toml`. Schema documents are found
//! by extension in a single directory and named by their file stem, which is
//! how `sdlx init` registers the schemas it finds next to a new config.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".sdlx.toml";

/// File extensions treated as SDL documents, compared case-insensitively.
pub const SCHEMA_EXTENSIONS: &[&str] = &["graphql", "graphqls", "gql"];

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global
/// (`~/.sdlx.toml`) last. A file with `root = true` ends the walk and
/// suppresses the global file.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stops_walk = is_root_config(&candidate);
        configs.push(candidate);
        if stops_walk {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file() && !configs.contains(p)) {
        configs.push(global);
    }
    configs
}

/// Returns the path to the global configuration file (`~/.sdlx.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

/// Lists the schema documents directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched. An unreadable directory yields nothing.
pub fn discover_schema_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_schema_file(path))
        .collect();
    files.sort();
    files
}

/// Returns true if `path` has one of the [`SCHEMA_EXTENSIONS`].
pub fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCHEMA_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Derives the id a schema file is known by: its file stem.
///
/// Returns `None` for paths without a UTF-8 stem.
pub fn schema_id(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
