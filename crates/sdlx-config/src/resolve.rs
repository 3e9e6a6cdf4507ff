//! Path resolution for config values.
//!
//! Relative paths are resolved against the directory of the config file that
//! declared them, and a leading `~` expands to the home directory.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a schema path to an absolute, canonical file path.
///
/// The file must exist.
pub fn resolve_schema_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = resolve_path(path, config_dir)?;

    let canonical = absolute
        .canonicalize()
        .map_err(|source| ConfigError::PathResolution {
            path: absolute.clone(),
            source,
        })?;

    if !canonical.is_file() {
        return Err(ConfigError::SchemaPathNotFile { path: canonical });
    }

    Ok(canonical)
}

/// Resolves a path against `config_dir` without touching the filesystem.
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    Ok(if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    })
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn relative_schema_path() {
        let test_dir = TestDir::new();
        let schema = test_dir.schema("schemas/api.graphql", "type Query { a: Int }");

        let resolved = resolve_schema_path("./schemas/api.graphql", test_dir.path()).unwrap();
        assert_eq!(resolved, schema.canonicalize().unwrap());

        let resolved = resolve_schema_path("schemas/api.graphql", test_dir.path()).unwrap();
        assert_eq!(resolved, schema.canonicalize().unwrap());
    }

    #[test]
    fn parent_relative_schema_path() {
        let test_dir = TestDir::new();
        let schema = test_dir.schema("shared/api.graphql", "scalar A");
        let project = test_dir.dir("project");

        let resolved = resolve_schema_path("../shared/api.graphql", &project).unwrap();
        assert_eq!(resolved, schema.canonicalize().unwrap());
    }

    #[test]
    fn missing_schema_path() {
        let test_dir = TestDir::new();
        let err = resolve_schema_path("./nope.graphql", test_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::PathResolution { .. }));
    }

    #[test]
    fn directory_is_not_a_schema() {
        let test_dir = TestDir::new();
        test_dir.dir("schemas");
        let err = resolve_schema_path("./schemas", test_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaPathNotFile { .. }));
    }

    #[test]
    fn tilde_expansion() {
        let home = home_dir().unwrap();
        assert_eq!(resolve_path("~", Path::new("/cfg")).unwrap(), home);
        assert_eq!(
            resolve_path("~/idx", Path::new("/cfg")).unwrap(),
            home.join("idx")
        );
        assert_eq!(
            resolve_path("idx", Path::new("/cfg")).unwrap(),
            PathBuf::from("/cfg/idx")
        );
        assert_eq!(
            resolve_path("/abs/idx", Path::new("/cfg")).unwrap(),
            PathBuf::from("/abs/idx")
        );
    }
}
