//! Integration tests for sdlx-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use sdlx_config::{CONFIG_FILENAME, Config, ConfigError, ConfigWarning, is_global_config};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Loads config from `dir`, ignoring whatever the global config defines.
    fn load_local(&self, dir: &Path) -> Config {
        let files: Vec<PathBuf> = sdlx_config::discover_config_files(dir)
            .into_iter()
            .filter(|p| !is_global_config(p))
            .collect();
        Config::load_from_files(&files).unwrap()
    }
}

#[test]
fn load_no_config_returns_default() {
    let env = TestEnv::new();
    let config = env.load_local(env.path());

    assert!(config.schemas.is_empty());
    assert!(config.config_root.is_none());
    assert_eq!(config.settings.visible_panels, 2);
    assert_eq!(config.search.stemmer, "english");
}

#[test]
fn load_single_config() {
    let env = TestEnv::new();
    let schema = env.create_file("schema.graphql", "type Query { a: Int }");
    env.create_file(
        CONFIG_FILENAME,
        r#"
[settings]
visible_panels = 3

[search]
fuzzy_distance = 1

[schema.api]
path = "schema.graphql"
"#,
    );

    let config = env.load_local(env.path());
    assert_eq!(config.settings.visible_panels, 3);
    assert_eq!(config.search.fuzzy_distance, 1);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
    assert_eq!(
        config.schema("api").unwrap().path,
        schema.canonicalize().unwrap()
    );
    assert!(config.validate().is_empty());
}

#[test]
fn nested_configs_merge_with_closest_winning() {
    let env = TestEnv::new();
    env.create_file("shared.graphql", "scalar Shared");
    env.create_file("project/local.graphql", "scalar Local");
    env.create_file(
        CONFIG_FILENAME,
        r#"
[settings]
default_limit = 50
visible_panels = 4

[schema.shared]
path = "./shared.graphql"
"#,
    );
    env.create_file(
        "project/.sdlx.toml",
        r#"
[settings]
default_limit = 5

[schema.local]
path = "./local.graphql"
"#,
    );
    let cwd = env.create_dir("project/src");

    let config = env.load_local(&cwd);
    assert_eq!(config.settings.default_limit, 5);
    assert_eq!(config.settings.visible_panels, 4);

    let ids: Vec<_> = config.schemas.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["local", "shared"]);
    assert_eq!(config.config_root, Some(env.path().join("project")));
}

#[test]
fn root_config_hides_parents() {
    let env = TestEnv::new();
    env.create_file(CONFIG_FILENAME, "[settings]\nvisible_panels = 9\n");
    env.create_file("project/.sdlx.toml", "root = true\n");
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.settings.visible_panels, 2);
}

#[test]
fn invalid_toml_is_an_error() {
    let env = TestEnv::new();
    env.create_file(CONFIG_FILENAME, "[settings\n");

    let err = Config::load(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
}

#[test]
fn missing_schema_file_is_an_error() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        "root = true\n[schema.api]\npath = \"./missing.graphql\"\n",
    );

    let err = Config::load(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::PathResolution { .. }));
}

#[test]
fn validation_warnings_survive_loading() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        "root = true\n[settings]\nvisible_panels = 0\n[search]\nstemmer = \"elvish\"\n",
    );

    let warnings = Config::load(env.path()).unwrap().validate();
    assert!(warnings.contains(&ConfigWarning::NoVisiblePanels));
    assert!(warnings.contains(&ConfigWarning::UnknownStemmer {
        stemmer: "elvish".into()
    }));
}

#[test]
fn index_directory_is_resolved() {
    let env = TestEnv::new();
    env.create_file(CONFIG_FILENAME, "root = true\n[index]\ndirectory = \"./idx\"\n");

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.index_root(), Some(env.path().join("idx").as_path()));
}
