//! Fixture trees of schemas and config files for sdlx-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary project tree, removed on drop.
pub struct TestDir {
    /// Owned temporary directory.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory (and its parents) relative to the root.
    pub fn dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes an SDL document relative to the root.
    pub fn schema(&self, rel_path: &str, sdl: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, sdl).unwrap();
        path
    }

    /// Writes `.sdlx.toml` into `rel_dir` (the root when empty).
    pub fn config(&self, rel_dir: &str, toml: &str) -> PathBuf {
        let config = self.dir(rel_dir).join(CONFIG_FILENAME);
        fs::write(&config, toml).unwrap();
        config
    }
}
