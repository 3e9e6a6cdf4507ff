//! Index location resolution.
//!
//! Every schema gets its own index directory named after its schema id,
//! beneath a root chosen by the caller. The default root is the platform
//! data directory (`~/.local/share/sdlx/index` on Linux).

use std::path::{Component, Path, PathBuf};

use directories::ProjectDirs;

use crate::IndexError;

/// Subdirectory within the data directory for indexes.
const INDEX_DIR: &str = "index";
/// File holding the source hash, inside each index directory.
const HASH_FILE: &str = "source_hash";
/// Marker file Tantivy writes when an index is created.
const META_FILE: &str = "meta.json";

/// Returns the default index root, or `None` if no home directory is known.
pub fn default_index_root() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sdlx").map(|dirs| dirs.data_dir().join(INDEX_DIR))
}

/// Checks that a schema id can be used as a single directory name.
pub fn validate_schema_id(schema_id: &str) -> Result<(), IndexError> {
    let mut components = Path::new(schema_id).components();
    let valid = !schema_id.is_empty()
        && !schema_id.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();

    if valid {
        Ok(())
    } else {
        Err(IndexError::InvalidSchemaId(schema_id.to_string()))
    }
}

/// Returns the index directory for a schema id under `root`.
pub fn schema_index_dir(root: &Path, schema_id: &str) -> Result<PathBuf, IndexError> {
    validate_schema_id(schema_id)?;
    Ok(root.join(schema_id))
}

/// Returns the path to the source hash file for an index.
pub fn hash_path(index_dir: &Path) -> PathBuf {
    index_dir.join(HASH_FILE)
}

/// Checks if an index exists at the given path.
pub fn index_exists(index_dir: &Path) -> bool {
    index_dir.join(META_FILE).exists()
}
