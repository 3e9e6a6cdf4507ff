//! Index status detection.
//!
//! Determines the state of a schema index relative to its source and
//! provides functions for reading/writing the stored fingerprint.

use std::{fs, io, path::Path};

use serde::Serialize;

use crate::location::{hash_path, index_exists};

/// Status of a schema search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexStatus {
    /// Index exists and matches the current source.
    Current,
    /// Index exists but was built from different source or settings.
    Stale,
    /// No index exists.
    Missing,
}

impl IndexStatus {
    /// Returns a human-readable description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Stale => "stale",
            Self::Missing => "missing",
        }
    }

    /// Returns true if the index needs rebuilding.
    pub fn needs_update(&self) -> bool {
        !matches!(self, Self::Current)
    }
}

/// Reads the stored source hash from an index directory.
///
/// Returns `None` if the hash file doesn't exist or can't be read.
pub fn read_stored_hash(index_dir: &Path) -> Option<String> {
    fs::read_to_string(hash_path(index_dir))
        .ok()
        .map(|s| s.trim().to_string())
}

/// Writes the source hash to an index directory.
///
/// Creates the index directory if it doesn't exist.
pub fn write_stored_hash(index_dir: &Path, hash: &str) -> io::Result<()> {
    fs::create_dir_all(index_dir)?;
    fs::write(hash_path(index_dir), hash)
}

/// Determines the status of the index in `index_dir` for source hash `hash`.
///
/// An index without a stored hash is stale: it cannot be shown to match.
pub fn detect_index_status(index_dir: &Path, hash: &str) -> IndexStatus {
    if !index_exists(index_dir) {
        return IndexStatus::Missing;
    }

    match read_stored_hash(index_dir) {
        Some(stored) if stored == hash => IndexStatus::Current,
        Some(_) | None => IndexStatus::Stale,
    }
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn status_description() {
        assert_eq!(IndexStatus::Current.description(), "current");
        assert_eq!(IndexStatus::Stale.description(), "stale");
        assert_eq!(IndexStatus::Missing.description(), "missing");
    }

    #[test]
    fn status_needs_update() {
        assert!(!IndexStatus::Current.needs_update());
        assert!(IndexStatus::Stale.needs_update());
        assert!(IndexStatus::Missing.needs_update());
    }

    #[test]
    fn read_write_hash() {
        let temp = TempDir::new().unwrap();
        let index_dir = temp.path().join("index");

        assert!(read_stored_hash(&index_dir).is_none());

        write_stored_hash(&index_dir, "abc123def456").unwrap();
        assert_eq!(read_stored_hash(&index_dir).as_deref(), Some("abc123def456"));

        write_stored_hash(&index_dir, "new_hash_value").unwrap();
        assert_eq!(read_stored_hash(&index_dir).as_deref(), Some("new_hash_value"));
    }

    #[test]
    fn read_hash_trims_whitespace() {
        let temp = TempDir::new().unwrap();
        fs::write(hash_path(temp.path()), "  abc123  \n").unwrap();
        assert_eq!(read_stored_hash(temp.path()).as_deref(), Some("abc123"));
    }

    #[test]
    fn detect_status() {
        let temp = TempDir::new().unwrap();
        let index_dir = temp.path().join("index");

        assert_eq!(detect_index_status(&index_dir, "h1"), IndexStatus::Missing);

        fs::create_dir_all(&index_dir).unwrap();
        assert_eq!(detect_index_status(&index_dir, "h1"), IndexStatus::Missing);

        fs::write(index_dir.join("meta.json"), "{}").unwrap();
        assert_eq!(detect_index_status(&index_dir, "h1"), IndexStatus::Stale);

        write_stored_hash(&index_dir, "h0").unwrap();
        assert_eq!(detect_index_status(&index_dir, "h1"), IndexStatus::Stale);

        write_stored_hash(&index_dir, "h1").unwrap();
        assert_eq!(detect_index_status(&index_dir, "h1"), IndexStatus::Current);
    }
}
