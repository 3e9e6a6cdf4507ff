//! Error types for the sdlx-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when working with a schema search index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to read from the index while searching.
    #[error("failed to search index: {0}")]
    Search(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),

    /// No index exists for the schema.
    #[error("no search index for schema '{schema_id}'")]
    Unavailable {
        /// The schema identifier that was searched.
        schema_id: String,
    },

    /// A schema identifier cannot be used as an index namespace.
    #[error("invalid schema id '{0}': must be a non-empty name without path separators")]
    InvalidSchemaId(String),
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Search` error from a Tantivy error.
    pub(crate) fn search(source: &tantivy::TantivyError) -> Self {
        Self::Search(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Returns true if the error means the index has not been built yet.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use tantivy::TantivyError;

    use super::*;

    #[test]
    fn read_failures_are_search_errors() {
        let err = IndexError::search(&TantivyError::IndexAlreadyExists);
        assert!(matches!(err, IndexError::Search(_)));
        assert!(err.to_string().starts_with("failed to search index"));
        assert!(!err.is_unavailable());
    }
}
