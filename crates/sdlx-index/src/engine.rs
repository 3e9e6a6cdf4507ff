//! Per-schema index lifecycle and search.
//!
//! A [`SearchEngine`] owns a root directory and keeps one Tantivy index per
//! schema id beneath it. Indexing always rebuilds from scratch, so indexing
//! the same model twice leaves an equivalent index.

use std::{
    fs,
    path::{Path, PathBuf},
};

use sdlx_schema::SchemaModel;
use tracing::debug;

use crate::{
    IndexError,
    analyzer::parse_language,
    document::extract_records,
    fingerprint::source_hash,
    location::{index_exists, schema_index_dir, validate_schema_id},
    search::{SearchHit, Searcher},
    status::{IndexStatus, detect_index_status, write_stored_hash},
    writer::IndexWriter,
};

/// Builds, queries and removes schema indexes under one root directory.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    /// Directory holding one subdirectory per schema id.
    root: PathBuf,
    /// Stemmer language for indexing and queries.
    language: String,
    /// Maximum edit distance for fuzzy matching; 0 disables it.
    fuzzy_distance: u8,
}

impl SearchEngine {
    /// Creates an engine rooted at `root`.
    ///
    /// Fails if `language` is not a supported stemmer. Nothing is written
    /// until a schema is indexed.
    pub fn new(
        root: impl Into<PathBuf>,
        language: &str,
        fuzzy_distance: u8,
    ) -> Result<Self, IndexError> {
        parse_language(language)?;
        Ok(Self {
            root: root.into(),
            language: language.to_lowercase(),
            fuzzy_distance,
        })
    }

    /// Returns the index root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the stemmer language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the index directory for a schema id.
    pub fn index_dir(&self, schema_id: &str) -> Result<PathBuf, IndexError> {
        schema_index_dir(&self.root, schema_id)
    }

    /// Replaces the index for `schema_id` with the records of `model`.
    ///
    /// Returns the number of records written.
    pub fn index(&self, schema_id: &str, model: &SchemaModel) -> Result<usize, IndexError> {
        let dir = self.index_dir(schema_id)?;
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }

        let records = extract_records(schema_id, model);
        let mut writer = IndexWriter::open(&dir, &self.language)?;
        writer.add_records(&records)?;
        writer.commit()?;

        debug!(schema_id, records = records.len(), dir = %dir.display(), "indexed schema");
        Ok(records.len())
    }

    /// Like [`SearchEngine::index`], then stores `hash` for [`SearchEngine::status`].
    pub fn index_with_hash(
        &self,
        schema_id: &str,
        model: &SchemaModel,
        hash: &str,
    ) -> Result<usize, IndexError> {
        let count = self.index(schema_id, model)?;
        write_stored_hash(&self.index_dir(schema_id)?, hash)?;
        Ok(count)
    }

    /// Computes the staleness hash of schema source text for this engine.
    pub fn fingerprint(&self, source: &str) -> String {
        source_hash(source, &self.language)
    }

    /// Reports whether the index for `schema_id` was built from `hash`.
    pub fn status(&self, schema_id: &str, hash: &str) -> Result<IndexStatus, IndexError> {
        Ok(detect_index_status(&self.index_dir(schema_id)?, hash))
    }

    /// Deletes the index for `schema_id`. Removing a missing index succeeds.
    pub fn remove(&self, schema_id: &str) -> Result<(), IndexError> {
        let dir = self.index_dir(schema_id)?;
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            debug!(schema_id, "removed index");
        }
        Ok(())
    }

    /// Returns true if an index has been built for `schema_id`.
    pub fn exists(&self, schema_id: &str) -> bool {
        validate_schema_id(schema_id).is_ok() && index_exists(&self.root.join(schema_id))
    }

    /// Searches the index for `schema_id`.
    pub fn search(
        &self,
        schema_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, IndexError> {
        let dir = self.index_dir(schema_id)?;
        if !index_exists(&dir) {
            return Err(IndexError::Unavailable {
                schema_id: schema_id.to_string(),
            });
        }

        let mut searcher = Searcher::open(&dir, &self.language, self.fuzzy_distance)?;
        searcher.search(query, limit)
    }
}
