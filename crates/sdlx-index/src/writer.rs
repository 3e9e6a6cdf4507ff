//! Index writer for adding records to the Tantivy index.

use std::{fs, path::Path};

use tantivy::{
    Index, IndexWriter as TantivyIndexWriter, TantivyDocument, directory::MmapDirectory,
};

use crate::{
    analyzer::{SDLX_TOKENIZER, build_analyzer_from_name},
    document::SchemaRecord,
    error::IndexError,
    schema::IndexSchema,
};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Writes records to a Tantivy index.
///
/// The writer opens or creates an index at the specified path and provides
/// methods to add, delete, and commit records.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Schema with field handles.
    schema: IndexSchema,
}

impl IndexWriter {
    /// Opens or creates an index at the given path.
    ///
    /// The text analyzer for `language` is registered before any record is
    /// written.
    pub fn open(path: &Path, language: &str) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let analyzer = build_analyzer_from_name(language)?;

        fs::create_dir_all(path)?;

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        index.tokenizers().register(SDLX_TOKENIZER, analyzer);

        let writer = index
            .writer(DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        Ok(Self {
            index,
            writer,
            schema,
        })
    }

    /// Adds a record to the index.
    ///
    /// The record is staged but not visible until [`IndexWriter::commit`] is called.
    pub fn add_record(&mut self, record: &SchemaRecord) -> Result<(), IndexError> {
        let mut doc = TantivyDocument::new();

        doc.add_text(self.schema.kind, record.kind.as_str());
        doc.add_text(self.schema.name, &record.name);
        doc.add_text(self.schema.path, &record.path);
        doc.add_text(self.schema.description, &record.description);
        doc.add_text(self.schema.schema_id, &record.schema_id);

        self.writer
            .add_document(doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Adds multiple records to the index.
    pub fn add_records(&mut self, records: &[SchemaRecord]) -> Result<(), IndexError> {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    /// Commits all pending changes to the index.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Rolls back any uncommitted changes.
    pub fn rollback(&mut self) -> Result<(), IndexError> {
        self.writer.rollback().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Deletes all records from the index.
    pub fn delete_all(&mut self) -> Result<(), IndexError> {
        self.writer
            .delete_all_documents()
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Returns the number of committed records in the index.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self
            .index
            .reader()
            .map_err(|e| IndexError::Write(e.to_string()))?;
        Ok(reader.searcher().num_docs())
    }
}
