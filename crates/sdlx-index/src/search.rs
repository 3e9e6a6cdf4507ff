//! Boosted multi-field search over a schema index.
//!
//! Each analyzed query term becomes one clause per searchable field, wrapped
//! in a [`BoostQuery`] with the field's weight. All clauses are `Should`, so a
//! record qualifies when any term matches any field, and records matching
//! more terms in higher-weighted fields score higher.

use std::{cmp::Ordering, path::Path};

use serde::Serialize;
use tantivy::{
    Index, TantivyDocument, Term,
    collector::TopDocs,
    directory::MmapDirectory,
    query::{BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, TermQuery},
    schema::{Field, IndexRecordOption, Value},
    tokenizer::TextAnalyzer,
};
use tracing::debug;

use crate::{
    IndexError,
    analyzer::{SDLX_TOKENIZER, analyze, build_analyzer_from_name},
    document::RecordKind,
    schema::IndexSchema,
};

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// What the matching record describes.
    pub kind: RecordKind,
    /// Definition or field name.
    pub name: String,
    /// Locator such as `User.friends`.
    pub path: String,
    /// Description, empty when absent.
    pub description: String,
    /// Relevance score; higher is better.
    pub score: f32,
}

/// Searches one schema index.
pub struct Searcher {
    /// The Tantivy index.
    index: Index,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Analyzer applied to query text.
    analyzer: TextAnalyzer,
    /// Maximum edit distance for fuzzy term matching; 0 disables it.
    fuzzy_distance: u8,
}

impl Searcher {
    /// Opens an existing index for searching.
    pub fn open(path: &Path, language: &str, fuzzy_distance: u8) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }

        let schema = IndexSchema::new();

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open(dir).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        let analyzer = build_analyzer_from_name(language)?;
        index.tokenizers().register(SDLX_TOKENIZER, analyzer.clone());

        Ok(Self {
            index,
            schema,
            analyzer,
            fuzzy_distance,
        })
    }

    /// Searches the index, returning at most `limit` hits by descending score.
    ///
    /// Queries that analyze to no terms return no hits.
    pub fn search(&mut self, query_str: &str, limit: usize) -> Result<Vec<SearchHit>, IndexError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let Some(query) = self.build_query(query_str) else {
            return Ok(Vec::new());
        };

        let reader = self
            .index
            .reader()
            .map_err(|e| IndexError::search(&e))?;
        let searcher = reader.searcher();

        let top_docs = searcher
            .search(&*query, &TopDocs::with_limit(limit))
            .map_err(|e| IndexError::search(&e))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(doc_address)
                .map_err(|e| IndexError::search(&e))?;
            if let Some(hit) = self.doc_to_hit(&doc, score) {
                hits.push(hit);
            }
        }

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.path.cmp(&b.path))
        });

        debug!(query = query_str, hits = hits.len(), "search complete");
        Ok(hits)
    }

    /// Builds the boosted OR query for a query string.
    ///
    /// Returns `None` when the string analyzes to no terms.
    pub(crate) fn build_query(&mut self, query_str: &str) -> Option<Box<dyn Query>> {
        let terms = analyze(&mut self.analyzer, query_str);
        if terms.is_empty() {
            return None;
        }

        let clauses: Vec<(Occur, Box<dyn Query>)> = terms
            .iter()
            .flat_map(|term| {
                self.schema
                    .weighted_fields()
                    .map(|(field, weight)| (Occur::Should, self.term_query(field, weight, term)))
            })
            .collect();

        Some(Box::new(BooleanQuery::new(clauses)))
    }

    /// Builds a single-field term query with boost and optional fuzzy matching.
    fn term_query(&self, field: Field, boost_value: f32, term_text: &str) -> Box<dyn Query> {
        let term = Term::from_field_text(field, term_text);
        let query: Box<dyn Query> = if self.fuzzy_distance > 0 {
            Box::new(FuzzyTermQuery::new(term, self.fuzzy_distance, true))
        } else {
            Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs))
        };
        Box::new(BoostQuery::new(query, boost_value))
    }

    /// Converts a stored document to a hit; `None` if its kind is unreadable.
    fn doc_to_hit(&self, doc: &TantivyDocument, score: f32) -> Option<SearchHit> {
        let kind = self.get_text_field(doc, self.schema.kind);
        let kind = match kind.parse::<RecordKind>() {
            Ok(kind) => kind,
            Err(e) => {
                debug!(error = %e, "skipping record");
                return None;
            }
        };

        Some(SearchHit {
            kind,
            name: self.get_text_field(doc, self.schema.name),
            path: self.get_text_field(doc, self.schema.path),
            description: self.get_text_field(doc, self.schema.description),
            score,
        })
    }

    /// Reads a stored text field, returning an empty string if missing.
    fn get_text_field(&self, doc: &TantivyDocument, field: Field) -> String {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }
}
