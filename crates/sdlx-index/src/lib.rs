//! Tantivy-based search index for GraphQL schemas.
//!
//! This crate flattens a [`SchemaModel`](sdlx_schema::SchemaModel) into
//! searchable records and ranks free-text queries against them. It handles:
//! - Record extraction for root fields, types, fields and directives
//! - Per-schema index creation, replacement and removal
//! - Boosted multi-field ranking (name over kind and path over description)
//! - Source hash tracking for staleness detection
//!
//! # Example
//!
//! ```no_run
//! use sdlx_index::SearchEngine;
//! use sdlx_schema::SchemaModel;
//!
//! let model = SchemaModel::parse("type Query { user: User } type User { id: ID! }").unwrap();
//! let engine = SearchEngine::new("./index", "english", 0).unwrap();
//! engine.index("demo", &model).unwrap();
//!
//! for hit in engine.search("demo", "user", 10).unwrap() {
//!     println!("{} {} {:.2}", hit.kind, hit.path, hit.score);
//! }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod document;
mod engine;
mod error;
mod fingerprint;
mod location;
mod schema;
mod search;
mod status;
mod tokenizer;
mod writer;

pub use analyzer::{SDLX_TOKENIZER, analyze, build_analyzer, build_analyzer_from_name, parse_language};
pub use document::{RecordKind, SchemaRecord, extract_records};
pub use engine::SearchEngine;
pub use error::IndexError;
pub use fingerprint::{INDEX_VERSION, SourceFingerprint, source_hash};
pub use location::{default_index_root, validate_schema_id};
pub use schema::{IndexSchema, boost};
pub use search::{SearchHit, Searcher};
pub use tokenizer::IdentifierTokenizer;
pub use status::{IndexStatus, detect_index_status, read_stored_hash, write_stored_hash};
pub use writer::IndexWriter;
