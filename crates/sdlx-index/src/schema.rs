//! Index schema definition for the schema search index.
//!
//! Defines the Tantivy schema with one document per schema record:
//! - `kind`: Record kind such as `Object` or `Field` (text, stored, boosted 1.5x)
//! - `name`: Definition or field name (text, stored, boosted 2.0x)
//! - `path`: Locator such as `User.friends` (text, stored, boosted 1.5x)
//! - `description`: Description text (text, stored, boosted 1.0x)
//! - `schema_id`: Owning schema identifier (string, stored)

use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::SDLX_TOKENIZER;

/// Field boost weights for search ranking.
pub mod boost {
    /// Name field boost (2.0x).
    pub const NAME: f32 = 2.0;
    /// Kind field boost (1.5x).
    pub const KIND: f32 = 1.5;
    /// Path field boost (1.5x).
    pub const PATH: f32 = 1.5;
    /// Description field boost (1.0x).
    pub const DESCRIPTION: f32 = 1.0;
}

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Record kind.
    pub kind: Field,
    /// Definition or field name.
    pub name: Field,
    /// Human-readable locator.
    pub path: Field,
    /// Description text.
    pub description: Field,
    /// Owning schema identifier.
    pub schema_id: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let kind = builder.add_text_field("kind", text_options());
        let name = builder.add_text_field("name", text_options());
        let path = builder.add_text_field("path", text_options());
        let description = builder.add_text_field("description", text_options());

        // Single token, used only to label stored records
        let schema_id = builder.add_text_field("schema_id", STRING | STORED);

        let schema = builder.build();

        Self {
            schema,
            kind,
            name,
            path,
            description,
            schema_id,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Searchable fields paired with their boosts, highest first.
    pub fn weighted_fields(&self) -> [(Field, f32); 4] {
        [
            (self.name, boost::NAME),
            (self.kind, boost::KIND),
            (self.path, boost::PATH),
            (self.description, boost::DESCRIPTION),
        ]
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenized, positioned and stored text.
fn text_options() -> TextOptions {
    TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(SDLX_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored()
}
