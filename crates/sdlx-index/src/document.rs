//! Record types for indexing.
//!
//! A [`SchemaRecord`] is one flattened, searchable entry extracted from a
//! [`SchemaModel`]: a root field, a named type, a type's field or a directive.

use std::{fmt, str::FromStr};

use sdlx_schema::{Field, RootOperation, SchemaModel, TypeDefinition};
use serde::Serialize;

/// What a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    /// A field of the query root.
    Query,
    /// A field of the mutation root.
    Mutation,
    /// An object type.
    Object,
    /// A field of an object or interface type.
    Field,
    /// An input object type.
    Input,
    /// A field of an input object type.
    InputField,
    /// An enum type.
    Enum,
    /// A custom scalar type.
    Scalar,
    /// An interface type.
    Interface,
    /// A union type.
    Union,
    /// A directive definition.
    Directive,
}

impl RecordKind {
    /// Every kind, in extraction order.
    pub const ALL: [Self; 11] = [
        Self::Query,
        Self::Mutation,
        Self::Object,
        Self::Field,
        Self::Input,
        Self::InputField,
        Self::Enum,
        Self::Scalar,
        Self::Interface,
        Self::Union,
        Self::Directive,
    ];

    /// Returns the name stored in the index.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Object => "Object",
            Self::Field => "Field",
            Self::Input => "Input",
            Self::InputField => "InputField",
            Self::Enum => "Enum",
            Self::Scalar => "Scalar",
            Self::Interface => "Interface",
            Self::Union => "Union",
            Self::Directive => "Directive",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown record kind: {s}"))
    }
}

/// A flattened, searchable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRecord {
    /// What the record describes.
    pub kind: RecordKind,
    /// Definition or field name (directives without `@`).
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Locator: `Type.field`, a bare type name, or `@directive`.
    pub path: String,
    /// Owning schema identifier.
    pub schema_id: String,
}

/// Collects records for one schema.
struct Extractor<'a> {
    /// Owning schema identifier stamped on each record.
    schema_id: &'a str,
    /// Records collected so far.
    records: Vec<SchemaRecord>,
}

impl Extractor<'_> {
    /// Appends one record.
    fn push(&mut self, kind: RecordKind, name: &str, description: &str, path: String) {
        self.records.push(SchemaRecord {
            kind,
            name: name.to_string(),
            description: description.to_string(),
            path,
            schema_id: self.schema_id.to_string(),
        });
    }

    /// Appends a named type followed by one record per field.
    fn push_type(&mut self, kind: RecordKind, definition: &TypeDefinition) {
        let name = definition.name();
        self.push(kind, name, definition.description(), name.to_string());

        for field in definition.fields() {
            self.push_field(RecordKind::Field, name, field);
        }
        for field in definition.input_fields() {
            self.push(
                RecordKind::InputField,
                &field.name,
                &field.description,
                format!("{name}.{}", field.name),
            );
        }
    }

    /// Appends a field record under `parent`.
    fn push_field(&mut self, kind: RecordKind, parent: &str, field: &Field) {
        self.push(
            kind,
            &field.name,
            &field.description,
            format!("{parent}.{}", field.name),
        );
    }
}

/// Flattens a model into searchable records.
///
/// Emits, in order: query fields, mutation fields, then every named type
/// (objects, inputs, enums, scalars, interfaces, unions) with the fields of
/// objects, interfaces and inputs, then directives.
pub fn extract_records(schema_id: &str, model: &SchemaModel) -> Vec<SchemaRecord> {
    let mut extractor = Extractor {
        schema_id,
        records: Vec::new(),
    };

    for (root, kind) in [
        (RootOperation::Query, RecordKind::Query),
        (RootOperation::Mutation, RecordKind::Mutation),
    ] {
        for field in model.root_fields(root) {
            extractor.push_field(kind, root.name(), field);
        }
    }

    let categories = [
        (model.objects(), RecordKind::Object),
        (model.inputs(), RecordKind::Input),
        (model.enums(), RecordKind::Enum),
        (model.scalars(), RecordKind::Scalar),
        (model.interfaces(), RecordKind::Interface),
        (model.unions(), RecordKind::Union),
    ];
    for (definitions, kind) in categories {
        for definition in definitions {
            extractor.push_type(kind, definition);
        }
    }

    for directive in model.directives() {
        extractor.push(
            RecordKind::Directive,
            &directive.name,
            &directive.description,
            format!("@{}", directive.name),
        );
    }

    extractor.records
}
