//! The assembled, queryable schema model.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::Path,
};

use tracing::debug;

use crate::{
    error::SchemaError,
    model::{DirectiveDefinition, Field, TypeDefinition, TypeKind},
    sdl::{self, Definition, Document, RootTypes},
    usage::{Usage, UsageIndex},
};

/// Conventional name of the query root type.
pub const DEFAULT_QUERY_TYPE: &str = "Query";

/// Conventional name of the mutation root type.
pub const DEFAULT_MUTATION_TYPE: &str = "Mutation";

/// A root operation whose fields are browsed separately from named types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootOperation {
    /// The query root.
    Query,
    /// The mutation root.
    Mutation,
}

impl RootOperation {
    /// Name used for the root in usage paths and search records.
    pub fn name(self) -> &'static str {
        match self {
            Self::Query => DEFAULT_QUERY_TYPE,
            Self::Mutation => DEFAULT_MUTATION_TYPE,
        }
    }
}

impl fmt::Display for RootOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable, fully-resolved schema.
///
/// The query and mutation root types are not kept as type definitions: their
/// fields are exposed through [`SchemaModel::query_fields`] and
/// [`SchemaModel::mutation_fields`]. Any other root (such as a subscription
/// type) remains an ordinary object.
#[derive(Debug, Clone)]
pub struct SchemaModel {
    /// Named types, ordered by name.
    types: BTreeMap<String, TypeDefinition>,
    /// Directive definitions, ordered by name.
    directives: BTreeMap<String, DirectiveDefinition>,
    /// Declared name of the query root type.
    query_type: String,
    /// Declared name of the mutation root type.
    mutation_type: String,
    /// Declared name of the subscription root type, if any.
    subscription_type: Option<String>,
    /// Query root fields in declaration order.
    query_fields: Vec<Field>,
    /// Mutation root fields in declaration order.
    mutation_fields: Vec<Field>,
    /// Reverse usage index.
    usages: UsageIndex,
}

impl SchemaModel {
    /// Parses SDL source text into a model.
    pub fn parse(source: &str) -> Result<Self, SchemaError> {
        let document = sdl::parse(source)?;
        Self::from_document(document)
    }

    /// Reads and parses a schema file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let source = fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = source.len(), "read schema");
        Self::parse(&source)
    }

    /// Assembles a parsed document: checks duplicates, applies extensions,
    /// extracts the root operation fields and builds the usage index.
    fn from_document(document: Document) -> Result<Self, SchemaError> {
        let mut types = BTreeMap::new();
        let mut directives = BTreeMap::new();
        let mut extensions = Vec::new();
        let mut roots = RootTypes::default();

        for definition in document.definitions {
            match definition {
                Definition::Type(definition) => {
                    let name = definition.name().to_string();
                    if types.contains_key(&name) {
                        return Err(SchemaError::DuplicateDefinition { kind: "type", name });
                    }
                    types.insert(name, definition);
                }
                Definition::Directive(directive) => {
                    if directives.contains_key(&directive.name) {
                        return Err(SchemaError::DuplicateDefinition {
                            kind: "directive",
                            name: directive.name,
                        });
                    }
                    directives.insert(directive.name.clone(), directive);
                }
                Definition::Extension { definition, line } => extensions.push((definition, line)),
                Definition::Schema(declared) => merge_roots(&mut roots, declared)?,
            }
        }

        for (extension, line) in extensions {
            let name = extension.name().to_string();
            let Some(base) = types.get_mut(&name) else {
                return Err(SchemaError::UnknownExtension { name });
            };
            debug!(name = %name, line, "applying extension");
            apply_extension(base, extension)?;
        }

        let query_type = roots.query.unwrap_or_else(|| DEFAULT_QUERY_TYPE.to_string());
        let mutation_type = roots
            .mutation
            .unwrap_or_else(|| DEFAULT_MUTATION_TYPE.to_string());
        let query_fields = take_root_fields(&mut types, &query_type);
        let mutation_fields = if mutation_type == query_type {
            query_fields.clone()
        } else {
            take_root_fields(&mut types, &mutation_type)
        };

        let mut model = Self {
            types,
            directives,
            query_type,
            mutation_type,
            subscription_type: roots.subscription,
            query_fields,
            mutation_fields,
            usages: UsageIndex::default(),
        };
        model.usages = UsageIndex::build(&model);

        debug!(
            types = model.types.len(),
            directives = model.directives.len(),
            query_fields = model.query_fields.len(),
            mutation_fields = model.mutation_fields.len(),
            usages = model.usages.total(),
            "schema assembled"
        );
        Ok(model)
    }

    /// Returns a named type.
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Returns a directive definition; a leading `@` is ignored.
    pub fn get_directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name.trim_start_matches('@'))
    }

    /// All named types, ordered by name.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    /// Number of named types, excluding the query and mutation roots.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Types of one kind, ordered by name.
    pub fn types_of_kind(&self, kind: TypeKind) -> Vec<&TypeDefinition> {
        self.types.values().filter(|t| t.kind() == kind).collect()
    }

    /// Object types, ordered by name.
    pub fn objects(&self) -> Vec<&TypeDefinition> {
        self.types_of_kind(TypeKind::Object)
    }

    /// Interface types, ordered by name.
    pub fn interfaces(&self) -> Vec<&TypeDefinition> {
        self.types_of_kind(TypeKind::Interface)
    }

    /// Union types, ordered by name.
    pub fn unions(&self) -> Vec<&TypeDefinition> {
        self.types_of_kind(TypeKind::Union)
    }

    /// Enum types, ordered by name.
    pub fn enums(&self) -> Vec<&TypeDefinition> {
        self.types_of_kind(TypeKind::Enum)
    }

    /// Custom scalar types, ordered by name.
    pub fn scalars(&self) -> Vec<&TypeDefinition> {
        self.types_of_kind(TypeKind::Scalar)
    }

    /// Input object types, ordered by name.
    pub fn inputs(&self) -> Vec<&TypeDefinition> {
        self.types_of_kind(TypeKind::InputObject)
    }

    /// Directive definitions, ordered by name.
    pub fn directives(&self) -> Vec<&DirectiveDefinition> {
        self.directives.values().collect()
    }

    /// Query root fields in declaration order.
    pub fn query_fields(&self) -> &[Field] {
        &self.query_fields
    }

    /// Mutation root fields in declaration order.
    pub fn mutation_fields(&self) -> &[Field] {
        &self.mutation_fields
    }

    /// Fields of a root operation.
    pub fn root_fields(&self, root: RootOperation) -> &[Field] {
        match root {
            RootOperation::Query => &self.query_fields,
            RootOperation::Mutation => &self.mutation_fields,
        }
    }

    /// Declared name of the query root type.
    pub fn query_type_name(&self) -> &str {
        &self.query_type
    }

    /// Declared name of the mutation root type.
    pub fn mutation_type_name(&self) -> &str {
        &self.mutation_type
    }

    /// Declared name of the subscription root type, if any.
    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    /// Usages of a type; empty when it is unknown or unreferenced.
    pub fn usages(&self, name: &str) -> &[Usage] {
        self.usages.get(name)
    }

    /// Objects and interfaces that implement `interface`, ordered by name.
    pub fn implementors(&self, interface: &str) -> Vec<&TypeDefinition> {
        self.types
            .values()
            .filter(|t| match t {
                TypeDefinition::Object(o) | TypeDefinition::Interface(o) => {
                    o.interfaces.iter().any(|i| i == interface)
                }
                TypeDefinition::Union(_)
                | TypeDefinition::Enum(_)
                | TypeDefinition::Scalar(_)
                | TypeDefinition::InputObject(_) => false,
            })
            .collect()
    }
}

/// Merges root operation names from one schema definition or extension.
fn merge_roots(roots: &mut RootTypes, declared: RootTypes) -> Result<(), SchemaError> {
    let pairs = [
        ("query", &mut roots.query, declared.query),
        ("mutation", &mut roots.mutation, declared.mutation),
        ("subscription", &mut roots.subscription, declared.subscription),
    ];
    for (operation, slot, value) in pairs {
        let Some(value) = value else { continue };
        if slot.is_some() {
            return Err(SchemaError::DuplicateDefinition {
                kind: "root operation",
                name: operation.to_string(),
            });
        }
        *slot = Some(value);
    }
    Ok(())
}

/// Appends the parts of `extension` to `base`.
fn apply_extension(base: &mut TypeDefinition, extension: TypeDefinition) -> Result<(), SchemaError> {
    match (base, extension) {
        (TypeDefinition::Object(base), TypeDefinition::Object(ext))
        | (TypeDefinition::Interface(base), TypeDefinition::Interface(ext)) => {
            for iface in ext.interfaces {
                if !base.interfaces.contains(&iface) {
                    base.interfaces.push(iface);
                }
            }
            base.fields.extend(ext.fields);
            base.directives.extend(ext.directives);
        }
        (TypeDefinition::Union(base), TypeDefinition::Union(ext)) => {
            base.members.extend(ext.members);
            base.directives.extend(ext.directives);
        }
        (TypeDefinition::Enum(base), TypeDefinition::Enum(ext)) => {
            base.values.extend(ext.values);
            base.directives.extend(ext.directives);
        }
        (TypeDefinition::Scalar(base), TypeDefinition::Scalar(ext)) => {
            base.directives.extend(ext.directives);
        }
        (TypeDefinition::InputObject(base), TypeDefinition::InputObject(ext)) => {
            base.fields.extend(ext.fields);
            base.directives.extend(ext.directives);
        }
        (base, ext) => {
            return Err(SchemaError::ExtensionMismatch {
                name: ext.name().to_string(),
                expected: base.kind().keyword().to_string(),
                found: ext.kind().keyword().to_string(),
            });
        }
    }
    Ok(())
}

/// Removes an object root type and returns its fields.
///
/// A root name that is missing, or that names a non-object type, yields no
/// fields and leaves the type map untouched.
fn take_root_fields(types: &mut BTreeMap<String, TypeDefinition>, name: &str) -> Vec<Field> {
    match types.remove(name) {
        Some(TypeDefinition::Object(object)) => object.fields,
        Some(other) => {
            types.insert(name.to_string(), other);
            Vec::new()
        }
        None => Vec::new(),
    }
}
