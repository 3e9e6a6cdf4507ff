//! Reverse index from a type name to every place that references it.

use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::{
    model::{Field, InputValue, TypeDefinition},
    schema::{RootOperation, SchemaModel},
};

/// Kind of definition that holds a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParentKind {
    /// A field or `implements` clause of an object type.
    Object,
    /// A field or `implements` clause of an interface type.
    Interface,
    /// A field of an input object type.
    Input,
    /// A member of a union type.
    Union,
    /// A field of the query root.
    Query,
    /// A field of the mutation root.
    Mutation,
    /// An argument of a directive definition.
    Directive,
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Object => "Object",
            Self::Interface => "Interface",
            Self::Input => "Input",
            Self::Union => "Union",
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Directive => "Directive",
        };
        f.write_str(s)
    }
}

/// One reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Usage {
    /// Name of the definition holding the reference. `Query` and `Mutation`
    /// for root fields, the directive name for directive arguments.
    pub parent_type: String,
    /// Kind of the holding definition.
    pub parent_kind: ParentKind,
    /// Field or argument name; empty for whole-type references.
    pub field_name: String,
    /// Human-readable locator such as `Query.user(id: ID!)`.
    pub path: String,
}

/// Map from referenced type name to its usages in discovery order.
///
/// Types that are never referenced are absent; [`UsageIndex::get`] treats
/// absence as an empty slice. References to a renamed query or mutation root
/// are keyed under `Query` or `Mutation`, matching the paths of root fields,
/// and can be looked up by either name.
#[derive(Debug, Clone, Default)]
pub struct UsageIndex {
    /// Usages keyed by the referenced type's name.
    usages: HashMap<String, Vec<Usage>>,
    /// Declared root type names that differ from their operation name.
    root_aliases: HashMap<String, &'static str>,
}

impl UsageIndex {
    /// Builds the index in a single pass over a model.
    ///
    /// Order: query fields, mutation fields, object fields, interface fields,
    /// object `implements`, interface `implements`, input fields, union
    /// members, directive arguments. Within each category definitions are
    /// visited by name and fields in declaration order.
    pub(crate) fn build(model: &SchemaModel) -> Self {
        let mut index = Self::default();

        for (root, declared) in [
            (RootOperation::Query, model.query_type_name()),
            (RootOperation::Mutation, model.mutation_type_name()),
        ] {
            if declared != root.name() {
                index
                    .root_aliases
                    .entry(declared.to_string())
                    .or_insert(root.name());
            }
        }

        for field in model.query_fields() {
            index.record_field(RootOperation::Query.name(), ParentKind::Query, field);
        }
        for field in model.mutation_fields() {
            index.record_field(RootOperation::Mutation.name(), ParentKind::Mutation, field);
        }
        for object in model.objects() {
            for field in object.fields() {
                index.record_field(object.name(), ParentKind::Object, field);
            }
        }
        for iface in model.interfaces() {
            for field in iface.fields() {
                index.record_field(iface.name(), ParentKind::Interface, field);
            }
        }

        for definition in model.objects().into_iter().chain(model.interfaces()) {
            if let TypeDefinition::Object(t) | TypeDefinition::Interface(t) = definition {
                let kind = if matches!(definition, TypeDefinition::Object(_)) {
                    ParentKind::Object
                } else {
                    ParentKind::Interface
                };
                for iface in &t.interfaces {
                    index.record(iface, &t.name, kind, "", t.name.clone());
                }
            }
        }

        for input in model.inputs() {
            for field in input.input_fields() {
                index.record(
                    field.ty.base_name(),
                    input.name(),
                    ParentKind::Input,
                    &field.name,
                    format!("{}.{}", input.name(), field.name),
                );
            }
        }

        for union in model.unions() {
            if let TypeDefinition::Union(u) = union {
                for member in &u.members {
                    index.record(member, &u.name, ParentKind::Union, "", u.name.clone());
                }
            }
        }

        for directive in model.directives() {
            for arg in &directive.arguments {
                index.record(
                    arg.ty.base_name(),
                    &directive.name,
                    ParentKind::Directive,
                    &arg.name,
                    format!("@{}({}: {})", directive.name, arg.name, arg.ty),
                );
            }
        }

        index
    }

    /// Records a field's result type and each of its argument types.
    fn record_field(&mut self, parent: &str, kind: ParentKind, field: &Field) {
        self.record(
            field.ty.base_name(),
            parent,
            kind,
            &field.name,
            format!("{parent}.{}", field.name),
        );
        for arg in &field.arguments {
            self.record_argument(parent, kind, field, arg);
        }
    }

    /// Records one argument of a field.
    fn record_argument(&mut self, parent: &str, kind: ParentKind, field: &Field, arg: &InputValue) {
        self.record(
            arg.ty.base_name(),
            parent,
            kind,
            &field.name,
            format!("{parent}.{}({}: {})", field.name, arg.name, arg.ty),
        );
    }

    /// Appends a usage under `target`.
    fn record(
        &mut self,
        target: &str,
        parent: &str,
        kind: ParentKind,
        field_name: &str,
        path: String,
    ) {
        let key = self.key(target).to_string();
        self.usages
            .entry(key)
            .or_default()
            .push(Usage {
                parent_type: parent.to_string(),
                parent_kind: kind,
                field_name: field_name.to_string(),
                path,
            });
    }

    /// Maps a declared root type name to its operation name.
    fn key<'a>(&self, name: &'a str) -> &'a str {
        self.root_aliases.get(name).copied().unwrap_or(name)
    }

    /// Returns the usages of a type; empty when it is never referenced.
    pub fn get(&self, name: &str) -> &[Usage] {
        self.usages
            .get(self.key(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct referenced type names.
    pub fn len(&self) -> usize {
        self.usages.len()
    }

    /// Returns true if nothing references anything.
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Total number of recorded usages.
    pub fn total(&self) -> usize {
        self.usages.values().map(Vec::len).sum()
    }
}
