//! SDL document loading.
//!
//! Source text is parsed with `apollo-compiler` and lowered into the model
//! types as a flat list of [`Definition`]s in source order. Extensions and
//! schema definitions are resolved later, when the document is assembled
//! into a [`SchemaModel`](crate::SchemaModel).
//!
//! Only type system definitions and extensions are accepted. Operations and
//! fragments (including the anonymous `{ ... }` shorthand) are rejected.

use apollo_compiler::{
    Name, Node,
    ast::{self, OperationType, Type, Value},
    parser::SourceSpan,
};

use crate::{
    error::SchemaError,
    model::{
        AppliedDirective, DirectiveArgument, DirectiveDefinition, EnumType, EnumValue, Field,
        InputObjectType, InputValue, ObjectType, ScalarType, TypeDefinition, TypeRef, UnionType,
        quote,
    },
};

/// File name attached to parser diagnostics.
const SOURCE_NAME: &str = "schema.graphql";

/// Root operation type names declared by `schema { ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootTypes {
    /// Name of the query root type.
    pub query: Option<String>,
    /// Name of the mutation root type.
    pub mutation: Option<String>,
    /// Name of the subscription root type.
    pub subscription: Option<String>,
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// `schema { ... }` or `extend schema { ... }`.
    Schema(RootTypes),
    /// A named type definition.
    Type(TypeDefinition),
    /// `extend <kind> Name ...`, carrying only the added parts.
    Extension {
        /// Added parts, shaped like a definition of the extended kind.
        definition: TypeDefinition,
        /// 1-based line of the `extend` keyword.
        line: usize,
    },
    /// `directive @name ... on ...`.
    Directive(DirectiveDefinition),
}

/// A parsed schema document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Definitions in source order.
    pub definitions: Vec<Definition>,
}

/// Parses SDL source text into a document.
///
/// The first parser diagnostic becomes a [`SchemaError::Syntax`] carrying
/// its line and column.
pub fn parse(source: &str) -> Result<Document, SchemaError> {
    let document = ast::Document::parse(source, SOURCE_NAME).map_err(|invalid| {
        invalid.errors.iter().next().map_or_else(
            || SchemaError::syntax("invalid schema document", 1, 1),
            |diagnostic| {
                let error = diagnostic.to_json();
                let (line, column) = error
                    .locations
                    .first()
                    .map_or((1, 1), |location| (location.line, location.column));
                SchemaError::syntax(error.message, line, column)
            },
        )
    })?;

    let lowering = Lowering {
        source,
        document: &document,
    };
    let definitions = document
        .definitions
        .iter()
        .map(|definition| lowering.definition(definition))
        .collect::<Result<_, _>>()?;
    Ok(Document { definitions })
}

/// Converts parsed definitions into model types.
struct Lowering<'a> {
    /// Original source text, for keyword lookups.
    source: &'a str,
    /// Parsed document, for mapping spans to lines and columns.
    document: &'a ast::Document,
}

impl Lowering<'_> {
    /// Lowers one top-level definition.
    fn definition(&self, definition: &ast::Definition) -> Result<Definition, SchemaError> {
        let lowered = match definition {
            ast::Definition::OperationDefinition(operation) => {
                return Err(self.unsupported(operation.location()));
            }
            ast::Definition::FragmentDefinition(fragment) => {
                return Err(self.unsupported(fragment.location()));
            }
            ast::Definition::SchemaDefinition(schema) => {
                Definition::Schema(self.root_types(&schema.root_operations)?)
            }
            ast::Definition::SchemaExtension(schema) => {
                Definition::Schema(self.root_types(&schema.root_operations)?)
            }
            ast::Definition::DirectiveDefinition(directive) => {
                Definition::Directive(DirectiveDefinition {
                    name: directive.name.to_string(),
                    description: description(directive.description.as_deref()),
                    arguments: input_values(&directive.arguments),
                    repeatable: directive.repeatable,
                    locations: directive
                        .locations
                        .iter()
                        .map(|location| location.name().to_string())
                        .collect(),
                })
            }
            ast::Definition::ObjectTypeDefinition(object) => {
                Definition::Type(TypeDefinition::Object(object_type(
                    &object.name,
                    object.description.as_deref(),
                    &object.implements_interfaces,
                    &object.fields,
                    &object.directives,
                )))
            }
            ast::Definition::InterfaceTypeDefinition(iface) => {
                Definition::Type(TypeDefinition::Interface(object_type(
                    &iface.name,
                    iface.description.as_deref(),
                    &iface.implements_interfaces,
                    &iface.fields,
                    &iface.directives,
                )))
            }
            ast::Definition::UnionTypeDefinition(union) => {
                Definition::Type(TypeDefinition::Union(union_type(
                    &union.name,
                    union.description.as_deref(),
                    &union.members,
                    &union.directives,
                )))
            }
            ast::Definition::EnumTypeDefinition(e) => Definition::Type(TypeDefinition::Enum(EnumType {
                name: e.name.to_string(),
                description: description(e.description.as_deref()),
                values: self.enum_values(&e.values)?,
                directives: directives(&e.directives),
            })),
            ast::Definition::ScalarTypeDefinition(scalar) => {
                Definition::Type(TypeDefinition::Scalar(ScalarType {
                    name: scalar.name.to_string(),
                    description: description(scalar.description.as_deref()),
                    directives: directives(&scalar.directives),
                }))
            }
            ast::Definition::InputObjectTypeDefinition(input) => {
                Definition::Type(TypeDefinition::InputObject(InputObjectType {
                    name: input.name.to_string(),
                    description: description(input.description.as_deref()),
                    fields: input_values(&input.fields),
                    directives: directives(&input.directives),
                }))
            }
            ast::Definition::ObjectTypeExtension(object) => self.extension(
                object.location(),
                TypeDefinition::Object(object_type(
                    &object.name,
                    None,
                    &object.implements_interfaces,
                    &object.fields,
                    &object.directives,
                )),
            ),
            ast::Definition::InterfaceTypeExtension(iface) => self.extension(
                iface.location(),
                TypeDefinition::Interface(object_type(
                    &iface.name,
                    None,
                    &iface.implements_interfaces,
                    &iface.fields,
                    &iface.directives,
                )),
            ),
            ast::Definition::UnionTypeExtension(union) => self.extension(
                union.location(),
                TypeDefinition::Union(union_type(
                    &union.name,
                    None,
                    &union.members,
                    &union.directives,
                )),
            ),
            ast::Definition::EnumTypeExtension(e) => self.extension(
                e.location(),
                TypeDefinition::Enum(EnumType {
                    name: e.name.to_string(),
                    description: String::new(),
                    values: self.enum_values(&e.values)?,
                    directives: directives(&e.directives),
                }),
            ),
            ast::Definition::ScalarTypeExtension(scalar) => self.extension(
                scalar.location(),
                TypeDefinition::Scalar(ScalarType {
                    name: scalar.name.to_string(),
                    description: String::new(),
                    directives: directives(&scalar.directives),
                }),
            ),
            ast::Definition::InputObjectTypeExtension(input) => self.extension(
                input.location(),
                TypeDefinition::InputObject(InputObjectType {
                    name: input.name.to_string(),
                    description: String::new(),
                    fields: input_values(&input.fields),
                    directives: directives(&input.directives),
                }),
            ),
        };
        Ok(lowered)
    }

    /// Wraps the added parts of an extension with the line it starts on.
    fn extension(&self, location: Option<SourceSpan>, definition: TypeDefinition) -> Definition {
        let (line, _) = self.position(location);
        Definition::Extension { definition, line }
    }

    /// Collects the root operation names of one schema definition or extension.
    fn root_types(
        &self,
        operations: &[Node<(OperationType, Name)>],
    ) -> Result<RootTypes, SchemaError> {
        let mut roots = RootTypes::default();
        for root in operations {
            let (operation, type_name) = &**root;
            let (keyword, slot) = match operation {
                OperationType::Query => ("query", &mut roots.query),
                OperationType::Mutation => ("mutation", &mut roots.mutation),
                OperationType::Subscription => ("subscription", &mut roots.subscription),
            };
            if slot.is_some() {
                let (line, column) = self.position(root.location());
                return Err(SchemaError::syntax(
                    format!("root operation '{keyword}' declared twice"),
                    line,
                    column,
                ));
            }
            *slot = Some(type_name.to_string());
        }
        Ok(roots)
    }

    /// Lowers enum values, rejecting the reserved names `true`, `false` and `null`.
    fn enum_values(
        &self,
        values: &[Node<ast::EnumValueDefinition>],
    ) -> Result<Vec<EnumValue>, SchemaError> {
        values
            .iter()
            .map(|value| {
                let name = value.value.as_str();
                if matches!(name, "true" | "false" | "null") {
                    let (line, column) = self.position(value.location());
                    return Err(SchemaError::syntax(
                        format!("'{name}' is not a valid enum value"),
                        line,
                        column,
                    ));
                }
                Ok(EnumValue {
                    name: name.to_string(),
                    description: description(value.description.as_deref()),
                    directives: directives(&value.directives),
                })
            })
            .collect()
    }

    /// Error for an operation or fragment found at `location`.
    fn unsupported(&self, location: Option<SourceSpan>) -> SchemaError {
        let (line, column) = self.position(location);
        SchemaError::UnsupportedDefinition {
            keyword: self.keyword(location),
            line,
            column,
        }
    }

    /// 1-based line and column of a span; `(1, 1)` when unknown.
    fn position(&self, location: Option<SourceSpan>) -> (usize, usize) {
        location
            .and_then(|span| span.line_column(&self.document.sources))
            .map_or((1, 1), |start| (start.line, start.column))
    }

    /// The keyword (or punctuation) a definition starts with.
    fn keyword(&self, location: Option<SourceSpan>) -> String {
        let rest = location
            .and_then(|span| self.source.get(span.offset()..))
            .unwrap_or_default();
        let word: String = rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if word.is_empty() {
            rest.chars().next().map(String::from).unwrap_or_default()
        } else {
            word
        }
    }
}

/// Description text, empty when absent.
fn description(text: Option<&str>) -> String {
    text.unwrap_or_default().to_string()
}

/// Lowers the shared shape of object and interface types.
fn object_type(
    name: &Name,
    text: Option<&str>,
    interfaces: &[Name],
    fields: &[Node<ast::FieldDefinition>],
    applied: &ast::DirectiveList,
) -> ObjectType {
    ObjectType {
        name: name.to_string(),
        description: description(text),
        interfaces: interfaces.iter().map(ToString::to_string).collect(),
        fields: fields.iter().map(|f| field(f)).collect(),
        directives: directives(applied),
    }
}

/// Lowers a union type or union extension.
fn union_type(
    name: &Name,
    text: Option<&str>,
    members: &[Name],
    applied: &ast::DirectiveList,
) -> UnionType {
    UnionType {
        name: name.to_string(),
        description: description(text),
        members: members.iter().map(ToString::to_string).collect(),
        directives: directives(applied),
    }
}

/// Lowers a field definition.
fn field(field: &ast::FieldDefinition) -> Field {
    Field {
        name: field.name.to_string(),
        description: description(field.description.as_deref()),
        ty: type_ref(&field.ty),
        arguments: input_values(&field.arguments),
        directives: directives(&field.directives),
    }
}

/// Lowers arguments or input object fields.
fn input_values(values: &[Node<ast::InputValueDefinition>]) -> Vec<InputValue> {
    values
        .iter()
        .map(|value| InputValue {
            name: value.name.to_string(),
            description: description(value.description.as_deref()),
            ty: type_ref(&value.ty),
            default_value: value.default_value.as_deref().map(render_value),
            directives: directives(&value.directives),
        })
        .collect()
}

/// Lowers applied directives, rendering argument values as SDL literals.
fn directives(list: &ast::DirectiveList) -> Vec<AppliedDirective> {
    list.iter()
        .map(|directive| AppliedDirective {
            name: directive.name.to_string(),
            arguments: directive
                .arguments
                .iter()
                .map(|argument| DirectiveArgument {
                    name: argument.name.to_string(),
                    value: render_value(&argument.value),
                })
                .collect(),
        })
        .collect()
}

/// Lowers a type reference.
fn type_ref(ty: &Type) -> TypeRef {
    match ty {
        Type::Named(name) => TypeRef::named(name.as_str()),
        Type::NonNullNamed(name) => TypeRef::NonNull(Box::new(TypeRef::named(name.as_str()))),
        Type::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
        Type::NonNullList(inner) => {
            TypeRef::NonNull(Box::new(TypeRef::List(Box::new(type_ref(inner)))))
        }
    }
}

/// Renders a value literal as canonical SDL text.
///
/// Strings are re-quoted so that [`AppliedDirective::string_argument`] can
/// decode them; lists and objects are separated by `, `.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(flag) => flag.to_string(),
        Value::Enum(name) => name.to_string(),
        Value::Variable(name) => format!("${name}"),
        Value::String(text) => quote(text),
        Value::Int(int) => int.as_str().to_string(),
        Value::Float(float) => float.as_str().to_string(),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(|item| render_value(item)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(name, value)| format!("{name}: {}", render_value(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}
