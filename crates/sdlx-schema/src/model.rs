//! Typed schema definitions.
//!
//! [`TypeDefinition`] is a closed enum over the six named-type kinds; code that
//! needs to handle every kind matches on it exhaustively.

use std::fmt;

use serde::Serialize;

/// Built-in scalar names that are never user-defined.
pub const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// Built-in directive names that are never user-defined.
pub const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "oneOf"];

/// Reason reported for `@deprecated` without an explicit `reason` argument.
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Returns true if `name` is a built-in scalar.
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Returns true if `name` (with or without `@`) is a built-in directive.
pub fn is_builtin_directive(name: &str) -> bool {
    BUILTIN_DIRECTIVES.contains(&name.trim_start_matches('@'))
}

/// A declared type, possibly wrapped in list and non-null modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeRef {
    /// A named type.
    Named(String),
    /// A list of the inner type.
    List(Box<Self>),
    /// A non-null inner type.
    NonNull(Box<Self>),
}

impl TypeRef {
    /// Creates a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the named type after stripping every list and non-null wrapper.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }

    /// Returns true if the outermost modifier is non-null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Returns true if the type is a list, ignoring an outer non-null.
    pub fn is_list(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::NonNull(inner) => inner.is_list(),
            Self::Named(_) => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// One argument passed to an applied directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveArgument {
    /// Argument name.
    pub name: String,
    /// Canonical SDL literal, e.g. `"text"`, `42`, `[A, B]`.
    pub value: String,
}

/// A directive applied to a definition, such as `@deprecated(reason: "x")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedDirective {
    /// Directive name without the `@`.
    pub name: String,
    /// Arguments in source order.
    pub arguments: Vec<DirectiveArgument>,
}

impl AppliedDirective {
    /// Returns the literal value of an argument.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns an argument's value decoded as a string, if it is a string literal.
    pub fn string_argument(&self, name: &str) -> Option<String> {
        self.argument(name).and_then(unquote)
    }
}

impl fmt::Display for AppliedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.arguments.is_empty() {
            let args: Vec<String> = self
                .arguments
                .iter()
                .map(|a| format!("{}: {}", a.name, a.value))
                .collect();
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}

/// Returns the deprecation reason if `@deprecated` is among `directives`.
fn deprecation(directives: &[AppliedDirective]) -> Option<String> {
    directives
        .iter()
        .find(|d| d.name == "deprecated")
        .map(|d| {
            d.string_argument("reason")
                .unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string())
        })
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputValue {
    /// Name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Default value as a canonical SDL literal.
    pub default_value: Option<String>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

impl InputValue {
    /// Returns true if the value carries `@deprecated`.
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason().is_some()
    }

    /// Returns the deprecation reason, if deprecated.
    pub fn deprecation_reason(&self) -> Option<String> {
        deprecation(&self.directives)
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// A field of an object or interface type (or of a root operation type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Declared result type.
    pub ty: TypeRef,
    /// Arguments in source order.
    pub arguments: Vec<InputValue>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

impl Field {
    /// Renders the field as `name(arg: Type): Result`.
    pub fn signature(&self) -> String {
        if self.arguments.is_empty() {
            return format!("{}: {}", self.name, self.ty);
        }
        let args: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
        format!("{}({}): {}", self.name, args.join(", "), self.ty)
    }

    /// Returns the argument with the given name.
    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Returns true if the field carries `@deprecated`.
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason().is_some()
    }

    /// Returns the deprecation reason, if deprecated.
    pub fn deprecation_reason(&self) -> Option<String> {
        deprecation(&self.directives)
    }
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

impl EnumValue {
    /// Returns true if the value carries `@deprecated`.
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason().is_some()
    }

    /// Returns the deprecation reason, if deprecated.
    pub fn deprecation_reason(&self) -> Option<String> {
        deprecation(&self.directives)
    }
}

/// Shape shared by object and interface types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectType {
    /// Type name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Implemented interface names in source order.
    pub interfaces: Vec<String>,
    /// Fields in source order.
    pub fields: Vec<Field>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// A union type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionType {
    /// Type name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Member type names in source order.
    pub members: Vec<String>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// An enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumType {
    /// Type name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Values in source order.
    pub values: Vec<EnumValue>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// A custom scalar type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarType {
    /// Type name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// An input object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputObjectType {
    /// Type name.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Input fields in source order.
    pub fields: Vec<InputValue>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// Discriminant of a [`TypeDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TypeKind {
    /// Object type.
    Object,
    /// Interface type.
    Interface,
    /// Union type.
    Union,
    /// Enum type.
    Enum,
    /// Scalar type.
    Scalar,
    /// Input object type.
    InputObject,
}

impl TypeKind {
    /// Returns the SDL keyword that introduces this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Object => "type",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Scalar => "scalar",
            Self::InputObject => "input",
        }
    }

    /// Returns the kind introduced by an SDL keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "type" => Some(Self::Object),
            "interface" => Some(Self::Interface),
            "union" => Some(Self::Union),
            "enum" => Some(Self::Enum),
            "scalar" => Some(Self::Scalar),
            "input" => Some(Self::InputObject),
            _ => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Object => "Object",
            Self::Interface => "Interface",
            Self::Union => "Union",
            Self::Enum => "Enum",
            Self::Scalar => "Scalar",
            Self::InputObject => "Input",
        };
        f.write_str(s)
    }
}

/// A named type defined in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum TypeDefinition {
    /// `type X { ... }`
    Object(ObjectType),
    /// `interface X { ... }`
    Interface(ObjectType),
    /// `union X = A | B`
    Union(UnionType),
    /// `enum X { ... }`
    Enum(EnumType),
    /// `scalar X`
    Scalar(ScalarType),
    /// `input X { ... }`
    InputObject(InputObjectType),
}

impl TypeDefinition {
    /// Returns the type name.
    pub fn name(&self) -> &str {
        match self {
            Self::Object(t) | Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::Scalar(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }

    /// Returns the description, empty when absent.
    pub fn description(&self) -> &str {
        match self {
            Self::Object(t) | Self::Interface(t) => &t.description,
            Self::Union(t) => &t.description,
            Self::Enum(t) => &t.description,
            Self::Scalar(t) => &t.description,
            Self::InputObject(t) => &t.description,
        }
    }

    /// Returns the kind discriminant.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::Scalar(_) => TypeKind::Scalar,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Returns the output fields of objects and interfaces; empty otherwise.
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Object(t) | Self::Interface(t) => &t.fields,
            Self::Union(_) | Self::Enum(_) | Self::Scalar(_) | Self::InputObject(_) => &[],
        }
    }

    /// Returns the input fields of input objects; empty otherwise.
    pub fn input_fields(&self) -> &[InputValue] {
        match self {
            Self::InputObject(t) => &t.fields,
            Self::Object(_) | Self::Interface(_) | Self::Union(_) | Self::Enum(_) | Self::Scalar(_) => &[],
        }
    }

    /// Returns the directives applied to the type itself.
    pub fn directives(&self) -> &[AppliedDirective] {
        match self {
            Self::Object(t) | Self::Interface(t) => &t.directives,
            Self::Union(t) => &t.directives,
            Self::Enum(t) => &t.directives,
            Self::Scalar(t) => &t.directives,
            Self::InputObject(t) => &t.directives,
        }
    }

    /// Returns the field with the given name, for objects and interfaces.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }
}

/// A `directive @name(...) on ...` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveDefinition {
    /// Directive name without the `@`.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Arguments in source order.
    pub arguments: Vec<InputValue>,
    /// Whether the directive may be applied more than once per location.
    pub repeatable: bool,
    /// Valid locations in source order, e.g. `FIELD_DEFINITION`.
    pub locations: Vec<String>,
}

/// Renders a string as a quoted SDL string literal.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decodes a quoted SDL string literal produced by [`quote`].
///
/// Returns `None` if `literal` is not a string literal.
fn unquote(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            other => out.push(other),
        }
    }
    Some(out)
}
