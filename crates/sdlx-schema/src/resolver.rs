//! Name resolution over a [`SchemaModel`].

use crate::{
    error::{LookupKind, NotFoundError},
    model::{DirectiveDefinition, Field, InputValue, TypeDefinition},
    schema::{RootOperation, SchemaModel},
    usage::Usage,
};

/// Resolves raw references to their definitions.
///
/// Borrowed from a model and handed to each consumer that needs lookups.
/// Built-in scalars and directives are not defined in the model, so resolving
/// them fails exactly like a typo does; see [`NotFoundError::is_builtin`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    /// The model lookups run against.
    model: &'a SchemaModel,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over `model`.
    pub fn new(model: &'a SchemaModel) -> Self {
        Self { model }
    }

    /// Returns the underlying model.
    pub fn model(&self) -> &'a SchemaModel {
        self.model
    }

    /// Resolves a type by name.
    pub fn resolve_type(&self, name: &str) -> Result<&'a TypeDefinition, NotFoundError> {
        self.model
            .get_type(name)
            .ok_or_else(|| NotFoundError::new(LookupKind::Type, name))
    }

    /// Resolves a field's declared type, ignoring list and non-null wrappers.
    pub fn resolve_field_type(&self, field: &Field) -> Result<&'a TypeDefinition, NotFoundError> {
        self.resolve_type(field.ty.base_name())
    }

    /// Resolves an argument's or input field's declared type.
    pub fn resolve_argument_type(
        &self,
        argument: &InputValue,
    ) -> Result<&'a TypeDefinition, NotFoundError> {
        self.resolve_type(argument.ty.base_name())
    }

    /// Resolves a directive by name, with or without the leading `@`.
    pub fn resolve_directive(&self, name: &str) -> Result<&'a DirectiveDefinition, NotFoundError> {
        let name = name.trim_start_matches('@');
        self.model
            .get_directive(name)
            .ok_or_else(|| NotFoundError::new(LookupKind::Directive, name))
    }

    /// Returns every usage of a type. Never fails.
    pub fn resolve_usages(&self, name: &str) -> &'a [Usage] {
        self.model.usages(name)
    }

    /// Resolves a field of the query or mutation root.
    pub fn resolve_query_or_mutation_field(
        &self,
        root: RootOperation,
        field: &str,
    ) -> Result<&'a Field, NotFoundError> {
        let kind = match root {
            RootOperation::Query => LookupKind::QueryField,
            RootOperation::Mutation => LookupKind::MutationField,
        };
        self.model
            .root_fields(root)
            .iter()
            .find(|f| f.name == field)
            .ok_or_else(|| NotFoundError::new(kind, field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;

    const SOURCE: &str = r#"
        type Query { user(id: ID!): User search(filter: Filter): [User!]! }
        type Mutation { rename(id: ID!, name: String!): User }
        type User { id: ID! name: String! friends: [User!]! joined: Date }
        input Filter { name: String }
        scalar Date
        directive @auth(role: String) on FIELD_DEFINITION
    "#;

    fn model() -> SchemaModel {
        SchemaModel::parse(SOURCE).unwrap()
    }

    #[test]
    fn resolves_types_through_wrappers() {
        let model = model();
        let resolver = Resolver::new(&model);

        let user = resolver.resolve_type("User").unwrap();
        let friends = user.field("friends").unwrap();
        assert_eq!(resolver.resolve_field_type(friends).unwrap().name(), "User");

        let joined = user.field("joined").unwrap();
        assert_eq!(
            resolver.resolve_field_type(joined).unwrap().kind(),
            TypeKind::Scalar
        );
    }

    #[test]
    fn resolves_argument_types() {
        let model = model();
        let resolver = Resolver::new(&model);

        let search = resolver
            .resolve_query_or_mutation_field(RootOperation::Query, "search")
            .unwrap();
        let filter = resolver.resolve_argument_type(&search.arguments[0]).unwrap();
        assert_eq!(filter.kind(), TypeKind::InputObject);

        let user = resolver
            .resolve_query_or_mutation_field(RootOperation::Query, "user")
            .unwrap();
        let err = resolver.resolve_argument_type(&user.arguments[0]).unwrap_err();
        assert!(err.is_builtin());
    }

    #[test]
    fn builtin_and_typo_fail_alike() {
        let model = model();
        let resolver = Resolver::new(&model);

        let builtin = resolver.resolve_type("String").unwrap_err();
        let typo = resolver.resolve_type("TrulyUnknownType").unwrap_err();
        assert_eq!(builtin.kind, typo.kind);
        assert!(builtin.is_builtin());
        assert!(!typo.is_builtin());
    }

    #[test]
    fn resolves_directives_with_or_without_at() {
        let model = model();
        let resolver = Resolver::new(&model);

        assert_eq!(resolver.resolve_directive("@auth").unwrap().name, "auth");
        assert_eq!(resolver.resolve_directive("auth").unwrap().name, "auth");

        let err = resolver.resolve_directive("@unknownDirective").unwrap_err();
        assert_eq!(err.name, "unknownDirective");
        assert!(!err.is_builtin());
        assert!(resolver.resolve_directive("@deprecated").unwrap_err().is_builtin());
    }

    #[test]
    fn resolves_root_fields_separately() {
        let model = model();
        let resolver = Resolver::new(&model);

        let rename = resolver
            .resolve_query_or_mutation_field(RootOperation::Mutation, "rename")
            .unwrap();
        assert_eq!(rename.arguments.len(), 2);

        let err = resolver
            .resolve_query_or_mutation_field(RootOperation::Query, "rename")
            .unwrap_err();
        assert_eq!(err.kind, LookupKind::QueryField);
        assert_eq!(err.to_string(), "query field not found: rename");

        assert!(resolver.resolve_type("Query").is_err());
    }

    #[test]
    fn usages_never_fail() {
        let model = model();
        let resolver = Resolver::new(&model);
        assert_eq!(resolver.resolve_usages("User").len(), 4);
        assert!(resolver.resolve_usages("NeverReferenced").is_empty());
    }
}
