//! GraphQL SDL parsing and schema model for sdlx.
//!
//! This crate turns schema definition text into an immutable, queryable model:
//!
//! - **Parsing**: `apollo-compiler` parses the document, which is then
//!   lowered into model types with value literals rendered as SDL text
//! - **Model**: named types as a closed [`TypeDefinition`] enum, with the
//!   query and mutation roots held as plain field lists
//! - **Usages**: a reverse index from each type to every place referencing it
//! - **Resolution**: [`Resolver`] maps raw references to definitions
//!
//! # Example
//!
//! ```
//! use sdlx_schema::{Resolver, SchemaModel};
//!
//! let model = SchemaModel::parse(
//!     "type Query { user(id: ID!): User } type User { id: ID! friends: [User!]! }",
//! )
//! .unwrap();
//!
//! let resolver = Resolver::new(&model);
//! let paths: Vec<_> = resolver
//!     .resolve_usages("User")
//!     .iter()
//!     .map(|u| u.path.as_str())
//!     .collect();
//! assert_eq!(paths, ["Query.user", "User.friends"]);
//! assert!(resolver.resolve_type("ID").unwrap_err().is_builtin());
//! ```

#![warn(missing_docs)]

mod error;
mod model;
mod resolver;
mod schema;
mod sdl;
mod usage;

pub use error::{LookupKind, NotFoundError, SchemaError};
pub use model::{
    AppliedDirective, BUILTIN_DIRECTIVES, BUILTIN_SCALARS, DEFAULT_DEPRECATION_REASON,
    DirectiveArgument, DirectiveDefinition, EnumType, EnumValue, Field, InputObjectType,
    InputValue, ObjectType, ScalarType, TypeDefinition, TypeKind, TypeRef, UnionType,
    is_builtin_directive, is_builtin_scalar,
};
pub use resolver::Resolver;
pub use schema::{DEFAULT_MUTATION_TYPE, DEFAULT_QUERY_TYPE, RootOperation, SchemaModel};
pub use usage::{ParentKind, Usage, UsageIndex};
