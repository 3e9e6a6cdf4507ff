//! sdlx: a GraphQL schema explorer.
//!
//! sdlx loads a schema definition file and lets you browse it the way a
//! multi-panel explorer would: list the types of a category, drill from a
//! field into its type, see every place a type is referenced, and search
//! names, paths and descriptions through a per-schema full-text index.

#![warn(missing_docs)]

pub mod cli;
pub mod logging;
