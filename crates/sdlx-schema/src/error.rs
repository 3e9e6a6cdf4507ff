//! Error types for schema loading and name resolution.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::model::{is_builtin_directive, is_builtin_scalar};

/// Errors that can occur while loading a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Failed to read the schema source from disk.
    #[error("failed to read schema {path}: {source}")]
    Read {
        /// Path to the schema file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The source text is not valid SDL.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        /// Error message.
        message: String,
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
    },

    /// An executable definition (operation or fragment) appeared in a schema document.
    #[error("unsupported definition '{keyword}' at {line}:{column}: schema documents may only contain type system definitions")]
    UnsupportedDefinition {
        /// The keyword or punctuation that started the definition.
        keyword: String,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// A type or directive is defined more than once.
    #[error("duplicate {kind} definition: {name}")]
    DuplicateDefinition {
        /// What was duplicated ("type" or "directive").
        kind: &'static str,
        /// The duplicated name.
        name: String,
    },

    /// An extension targets a type that is never defined.
    #[error("cannot extend undefined type: {name}")]
    UnknownExtension {
        /// Name of the extended type.
        name: String,
    },

    /// An extension uses a different kind than the type it extends.
    #[error("cannot extend {expected} {name}: extension is declared as {found}")]
    ExtensionMismatch {
        /// Name of the extended type.
        name: String,
        /// Kind of the original definition.
        expected: String,
        /// Kind used by the extension.
        found: String,
    },
}

impl SchemaError {
    /// Creates a syntax error at a source position.
    pub(crate) fn syntax(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    /// Returns true for errors caused by malformed source text.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::UnsupportedDefinition { .. })
    }
}

/// What kind of name a failed lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// A named type.
    Type,
    /// A directive definition.
    Directive,
    /// A field on the Query root.
    QueryField,
    /// A field on the Mutation root.
    MutationField,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Type => "type",
            Self::Directive => "directive",
            Self::QueryField => "query field",
            Self::MutationField => "mutation field",
        };
        f.write_str(s)
    }
}

/// A name did not resolve to a user-defined definition.
///
/// Built-in scalars and directives always produce this error. Use
/// [`NotFoundError::is_builtin`] to tell them apart from genuine typos.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} not found: {name}")]
pub struct NotFoundError {
    /// Kind of lookup that failed.
    pub kind: LookupKind,
    /// The name that was looked up.
    pub name: String,
}

impl NotFoundError {
    /// Creates a not-found error.
    pub(crate) fn new(kind: LookupKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Returns true when the name refers to a built-in scalar or directive.
    pub fn is_builtin(&self) -> bool {
        match self.kind {
            LookupKind::Type => is_builtin_scalar(&self.name),
            LookupKind::Directive => is_builtin_directive(&self.name),
            LookupKind::QueryField | LookupKind::MutationField => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display_has_position() {
        let err = SchemaError::syntax("expected ':'", 3, 14);
        assert_eq!(err.to_string(), "syntax error at 3:14: expected ':'");
        assert!(err.is_syntax());
    }

    #[test]
    fn duplicate_is_not_syntax() {
        let err = SchemaError::DuplicateDefinition {
            kind: "type",
            name: "User".into(),
        };
        assert!(!err.is_syntax());
        assert!(err.to_string().contains("User"));
    }

    #[test]
    fn builtin_scalars_are_flagged() {
        assert!(NotFoundError::new(LookupKind::Type, "String").is_builtin());
        assert!(NotFoundError::new(LookupKind::Type, "ID").is_builtin());
        assert!(!NotFoundError::new(LookupKind::Type, "Strnig").is_builtin());
    }

    #[test]
    fn builtin_directives_are_flagged() {
        assert!(NotFoundError::new(LookupKind::Directive, "deprecated").is_builtin());
        assert!(!NotFoundError::new(LookupKind::Directive, "auth").is_builtin());
    }

    #[test]
    fn root_field_lookups_are_never_builtin() {
        assert!(!NotFoundError::new(LookupKind::QueryField, "String").is_builtin());
    }
}
