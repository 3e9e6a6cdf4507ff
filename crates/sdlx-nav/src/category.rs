//! Top-level entity categories and the cyclic selector over them.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A top-level group of schema entities the explorer can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Fields of the query root.
    Query,
    /// Fields of the mutation root.
    Mutation,
    /// Object types.
    Object,
    /// Input object types.
    Input,
    /// Enum types.
    Enum,
    /// Scalar types.
    Scalar,
    /// Interface types.
    Interface,
    /// Union types.
    Union,
    /// Directive definitions.
    Directive,
    /// Full-text search results.
    Search,
}

impl Category {
    /// Every category in selector order.
    pub const ALL: [Self; 10] = [
        Self::Query,
        Self::Mutation,
        Self::Object,
        Self::Input,
        Self::Enum,
        Self::Scalar,
        Self::Interface,
        Self::Union,
        Self::Directive,
        Self::Search,
    ];

    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Object => "Object",
            Self::Input => "Input",
            Self::Enum => "Enum",
            Self::Scalar => "Scalar",
            Self::Interface => "Interface",
            Self::Union => "Union",
            Self::Directive => "Directive",
            Self::Search => "Search",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for a string that names no category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses a label case-insensitively; plural forms such as `objects`
    /// are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let singular = match lower.as_str() {
            "queries" => "query",
            "mutations" => "mutation",
            "inputs" => "input",
            other => other.strip_suffix('s').unwrap_or(other),
        };
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(singular))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A fixed, ordered list of categories with a current pointer.
///
/// Moving past either end wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelector {
    /// Categories in cycle order; never empty.
    categories: Vec<Category>,
    /// Index of the current category.
    current: usize,
}

impl Default for CategorySelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CategorySelector {
    /// Creates a selector over every category, starting at `Query`.
    pub fn new() -> Self {
        Self {
            categories: Category::ALL.to_vec(),
            current: 0,
        }
    }

    /// Creates a selector over the schema categories only, without `Search`.
    pub fn browse_only() -> Self {
        Self {
            categories: Category::ALL
                .into_iter()
                .filter(|c| *c != Category::Search)
                .collect(),
            current: 0,
        }
    }

    /// Returns the current category.
    pub fn current(&self) -> Category {
        self.categories[self.current]
    }

    /// Returns all categories in cycle order.
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    /// Returns true if `category` is part of this selector.
    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Makes `category` current. Returns false if it is not in the selector.
    pub fn set(&mut self, category: Category) -> bool {
        match self.categories.iter().position(|c| *c == category) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Advances to the next category, wrapping to the first.
    pub fn next(&mut self) -> Category {
        self.current = (self.current + 1) % self.categories.len();
        self.current()
    }

    /// Steps back to the previous category, wrapping to the last.
    pub fn previous(&mut self) -> Category {
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or(self.categories.len() - 1);
        self.current()
    }
}
