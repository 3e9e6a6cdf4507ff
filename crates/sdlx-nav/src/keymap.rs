//! Global key bindings.
//!
//! Bindings are a static table so the help screen and key dispatch read the
//! same data, and a test can check that every action is reachable.

use serde::Serialize;

/// A navigation command triggered by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NavAction {
    /// Move focus to the next panel.
    Forward,
    /// Move focus to the previous panel.
    Backward,
    /// Open the selected item into the next panel.
    OpenSelected,
    /// Switch to the next category.
    NextCategory,
    /// Switch to the previous category.
    PreviousCategory,
    /// Switch to the search category.
    Search,
    /// Clear all panels and breadcrumbs.
    Reset,
}

impl NavAction {
    /// Every action.
    pub const ALL: [Self; 7] = [
        Self::Forward,
        Self::Backward,
        Self::OpenSelected,
        Self::NextCategory,
        Self::PreviousCategory,
        Self::Search,
        Self::Reset,
    ];
}

/// Keys bound to one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyBinding {
    /// Key names, as the terminal layer reports them.
    pub keys: &'static [&'static str],
    /// Action the keys trigger.
    pub action: NavAction,
    /// One-line help text.
    pub help: &'static str,
}

/// Bindings active in every panel.
pub const GLOBAL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["l", "right"],
        action: NavAction::Forward,
        help: "focus next panel",
    },
    KeyBinding {
        keys: &["h", "left"],
        action: NavAction::Backward,
        help: "focus previous panel",
    },
    KeyBinding {
        keys: &["enter"],
        action: NavAction::OpenSelected,
        help: "open selected item",
    },
    KeyBinding {
        keys: &["tab"],
        action: NavAction::NextCategory,
        help: "next category",
    },
    KeyBinding {
        keys: &["shift+tab"],
        action: NavAction::PreviousCategory,
        help: "previous category",
    },
    KeyBinding {
        keys: &["/"],
        action: NavAction::Search,
        help: "search",
    },
    KeyBinding {
        keys: &["ctrl+r"],
        action: NavAction::Reset,
        help: "reset panels",
    },
];

/// Finds the binding for a key name.
pub fn binding_for(key: &str) -> Option<&'static KeyBinding> {
    GLOBAL_BINDINGS
        .iter()
        .find(|binding| binding.keys.contains(&key))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_action_is_bound_once() {
        for action in NavAction::ALL {
            let count = GLOBAL_BINDINGS
                .iter()
                .filter(|b| b.action == action)
                .count();
            assert_eq!(count, 1, "{action:?}");
        }
        assert_eq!(GLOBAL_BINDINGS.len(), NavAction::ALL.len());
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = HashSet::new();
        for key in GLOBAL_BINDINGS.iter().flat_map(|b| b.keys) {
            assert!(seen.insert(*key), "duplicate key {key}");
        }
    }

    #[test]
    fn looks_up_keys() {
        assert_eq!(binding_for("right").unwrap().action, NavAction::Forward);
        assert_eq!(binding_for("h").unwrap().action, NavAction::Backward);
        assert_eq!(binding_for("/").unwrap().action, NavAction::Search);
        assert!(binding_for("q").is_none());
    }
}
