//! Navigation state for a multi-panel schema explorer.
//!
//! The explorer shows a row of panels. Selecting an item in one panel opens
//! its children in the next, and the user moves focus along the row. This
//! crate tracks that traversal without knowing anything about schemas:
//!
//! - [`NavigationManager`] holds a truncating stack of panels, the focused
//!   position and a breadcrumb trail.
//! - [`CategorySelector`] cycles through the top-level [`Category`] list.
//! - [`GLOBAL_BINDINGS`] maps key names to [`NavAction`]s.
//!
//! Panels are supplied by an adapter through the [`Panel`] and [`ListItem`]
//! traits. [`ListPanel`] is a ready-made panel over a list of items.
//!
//! # Example
//!
//! ```
//! use sdlx_nav::{ListItem, ListPanel, NavigationManager, Panel};
//!
//! #[derive(Clone)]
//! struct Item(&'static str);
//!
//! impl ListItem for Item {
//!     type Panel = ListPanel<Self>;
//!
//!     fn title(&self) -> &str { self.0 }
//!     fn description(&self) -> &str { "" }
//!     fn type_name(&self) -> &str { self.0 }
//!     fn ref_name(&self) -> &str { self.0 }
//!     fn open_panel(&self) -> Option<ListPanel<Self>> {
//!         Some(ListPanel::new(self.0, vec![Item("child")]))
//!     }
//! }
//!
//! let mut nav = NavigationManager::new(2);
//! nav.set_current_panel(ListPanel::new("root", vec![Item("User")]));
//! assert!(nav.open_selected());
//! assert!(nav.navigate_forward());
//! assert_eq!(nav.breadcrumbs(), ["User"]);
//! ```

#![warn(missing_docs)]

mod category;
mod keymap;
mod manager;
mod panel;

pub use category::{Category, CategorySelector, UnknownCategory};
pub use keymap::{GLOBAL_BINDINGS, KeyBinding, NavAction, binding_for};
pub use manager::NavigationManager;
pub use panel::{ListItem, ListPanel, Panel};
