//! The panel stack, breadcrumb trail and category state.

use tracing::trace;

use crate::{
    category::{Category, CategorySelector},
    keymap::NavAction,
    panel::Panel,
};

/// Traversal state of the explorer.
///
/// Panels form a stack with a focused `position`. Opening a panel appends it
/// after the focused one, discarding anything that followed, so the stack
/// behaves like browser history. Whenever the stack is non-empty,
/// `position < len`. Operations at a boundary return `false` and change
/// nothing.
#[derive(Debug, Clone)]
pub struct NavigationManager<P> {
    /// Opened panels, oldest first.
    panels: Vec<P>,
    /// Index of the focused panel.
    position: usize,
    /// One label per forward step.
    breadcrumbs: Vec<String>,
    /// Current top-level category.
    selector: CategorySelector,
    /// Number of empty panels a reset creates.
    visible_panel_count: usize,
}

impl<P: Panel> NavigationManager<P> {
    /// Creates a manager over every category with `visible_panel_count`
    /// empty panels.
    pub fn new(visible_panel_count: usize) -> Self {
        Self::with_selector(visible_panel_count, CategorySelector::new())
    }

    /// Creates a manager with a custom category selector.
    pub fn with_selector(visible_panel_count: usize, selector: CategorySelector) -> Self {
        let mut manager = Self {
            panels: Vec::new(),
            position: 0,
            breadcrumbs: Vec::new(),
            selector,
            visible_panel_count,
        };
        manager.reset();
        manager
    }

    /// Replaces the stack with fresh empty panels and clears breadcrumbs.
    pub fn reset(&mut self) {
        self.panels = (0..self.visible_panel_count).map(|_| P::empty()).collect();
        self.position = 0;
        self.breadcrumbs.clear();
        trace!(
            panels = self.visible_panel_count,
            category = %self.selector.current(),
            "navigation reset"
        );
    }

    /// Appends `panel` after the focused panel, discarding any panels that
    /// followed it. Focus does not move.
    pub fn open_panel(&mut self, panel: P) {
        if self.position + 1 < self.panels.len() {
            self.panels.truncate(self.position + 1);
        }
        self.panels.push(panel);
    }

    /// Opens the focused panel's selected item. Returns false if there is
    /// nothing to open.
    pub fn open_selected(&mut self) -> bool {
        match self.current_panel().and_then(P::open_selected) {
            Some(panel) => {
                self.open_panel(panel);
                true
            }
            None => false,
        }
    }

    /// Moves focus to the next panel, recording the selected label.
    pub fn navigate_forward(&mut self) -> bool {
        if self.position + 1 >= self.panels.len() {
            return false;
        }
        if let Some(label) = self.panels[self.position].selected_label() {
            self.breadcrumbs.push(label);
        }
        self.position += 1;
        true
    }

    /// Moves focus to the previous panel, dropping one breadcrumb.
    pub fn navigate_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        self.breadcrumbs.pop();
        true
    }

    /// Switches to `category` and resets the stack. Returns false if the
    /// selector does not offer it.
    pub fn switch_category(&mut self, category: Category) -> bool {
        if !self.selector.set(category) {
            return false;
        }
        self.reset();
        true
    }

    /// Switches to the next category, wrapping around, and resets the stack.
    pub fn cycle_category_forward(&mut self) -> Category {
        let category = self.selector.next();
        self.reset();
        category
    }

    /// Switches to the previous category, wrapping around, and resets the stack.
    pub fn cycle_category_backward(&mut self) -> Category {
        let category = self.selector.previous();
        self.reset();
        category
    }

    /// Replaces the focused panel in place. Returns false if the stack is empty.
    pub fn set_current_panel(&mut self, panel: P) -> bool {
        match self.panels.get_mut(self.position) {
            Some(slot) => {
                *slot = panel;
                true
            }
            None => false,
        }
    }

    /// Runs the operation bound to `action`.
    pub fn apply(&mut self, action: NavAction) -> bool {
        match action {
            NavAction::Forward => self.navigate_forward(),
            NavAction::Backward => self.navigate_backward(),
            NavAction::OpenSelected => self.open_selected(),
            NavAction::NextCategory => {
                self.cycle_category_forward();
                true
            }
            NavAction::PreviousCategory => {
                self.cycle_category_backward();
                true
            }
            NavAction::Search => self.switch_category(Category::Search),
            NavAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Returns the focused panel.
    pub fn current_panel(&self) -> Option<&P> {
        self.panels.get(self.position)
    }

    /// Returns the focused panel mutably.
    pub fn current_panel_mut(&mut self) -> Option<&mut P> {
        self.panels.get_mut(self.position)
    }

    /// Returns the panel after the focused one.
    pub fn next_panel(&self) -> Option<&P> {
        self.panels.get(self.position + 1)
    }

    /// Returns the panels on screen: up to `visible_panel_count` starting at
    /// the focused panel.
    pub fn visible_panels(&self) -> &[P] {
        let start = self.position.min(self.panels.len());
        let end = (start + self.visible_panel_count).min(self.panels.len());
        &self.panels[start..end]
    }

    /// Returns the focused position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of panels on the stack.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns true if the stack holds no panels.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Returns the breadcrumb trail.
    pub fn breadcrumbs(&self) -> &[String] {
        &self.breadcrumbs
    }

    /// Returns the current category.
    pub fn current_category(&self) -> Category {
        self.selector.current()
    }

    /// Returns every category in cycle order.
    pub fn all_categories(&self) -> &[Category] {
        self.selector.all()
    }

    /// Returns the number of panels a reset creates.
    pub fn visible_panel_count(&self) -> usize {
        self.visible_panel_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Panel that opens a child named after its label.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Page {
        name: String,
        label: Option<String>,
    }

    fn page(name: &str) -> Page {
        Page {
            name: name.to_string(),
            label: Some(format!("{name}-item")),
        }
    }

    impl Panel for Page {
        fn empty() -> Self {
            Self {
                name: String::new(),
                label: None,
            }
        }

        fn selected_label(&self) -> Option<String> {
            self.label.clone()
        }

        fn open_selected(&self) -> Option<Self> {
            self.label.as_deref().map(page)
        }
    }

    fn names(nav: &NavigationManager<Page>) -> Vec<String> {
        nav.panels.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn starts_with_empty_panels() {
        let nav = NavigationManager::<Page>::new(3);
        assert_eq!(nav.len(), 3);
        assert_eq!(nav.position(), 0);
        assert!(nav.breadcrumbs().is_empty());
        assert_eq!(nav.current_category(), Category::Query);
        assert_eq!(nav.current_panel(), Some(&Page::empty()));
    }

    #[test]
    fn open_truncates_after_position() {
        let mut nav = NavigationManager::new(0);
        nav.open_panel(page("a"));
        nav.open_panel(page("b"));
        assert!(nav.navigate_forward());
        nav.open_panel(page("c"));
        assert!(nav.navigate_forward());
        assert!(nav.navigate_backward());
        assert_eq!(nav.len(), 3);
        assert_eq!(nav.position(), 1);

        nav.open_panel(page("d"));
        assert_eq!(nav.len(), 3);
        assert_eq!(names(&nav), ["a", "b", "d"]);
        assert_eq!(nav.position(), 1);
    }

    #[test]
    fn open_at_end_appends() {
        let mut nav = NavigationManager::new(0);
        assert!(nav.current_panel().is_none());

        nav.open_panel(page("a"));
        assert_eq!(nav.len(), 1);
        assert_eq!(nav.position(), 0);
        assert_eq!(nav.current_panel().unwrap().name, "a");
        assert!(nav.next_panel().is_none());
    }

    #[test]
    fn open_replaces_sibling_in_fixed_width_stack() {
        let mut nav = NavigationManager::new(2);
        nav.set_current_panel(page("root"));

        nav.open_panel(page("first"));
        nav.open_panel(page("second"));
        assert_eq!(names(&nav), ["root", "second"]);
        assert_eq!(nav.next_panel().unwrap().name, "second");
    }

    #[test]
    fn forward_and_backward_respect_bounds() {
        let mut nav = NavigationManager::<Page>::new(2);
        assert!(!nav.navigate_backward());
        assert_eq!(nav.position(), 0);

        assert!(nav.navigate_forward());
        assert_eq!(nav.position(), 1);

        assert!(!nav.navigate_forward());
        assert_eq!(nav.position(), 1);
        assert!(nav.breadcrumbs().is_empty());
    }

    #[test]
    fn breadcrumbs_follow_navigation() {
        let mut nav = NavigationManager::new(1);
        nav.set_current_panel(page("root"));

        for _ in 0..3 {
            assert!(nav.open_selected());
            assert!(nav.navigate_forward());
        }
        assert_eq!(
            nav.breadcrumbs(),
            ["root-item", "root-item-item", "root-item-item-item"]
        );
        assert_eq!(nav.position(), 3);

        for _ in 0..3 {
            assert!(nav.navigate_backward());
        }
        assert!(nav.breadcrumbs().is_empty());
        assert_eq!(nav.position(), 0);
    }

    #[test]
    fn forward_without_selection_pushes_no_label() {
        let mut nav = NavigationManager::<Page>::new(2);
        assert!(nav.navigate_forward());
        assert!(nav.breadcrumbs().is_empty());
        assert!(nav.navigate_backward());
        assert!(nav.breadcrumbs().is_empty());
    }

    #[test]
    fn open_selected_requires_a_selection() {
        let mut nav = NavigationManager::<Page>::new(2);
        assert!(!nav.open_selected());

        let mut empty = NavigationManager::<Page>::new(0);
        assert!(!empty.open_selected());
        assert!(!empty.set_current_panel(page("x")));
    }

    #[test]
    fn category_changes_reset_state() {
        let mut nav = NavigationManager::new(2);
        nav.set_current_panel(page("root"));
        nav.open_selected();
        nav.navigate_forward();
        assert_eq!(nav.breadcrumbs().len(), 1);

        assert!(nav.switch_category(Category::Enum));
        assert_eq!(nav.current_category(), Category::Enum);
        assert!(nav.breadcrumbs().is_empty());
        assert_eq!(nav.position(), 0);
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.current_panel(), Some(&Page::empty()));

        assert_eq!(nav.cycle_category_forward(), Category::Scalar);
        assert_eq!(nav.cycle_category_backward(), Category::Enum);
    }

    #[test]
    fn switch_to_missing_category_is_noop() {
        let mut nav = NavigationManager::with_selector(2, CategorySelector::browse_only());
        nav.set_current_panel(page("root"));
        nav.open_selected();
        nav.navigate_forward();

        assert!(!nav.switch_category(Category::Search));
        assert_eq!(nav.current_category(), Category::Query);
        assert_eq!(nav.position(), 1);
        assert_eq!(nav.breadcrumbs(), ["root-item"]);
    }

    #[test]
    fn categories_wrap_both_ways() {
        let mut nav = NavigationManager::<Page>::with_selector(1, CategorySelector::browse_only());
        assert_eq!(nav.all_categories().len(), 9);

        for _ in 0..9 {
            nav.cycle_category_forward();
        }
        assert_eq!(nav.current_category(), Category::Query);
        assert_eq!(nav.cycle_category_backward(), Category::Directive);
    }

    #[test]
    fn visible_panels_start_at_focus() {
        let mut nav = NavigationManager::new(2);
        nav.set_current_panel(page("root"));
        nav.open_selected();
        nav.navigate_forward();
        nav.open_selected();

        let visible: Vec<_> = nav.visible_panels().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(visible, ["root-item", "root-item-item"]);
    }

    #[test]
    fn actions_dispatch_to_operations() {
        let mut nav = NavigationManager::new(2);
        nav.set_current_panel(page("root"));

        assert!(nav.apply(NavAction::OpenSelected));
        assert!(nav.apply(NavAction::Forward));
        assert!(!nav.apply(NavAction::Forward));
        assert!(nav.apply(NavAction::Backward));
        assert!(nav.apply(NavAction::Search));
        assert_eq!(nav.current_category(), Category::Search);
        assert!(nav.apply(NavAction::NextCategory));
        assert_eq!(nav.current_category(), Category::Query);
        assert!(nav.apply(NavAction::PreviousCategory));
        assert_eq!(nav.current_category(), Category::Search);
        assert!(nav.apply(NavAction::Reset));
        assert_eq!(nav.len(), 2);
    }
}
