//! Capabilities the navigation stack needs from displayed content.

/// A navigable unit of displayed content.
pub trait Panel: Sized {
    /// Creates a panel with no content.
    fn empty() -> Self;

    /// Label of the selected item, pushed onto the breadcrumb trail when
    /// focus moves past this panel.
    fn selected_label(&self) -> Option<String>;

    /// Opens the selected item as a child panel.
    fn open_selected(&self) -> Option<Self>;
}

/// One selectable entry in a [`ListPanel`].
pub trait ListItem {
    /// Panel type produced when the item is opened.
    type Panel: Panel;

    /// Primary display text.
    fn title(&self) -> &str;

    /// Secondary display text.
    fn description(&self) -> &str;

    /// Text matched by panel filters. Defaults to the title.
    fn filter_value(&self) -> &str {
        self.title()
    }

    /// Name of the type this item refers to, for resolution by the adapter.
    fn type_name(&self) -> &str;

    /// Stable identity used for breadcrumbs and selection by name.
    fn ref_name(&self) -> &str;

    /// Opens the item's children, if it has any.
    fn open_panel(&self) -> Option<Self::Panel>;
}

/// A titled list of items with one selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPanel<I> {
    /// Heading shown above the list.
    title: String,
    /// Entries in display order.
    items: Vec<I>,
    /// Index of the selected entry; meaningless when `items` is empty.
    selected: usize,
}

impl<I> Default for ListPanel<I> {
    fn default() -> Self {
        Self {
            title: String::new(),
            items: Vec::new(),
            selected: 0,
        }
    }
}

impl<I> ListPanel<I> {
    /// Creates a panel with the first item selected.
    pub fn new(title: impl Into<String>, items: Vec<I>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
        }
    }

    /// Returns the panel heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns all entries.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Returns true if the panel has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the selected entry.
    pub fn selected(&self) -> Option<&I> {
        self.items.get(self.selected)
    }

    /// Returns the selected index, or `None` when the panel is empty.
    pub fn selected_index(&self) -> Option<usize> {
        (self.selected < self.items.len()).then_some(self.selected)
    }

    /// Selects the entry at `index`. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.selected = index;
        true
    }

    /// Moves the selection down one entry. Returns false at the end.
    pub fn select_next(&mut self) -> bool {
        self.select(self.selected + 1)
    }

    /// Moves the selection up one entry. Returns false at the start.
    pub fn select_previous(&mut self) -> bool {
        match self.selected.checked_sub(1) {
            Some(index) => self.select(index),
            None => false,
        }
    }
}

impl<I: ListItem> ListPanel<I> {
    /// Selects the first entry whose `ref_name` is `name`.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.items.iter().position(|item| item.ref_name() == name) {
            Some(index) => self.select(index),
            None => false,
        }
    }
}

impl<I: ListItem + Clone> ListPanel<I> {
    /// Returns a copy holding only entries whose filter value contains
    /// `query`, ignoring case. The selection follows the previously selected
    /// entry when it survives.
    pub fn filtered(&self, query: &str) -> Self {
        let needle = query.to_lowercase();
        let items: Vec<I> = self
            .items
            .iter()
            .filter(|item| item.filter_value().to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let mut panel = Self::new(self.title.clone(), items);
        if let Some(current) = self.selected() {
            panel.select_by_name(current.ref_name());
        }
        panel
    }
}

impl<I: ListItem<Panel = ListPanel<I>>> Panel for ListPanel<I> {
    fn empty() -> Self {
        Self::default()
    }

    fn selected_label(&self) -> Option<String> {
        self.selected().map(|item| item.ref_name().to_string())
    }

    fn open_selected(&self) -> Option<Self> {
        self.selected()?.open_panel()
    }
}
