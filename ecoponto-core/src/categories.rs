//! Multi-select state over the collection category catalog.

use crate::model::{Category, CategoryId};

/// Set of selected collection categories, in selection order.
///
/// The available universe is installed once from the catalog; toggling an
/// identifier the catalog does not know is rejected rather than silently
/// accepted.
#[derive(Debug, Default)]
pub struct CategorySelection {
    universe: Vec<Category>,
    selected: Vec<CategoryId>,
}

impl CategorySelection {
    /// Create a selection over the given catalog, nothing selected.
    #[must_use]
    pub fn new(universe: Vec<Category>) -> Self {
        Self {
            universe,
            selected: Vec::new(),
        }
    }

    /// The full catalog, in catalog order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.universe
    }

    /// Whether the category is currently selected.
    #[must_use]
    pub fn contains(&self, id: CategoryId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected identifiers in the order they were toggled on.
    #[must_use]
    pub fn selected_ids(&self) -> &[CategoryId] {
        &self.selected
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle a category: remove it when selected, append it otherwise.
    ///
    /// Identifiers outside the catalog are rejected. Returns whether the
    /// selection changed.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        if !self.universe.iter().any(|category| category.id == id) {
            return false;
        }

        if let Some(index) = self.selected.iter().position(|entry| *entry == id) {
            self.selected.remove(index);
        } else {
            self.selected.push(id);
        }
        true
    }
}
