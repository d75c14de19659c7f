//! Row selection scoped to the rendered page.
//!
//! Selection is stored as an id → selected map. "Select all" only ever
//! touches the ids passed in for the current page; ids marked from another
//! page context stay in the map until the owner calls [`Model::clear`],
//! which list screens do on every page or filter change.
//!
//! ```rust
//! use backoffice_widgets::selection::Model;
//!
//! let page = ["a", "b", "c"].map(String::from);
//! let mut selection = Model::new();
//!
//! assert!(selection.toggle_all(&page));
//! assert!(selection.is_all_selected(&page));
//!
//! assert!(!selection.toggle_one("b", &page));
//! assert!(selection.is_indeterminate(&page));
//! assert_eq!(selection.selected_ids(&page), ["a", "c"]);
//! ```

use std::collections::HashMap;

/// Applies "select all" to `page_ids` and returns the new select-all state.
///
/// With `select_all_state == false` every id is marked selected and `true`
/// is returned. With `true` exactly those ids are unmarked and `false` is
/// returned; other entries of `map` are left alone.
pub fn toggle_all_state(
    map: &mut HashMap<String, bool>,
    page_ids: &[String],
    select_all_state: bool,
) -> bool {
    if select_all_state {
        for id in page_ids {
            map.remove(id);
        }
        false
    } else {
        for id in page_ids {
            map.insert(id.clone(), true);
        }
        true
    }
}

/// Selection tracker state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    selected: HashMap<String, bool>,
    select_all: bool,
}

impl Model {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles every id of the current page and returns the new select-all
    /// state.
    ///
    /// Whether the page counts as fully selected is read from `page_ids`,
    /// not from the last toggle, so rows that appeared since then make this
    /// select the whole page again.
    pub fn toggle_all(&mut self, page_ids: &[String]) -> bool {
        let all = self.is_all_selected(page_ids);
        self.select_all = toggle_all_state(&mut self.selected, page_ids, all);
        self.select_all
    }

    /// Flips one id and returns whether the whole page is now selected.
    pub fn toggle_one(&mut self, id: &str, page_ids: &[String]) -> bool {
        let now = !self.is_selected(id);
        if now {
            self.selected.insert(id.to_string(), true);
        } else {
            self.selected.remove(id);
        }
        self.select_all = self.is_all_selected(page_ids);
        self.select_all
    }

    /// Reports whether `id` is marked selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    /// True iff the page is non-empty and every id on it is selected.
    pub fn is_all_selected(&self, page_ids: &[String]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.is_selected(id))
    }

    /// True iff some, but not all, ids on the page are selected.
    pub fn is_indeterminate(&self, page_ids: &[String]) -> bool {
        let count = self.selected_count(page_ids);
        count > 0 && count < page_ids.len()
    }

    /// Selected ids restricted to the page, in page order.
    pub fn selected_ids(&self, page_ids: &[String]) -> Vec<String> {
        page_ids
            .iter()
            .filter(|id| self.is_selected(id))
            .cloned()
            .collect()
    }

    /// Number of selected ids on the page.
    pub fn selected_count(&self, page_ids: &[String]) -> usize {
        page_ids.iter().filter(|id| self.is_selected(id)).count()
    }

    /// Returns true when nothing at all is selected.
    pub fn is_empty(&self) -> bool {
        !self.selected.values().any(|&v| v)
    }

    /// Drops every selection and the select-all flag.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.select_all = false;
    }

    /// Read-only view of the underlying map.
    pub fn as_map(&self) -> &HashMap<String, bool> {
        &self.selected
    }
}
