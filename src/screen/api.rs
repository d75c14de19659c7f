//! Programmatic operations on list screens.
//!
//! Everything the key handler does is also reachable here, so hosts can
//! drive a screen from their own widgets or from tests.

use super::types::{ConfirmPrompt, PendingAction, ScreenConfig};
use super::Model;
use crate::error::Error;
use crate::filter::{FilterCriteria, MonthFilter};
use crate::item::Item;
use crate::paginator::paginate;
use crate::sync::SyncController;
use bubbletea_rs::Cmd;

impl<I: Item> Model<I> {
    /// The screen's configuration.
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// The underlying sync controller.
    pub fn sync(&self) -> &SyncController<I> {
        &self.sync
    }

    /// Every item in the snapshot.
    pub fn items(&self) -> &[I] {
        self.sync.items()
    }

    /// The applied filter criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The search text as typed, which may not be applied yet.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// True while the search box has focus.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Items passing the current filters, in snapshot order.
    pub fn filtered_items(&self) -> &[I] {
        &self.filtered
    }

    /// Items on the current page.
    pub fn page_items(&self) -> &[I] {
        paginate(&self.filtered, self.paginator.page, self.paginator.per_page).items
    }

    /// Ids on the current page, in page order.
    pub fn page_ids(&self) -> Vec<String> {
        self.page_items().iter().map(Item::id).collect()
    }

    /// Current page (1-indexed).
    pub fn page(&self) -> usize {
        self.paginator.page
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages
    }

    /// Id of the row under the cursor.
    pub fn cursor_id(&self) -> Option<String> {
        self.table.selected_row().map(|row| row.id.clone())
    }

    /// Moves the cursor to a row of the current page.
    pub fn set_cursor(&mut self, row: usize) {
        self.table.set_cursor(row);
    }

    /// Selected ids on the current page.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.selected_ids(&self.page_ids())
    }

    /// True when every row of a non-empty page is selected.
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.page_ids())
    }

    /// True when some, but not all, rows of the page are selected.
    pub fn is_indeterminate(&self) -> bool {
        self.selection.is_indeterminate(&self.page_ids())
    }

    /// The open confirmation prompt.
    pub fn prompt(&self) -> Option<&ConfirmPrompt> {
        self.prompt.as_ref()
    }

    /// The alert being shown.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Closes the alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// The last status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Replaces the live search text and schedules it to be applied after
    /// the debounce delay. Earlier pending applications are superseded.
    pub fn set_search_input(&mut self, text: &str) -> Cmd {
        self.search_input = text.to_string();
        self.debounce.trigger()
    }

    /// Applies the live search text immediately, cancelling any pending
    /// debounce.
    pub fn apply_search_now(&mut self) {
        self.debounce.cancel();
        let criteria = FilterCriteria {
            search_term: self.search_input.clone(),
            selected_month: self.criteria.selected_month,
        };
        self.apply_criteria(criteria);
    }

    /// Sets the month filter. Applied immediately.
    pub fn set_month(&mut self, month: MonthFilter) {
        let criteria = FilterCriteria {
            search_term: self.criteria.search_term.clone(),
            selected_month: month,
        };
        self.apply_criteria(criteria);
    }

    /// Goes to the next page. Clears the selection when the page changes.
    pub fn next_page(&mut self) -> bool {
        let changed = self.paginator.next_page();
        self.page_changed(changed);
        changed
    }

    /// Goes to the previous page. Clears the selection when the page
    /// changes.
    pub fn prev_page(&mut self) -> bool {
        let changed = self.paginator.prev_page();
        self.page_changed(changed);
        changed
    }

    /// Goes to `page`, clamped. Clears the selection when the page changes.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let changed = self.paginator.go_to(page);
        self.page_changed(changed);
        changed
    }

    fn page_changed(&mut self, changed: bool) {
        if changed {
            self.selection.clear();
            self.table.set_cursor(0);
            self.sync_table();
        }
    }

    /// Toggles one row of the current page. Returns whether the whole page
    /// is now selected.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        let page_ids = self.page_ids();
        if !page_ids.iter().any(|p| p == id) {
            return self.selection.is_all_selected(&page_ids);
        }
        let all = self.selection.toggle_one(id, &page_ids);
        self.sync_table();
        all
    }

    /// Selects every row of the current page, or clears them if the page
    /// was fully selected. Returns the new select-all state.
    pub fn toggle_all(&mut self) -> bool {
        let page_ids = self.page_ids();
        let all = self.selection.toggle_all(&page_ids);
        self.sync_table();
        all
    }

    /// Asks for confirmation before deleting one item. Returns false when
    /// the item is not in the snapshot.
    pub fn request_delete(&mut self, id: &str) -> bool {
        let Some(item) = self.sync.items().iter().find(|item| item.id() == id) else {
            return false;
        };
        let label = self
            .config
            .columns
            .first()
            .and_then(|c| item.field_text(&c.field))
            .unwrap_or_else(|| id.to_string());
        self.prompt = Some(ConfirmPrompt {
            title: format!("Delete from {}", self.config.title),
            message: format!("Delete \"{label}\"? This cannot be undone."),
            action: PendingAction::Delete(id.to_string()),
        });
        true
    }

    /// Asks for confirmation before deleting the selected rows of the
    /// current page. Returns false when nothing is selected.
    pub fn request_delete_selected(&mut self) -> bool {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return false;
        }
        self.prompt = Some(ConfirmPrompt {
            title: format!("Delete from {}", self.config.title),
            message: format!("Delete {} selected items? This cannot be undone.", ids.len()),
            action: PendingAction::DeleteMany(ids),
        });
        true
    }

    /// Runs the prompted action: removes the item(s) from the snapshot
    /// right away and returns the network command.
    pub fn confirm(&mut self) -> Option<Cmd> {
        match self.prompt.take()?.action {
            PendingAction::Delete(id) => {
                self.remove_optimistically(&id);
                self.refresh_view();
                Some(self.sync.delete(&id))
            }
            PendingAction::DeleteMany(ids) => {
                for id in &ids {
                    self.remove_optimistically(id);
                }
                self.selection.clear();
                self.refresh_view();
                Some(self.sync.delete_many(ids))
            }
        }
    }

    /// Closes the prompt without doing anything.
    pub fn cancel(&mut self) {
        self.prompt = None;
    }

    /// Creates an item on the server; it is appended to the snapshot once
    /// the server returns it.
    pub fn create(&mut self, item: I) -> Cmd {
        self.sync.create(item)
    }

    /// Reloads with the blocking loading state, e.g. after an error.
    pub fn retry(&mut self) -> Option<Cmd> {
        self.alert = None;
        self.blocking = true;
        self.sync.load(false)
    }

    /// The error of the last failed blocking load.
    pub fn error(&self) -> Option<&Error> {
        self.sync.error()
    }
}
