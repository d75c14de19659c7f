//! Core state and message handling for list screens.

use super::keys::ScreenKeyMap;
use super::style::ScreenStyles;
use super::types::{ConfirmPrompt, ScreenConfig, ScreenState};
use crate::debounce;
use crate::filter::{FilterCriteria, FilterPipeline};
use crate::item::Item;
use crate::paginator;
use crate::selection;
use crate::sync::{
    BulkDeletedMsg, CollectionClient, CreatedMsg, DeletedMsg, EventChannel, SyncController,
};
use crate::table::{self, HeaderCheck, Row};
use crate::Lifecycle;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// A list screen for one entity type.
///
/// Composes a [`SyncController`] (the data), a filter pipeline (search and
/// month), a paginator, a selection tracker and a search debouncer, and
/// renders the current page as a table.
///
/// Derived state flows one way: snapshot → filtered items → current page →
/// selection. Changing the search or month resets to page 1 and clears the
/// selection; changing page clears the selection; a snapshot change that
/// leaves the current page out of range resets to page 1 and clears the
/// selection.
pub struct Model<I: Item> {
    pub(super) config: ScreenConfig,
    pub(super) sync: SyncController<I>,
    pub(super) criteria: FilterCriteria,
    pub(super) search_input: String,
    pub(super) searching: bool,
    pub(super) debounce: debounce::Model,
    pub(super) filtered: Vec<I>,
    pub(super) paginator: paginator::Model,
    pub(super) selection: selection::Model,
    pub(super) table: table::Model,
    pub(super) prompt: Option<ConfirmPrompt>,
    pub(super) alert: Option<String>,
    pub(super) status: Option<String>,
    pub(super) blocking: bool,
    pub(super) removed: HashMap<String, (usize, I)>,
    /// Key bindings.
    pub keymap: ScreenKeyMap,
    /// Styles.
    pub styles: ScreenStyles,
}

impl<I: Item> Model<I> {
    /// Creates an unmounted screen. Call [`Lifecycle::mount`] to load.
    pub fn new(config: ScreenConfig, client: Arc<dyn CollectionClient<I>>) -> Self {
        let sync = SyncController::new(client).with_refresh(config.refresh.clone());
        let paginator = paginator::Model::new().with_per_page(config.page_size);
        let table = table::Model::new(config.columns.clone())
            .with_empty_text(&format!("No {} found.", config.title.to_lowercase()));
        Self {
            debounce: debounce::Model::new(config.search_debounce),
            config,
            sync,
            criteria: FilterCriteria::default(),
            search_input: String::new(),
            searching: false,
            filtered: Vec::new(),
            paginator,
            selection: selection::Model::new(),
            table,
            prompt: None,
            alert: None,
            status: None,
            blocking: false,
            removed: HashMap::new(),
            keymap: ScreenKeyMap::default(),
            styles: ScreenStyles::default(),
        }
    }

    /// Refreshes on realtime events from `channel` while mounted, using the
    /// configured allow-list (builder pattern).
    pub fn with_realtime(mut self, channel: Arc<dyn EventChannel>) -> Self {
        self.sync = self.sync.with_realtime(channel);
        self
    }

    /// Coarse screen state.
    pub fn state(&self) -> ScreenState {
        if self.blocking && self.sync.loading() {
            ScreenState::Loading
        } else if let Some(err) = self.sync.error() {
            ScreenState::Error(err.to_string())
        } else {
            ScreenState::Ready
        }
    }

    /// Handles every message the screen cares about: load results, refresh
    /// signals, delete and create outcomes, debounce ticks and keys.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let (changed, cmd) = self.sync.update(&msg);
        if changed {
            if !self.sync.loading() {
                self.blocking = false;
            }
            self.refresh_view();
        }
        if changed || cmd.is_some() {
            return cmd;
        }

        if let Some(deleted) = self.sync.deleted(&msg) {
            return self.on_deleted(deleted);
        }
        if let Some(bulk) = self.sync.bulk_deleted(&msg) {
            return self.on_bulk_deleted(bulk);
        }
        if let Some(created) = self.sync.created(&msg) {
            self.on_created(created);
            return None;
        }
        if self.debounce.update(&msg) {
            self.apply_search_now();
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.prompt.is_some() {
            if self.keymap.confirm.matches(key_msg) {
                return self.confirm();
            }
            if self.keymap.cancel.matches(key_msg) {
                self.cancel();
            }
            return None;
        }

        if self.alert.take().is_some() {
            return None;
        }

        if self.searching {
            return self.handle_search_key(key_msg);
        }

        match self.state() {
            ScreenState::Loading => return None,
            ScreenState::Error(_) => {
                if self.keymap.reload.matches(key_msg) {
                    return self.retry();
                }
                return None;
            }
            ScreenState::Ready => {}
        }

        if self.keymap.cursor_up.matches(key_msg) {
            self.table.select_prev();
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.table.select_next();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.search.matches(key_msg) {
            self.searching = true;
        } else if self.keymap.next_month.matches(key_msg) {
            self.set_month(self.criteria.selected_month.next());
        } else if self.keymap.prev_month.matches(key_msg) {
            self.set_month(self.criteria.selected_month.prev());
        } else if self.keymap.toggle_row.matches(key_msg) {
            if let Some(id) = self.cursor_id() {
                self.toggle_row(&id);
            }
        } else if self.keymap.toggle_all.matches(key_msg) {
            self.toggle_all();
        } else if self.keymap.delete.matches(key_msg) {
            if let Some(id) = self.cursor_id() {
                self.request_delete(&id);
            }
        } else if self.keymap.delete_selected.matches(key_msg) {
            self.request_delete_selected();
        } else if self.keymap.reload.matches(key_msg) {
            return self.retry();
        }
        None
    }

    fn handle_search_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.accept_search.matches(key_msg) {
            self.searching = false;
            self.apply_search_now();
            return None;
        }
        if self.keymap.clear_search.matches(key_msg) {
            self.searching = false;
            self.search_input.clear();
            self.apply_search_now();
            return None;
        }
        match key_msg.key {
            KeyCode::Char(c)
                if !key_msg
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search_input.push(c);
                Some(self.debounce.trigger())
            }
            KeyCode::Backspace => {
                self.search_input.pop()?;
                Some(self.debounce.trigger())
            }
            _ => None,
        }
    }

    fn on_deleted(&mut self, deleted: &DeletedMsg) -> Option<Cmd> {
        let rollback = self.removed.remove(&deleted.id);
        match &deleted.result {
            Ok(()) => {
                info!("{}: deleted {}", self.config.title, deleted.id);
                self.status = Some(format!("Deleted {}", deleted.id));
                None
            }
            Err(err) => {
                warn!("{}: delete of {} failed: {err}", self.config.title, deleted.id);
                self.alert = Some(format!("Could not delete {}: {err}", deleted.id));
                if let Some((index, item)) = rollback {
                    self.put_back(index, item);
                }
                self.refresh_view();
                self.sync.load(false)
            }
        }
    }

    fn on_bulk_deleted(&mut self, bulk: &BulkDeletedMsg) -> Option<Cmd> {
        let total = bulk.outcomes.len();
        let failed = bulk.failed_ids();
        let mut rollbacks = Vec::new();
        for (id, _) in &bulk.outcomes {
            if let Some(rollback) = self.removed.remove(id) {
                if failed.contains(id) {
                    rollbacks.push(rollback);
                }
            }
        }
        self.selection.clear();

        if failed.is_empty() {
            info!("{}: deleted {total} items", self.config.title);
            self.status = Some(format!("Deleted {total} items"));
            self.refresh_view();
            return None;
        }

        warn!(
            "{}: bulk delete failed for {} of {total} items",
            self.config.title,
            failed.len()
        );
        self.alert = Some(format!(
            "Deleted {} of {total} items. Failed: {}",
            total - failed.len(),
            failed.join(", ")
        ));
        for (index, item) in rollbacks.into_iter().rev() {
            self.put_back(index, item);
        }
        self.refresh_view();
        self.sync.load(false)
    }

    fn on_created(&mut self, created: &CreatedMsg<I>) {
        match &created.result {
            Ok(item) => {
                info!("{}: created {}", self.config.title, item.id());
                self.status = Some(format!("Created {}", item.id()));
                self.sync.optimistic_append(item.clone());
                self.refresh_view();
            }
            Err(err) => {
                warn!("{}: create failed: {err}", self.config.title);
                self.alert = Some(format!("Could not create item: {err}"));
            }
        }
    }

    /// Re-inserts an optimistically removed item unless a refresh already
    /// brought it back.
    fn put_back(&mut self, index: usize, item: I) {
        if self.sync.position(&item.id()).is_none() {
            self.sync.restore(index, item);
        }
    }

    /// Records an optimistic removal so it can be rolled back.
    pub(super) fn remove_optimistically(&mut self, id: &str) {
        let Some(index) = self.sync.position(id) else {
            return;
        };
        if let Some(item) = self.sync.optimistic_remove(id) {
            self.removed.insert(id.to_string(), (index, item));
        }
    }

    /// Applies new criteria; any change resets to page 1 and clears the
    /// selection.
    pub(super) fn apply_criteria(&mut self, criteria: FilterCriteria) {
        if criteria == self.criteria {
            return;
        }
        self.criteria = criteria;
        self.paginator.page = 1;
        self.selection.clear();
        self.table.set_cursor(0);
        self.refresh_view();
    }

    /// Re-derives the filtered list, page count and table rows from the
    /// snapshot.
    pub(super) fn refresh_view(&mut self) {
        let pipeline = FilterPipeline::from_criteria(
            &self.criteria,
            &self.config.search_fields,
            &self.config.date_field,
        );
        self.filtered = pipeline.apply(self.sync.items());
        if self.paginator.set_total_items(self.filtered.len()) {
            self.selection.clear();
            self.table.set_cursor(0);
        }
        self.sync_table();
    }

    /// Rebuilds table rows for the current page and selection.
    pub(super) fn sync_table(&mut self) {
        let page_ids = self.page_ids();
        let columns = self.table.columns().to_vec();
        let rows = self
            .page_items()
            .iter()
            .map(|item| Row::from_item(item, &columns, self.selection.is_selected(&item.id())))
            .collect();
        self.table.set_rows(rows);
        self.table.set_header_check(if self.selection.is_all_selected(&page_ids) {
            HeaderCheck::Checked
        } else if self.selection.is_indeterminate(&page_ids) {
            HeaderCheck::Indeterminate
        } else {
            HeaderCheck::Unchecked
        });
    }
}

impl<I: Item> Lifecycle for Model<I> {
    /// Starts the initial blocking load and the background refresh.
    fn mount(&mut self) -> Option<Cmd> {
        let cmd = self.sync.mount();
        if cmd.is_some() {
            self.blocking = true;
        }
        cmd
    }

    /// Stops background refresh, closes the realtime connection and drops
    /// any pending search.
    fn unmount(&mut self) {
        self.sync.unmount();
        self.debounce.cancel();
        self.blocking = false;
    }

    fn mounted(&self) -> bool {
        self.sync.mounted()
    }
}
