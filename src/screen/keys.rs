//! Key bindings for list screens.
//!
//! - **Rows**: `↑/k`, `↓/j` move the cursor; `space` toggles the row, `a`
//!   toggles the page.
//! - **Pages**: `←/h/pgup`, `→/l/pgdn`.
//! - **Filters**: `/` edits the search, `m`/`M` step the month filter.
//! - **Actions**: `x/del` deletes the row, `D` deletes the selection, `r`
//!   reloads.
//! - **Prompts**: `y/enter` confirms, `n/esc` cancels.

use crate::key::{self, KeyMap};
use crossterm::event::KeyCode;

/// Key bindings for a list screen.
#[derive(Debug, Clone)]
pub struct ScreenKeyMap {
    /// Move the cursor up.
    pub cursor_up: key::Binding,
    /// Move the cursor down.
    pub cursor_down: key::Binding,
    /// Previous page.
    pub prev_page: key::Binding,
    /// Next page.
    pub next_page: key::Binding,
    /// Focus the search box.
    pub search: key::Binding,
    /// Apply the search now and leave the search box.
    pub accept_search: key::Binding,
    /// Clear the search and leave the search box.
    pub clear_search: key::Binding,
    /// Next month filter.
    pub next_month: key::Binding,
    /// Previous month filter.
    pub prev_month: key::Binding,
    /// Toggle the row under the cursor.
    pub toggle_row: key::Binding,
    /// Toggle every row on the page.
    pub toggle_all: key::Binding,
    /// Delete the row under the cursor.
    pub delete: key::Binding,
    /// Delete the selected rows.
    pub delete_selected: key::Binding,
    /// Reload from the server.
    pub reload: key::Binding,
    /// Accept a prompt.
    pub confirm: key::Binding,
    /// Dismiss a prompt.
    pub cancel: key::Binding,
}

impl Default for ScreenKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            prev_page: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h", "prev page"),
            next_page: key::Binding::new(vec![
                KeyCode::Right,
                KeyCode::Char('l'),
                KeyCode::PageDown,
            ])
            .with_help("→/l", "next page"),
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            accept_search: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply"),
            clear_search: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear"),
            next_month: key::Binding::new(vec![KeyCode::Char('m')]).with_help("m/M", "month"),
            prev_month: key::Binding::new(vec![KeyCode::Char('M')]),
            toggle_row: key::Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "select"),
            toggle_all: key::Binding::new(vec![KeyCode::Char('a')]).with_help("a", "select page"),
            delete: key::Binding::new(vec![KeyCode::Char('x'), KeyCode::Delete])
                .with_help("x", "delete"),
            delete_selected: key::Binding::new(vec![KeyCode::Char('D')])
                .with_help("D", "delete selected"),
            reload: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reload"),
            confirm: key::Binding::new(vec![KeyCode::Char('y'), KeyCode::Enter])
                .with_help("y", "confirm"),
            cancel: key::Binding::new(vec![KeyCode::Char('n'), KeyCode::Esc])
                .with_help("n", "cancel"),
        }
    }
}

impl KeyMap for ScreenKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.next_page,
            &self.search,
            &self.next_month,
            &self.toggle_row,
            &self.delete,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.prev_page,
                &self.next_page,
            ],
            vec![
                &self.search,
                &self.accept_search,
                &self.clear_search,
                &self.next_month,
            ],
            vec![
                &self.toggle_row,
                &self.toggle_all,
                &self.delete,
                &self.delete_selected,
                &self.reload,
            ],
        ]
    }
}
