//! Pagination engine for list screens.
//!
//! Two entry points are provided:
//!
//! - [`paginate`], a pure function that derives the current page slice from a
//!   full item list and signals when the requested page had to be corrected.
//! - [`Model`], a stateful pager that tracks the current page, reacts to key
//!   presses and renders a page indicator.
//!
//! Pages are 1-indexed throughout. There is always at least one page, even
//! for an empty list, so "page 1 of 1" can be shown without special cases.

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;

/// Returns the number of pages needed for `len` items, never less than 1.
///
/// ```rust
/// use backoffice_widgets::paginator::total_pages;
///
/// assert_eq!(total_pages(0, 10), 1);
/// assert_eq!(total_pages(10, 10), 1);
/// assert_eq!(total_pages(11, 10), 2);
/// ```
pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// The result of [`paginate`]: one page of items plus navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, T> {
    /// The items on the current page, in source order.
    pub items: &'a [T],
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// The page the slice was taken from, after correction.
    pub current_page: usize,
    /// Set when the requested page was out of range and the slice was taken
    /// from page 1 instead. Callers must store `current_page` back.
    pub corrected: bool,
}

/// Derives the slice of `items` shown on `page`.
///
/// A page outside `1..=total_pages` (for example after the source shrank) is
/// corrected to page 1 and reported through [`PageSlice::corrected`] rather
/// than silently producing an empty slice. A `per_page` of 0 is treated as 1.
///
/// ```rust
/// use backoffice_widgets::paginator::paginate;
///
/// let items: Vec<u32> = (1..=12).collect();
///
/// let page = paginate(&items, 3, 5);
/// assert_eq!(page.items, &[11, 12]);
/// assert_eq!(page.total_pages, 3);
/// assert!(!page.corrected);
///
/// let page = paginate(&items[..4], 3, 5);
/// assert_eq!(page.current_page, 1);
/// assert!(page.corrected);
/// ```
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> PageSlice<'_, T> {
    let per_page = per_page.max(1);
    let total = total_pages(items.len(), per_page);
    let (current_page, corrected) = if page == 0 || page > total {
        (1, true)
    } else {
        (page, false)
    };
    let start = (current_page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    PageSlice {
        items: &items[start.min(end)..end],
        total_pages: total,
        current_page,
        corrected,
    }
}

/// The type of page indicator to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Page numbers, e.g. "1/5".
    #[default]
    Arabic,
    /// One dot per page, e.g. "● ○ ○ ○ ○".
    Dots,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page. Default keys: PageUp, Left Arrow, 'h'.
    pub prev_page: key::Binding,
    /// Next page. Default keys: PageDown, Right Arrow, 'l'.
    pub next_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev page"),
            next_page: key::Binding::new(vec![
                KeyCode::PageDown,
                KeyCode::Right,
                KeyCode::Char('l'),
            ])
            .with_help("→/l", "next page"),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.prev_page, &self.next_page]]
    }
}

/// A stateful, 1-indexed pager.
///
/// The invariant `1 <= page <= total_pages` holds after every operation.
///
/// # Examples
///
/// ```rust
/// use backoffice_widgets::paginator::Model;
///
/// let mut paginator = Model::new().with_per_page(10).with_total_items(150);
/// assert_eq!(paginator.total_pages, 15);
/// assert!(paginator.on_first_page());
///
/// paginator.next_page();
/// assert_eq!(paginator.page, 2);
///
/// // The source shrinks below the current page: the pager resets to page 1.
/// paginator.page = 5;
/// assert!(paginator.set_total_items(10));
/// assert_eq!(paginator.page, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// The type of indicator rendered by [`Model::view`].
    pub paginator_type: Type,
    /// The current page (1-indexed).
    pub page: usize,
    /// The number of items per page.
    pub per_page: usize,
    /// The total number of pages.
    pub total_pages: usize,
    /// The character used for the active page in Dots mode.
    pub active_dot: String,
    /// The character used for inactive pages in Dots mode.
    pub inactive_dot: String,
    /// The format string for Arabic mode (e.g., "%d/%d").
    pub arabic_format: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 1,
            per_page: 1,
            total_pages: 1,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "%d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a pager on page 1 of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total number of items (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the number of items per page (builder pattern). Clamped to 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the indicator type (builder pattern).
    pub fn with_type(mut self, paginator_type: Type) -> Self {
        self.paginator_type = paginator_type;
        self
    }

    /// Sets the number of items per page. Clamped to 1.
    ///
    /// The page count is not recomputed; call [`Model::set_total_items`]
    /// afterwards.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Recomputes the page count for `items` items.
    ///
    /// Returns `true` when the current page fell out of range and was reset
    /// to page 1. Callers use this to discard state tied to the old page,
    /// such as row selection.
    pub fn set_total_items(&mut self, items: usize) -> bool {
        self.total_pages = total_pages(items, self.per_page);
        if self.page == 0 || self.page > self.total_pages {
            self.page = 1;
            return true;
        }
        false
    }

    /// Moves to `page`, clamped to `1..=total_pages`. Returns whether the
    /// page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages.max(1));
        let changed = target != self.page;
        self.page = target;
        changed
    }

    /// Returns the number of items on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.slice_bounds(total_items);
        end - start
    }

    /// Returns the `(start, end)` bounds of the current page within a list
    /// of `length` items. Both bounds are clamped to `length`.
    ///
    /// ```rust
    /// use backoffice_widgets::paginator::Model;
    ///
    /// let items: Vec<i32> = (1..=25).collect();
    /// let mut paginator = Model::new().with_per_page(10).with_total_items(items.len());
    /// paginator.page = 3;
    /// let (start, end) = paginator.slice_bounds(items.len());
    /// assert_eq!(&items[start..end], &[21, 22, 23, 24, 25]);
    /// ```
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = (self.page.max(1) - 1).saturating_mul(self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Goes to the previous page. No-op on the first page. Returns whether
    /// the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.on_first_page() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Goes to the next page. No-op on the last page. Returns whether the
    /// page changed.
    pub fn next_page(&mut self) -> bool {
        if self.on_last_page() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Returns true on page 1.
    pub fn on_first_page(&self) -> bool {
        self.page <= 1
    }

    /// Returns true on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Handles navigation keys. Returns whether the page changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                return self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                return self.prev_page();
            }
        }
        false
    }

    /// Renders the page indicator.
    ///
    /// ```rust
    /// use backoffice_widgets::paginator::{Model, Type};
    ///
    /// let mut paginator = Model::new().with_per_page(10).with_total_items(50);
    /// assert_eq!(paginator.view(), "1/5");
    ///
    /// paginator.paginator_type = Type::Dots;
    /// paginator.page = 3;
    /// assert_eq!(paginator.view(), "○ ○ • ○ ○");
    /// ```
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self.arabic_view(),
            Type::Dots => self.dots_view(),
        }
    }

    fn arabic_view(&self) -> String {
        self.arabic_format
            .replacen("%d", &self.page.to_string(), 1)
            .replacen("%d", &self.total_pages.to_string(), 1)
    }

    fn dots_view(&self) -> String {
        (1..=self.total_pages)
            .map(|i| {
                if i == self.page {
                    self.active_dot.as_str()
                } else {
                    self.inactive_dot.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
