//! Fixed-width text table with optional selection checkboxes.
//!
//! Columns name a (possibly dotted) field path that is read through
//! [`Item::field_text`]; cells are padded or truncated to the column width
//! using terminal display width, so wide characters line up.

use crate::item::Item;
use lipgloss_extras::prelude::*;
use serde::{Deserialize, Serialize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to truncated cells.
pub const ELLIPSIS: &str = "…";

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";
const INDETERMINATE: &str = "[-]";

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text.
    pub title: String,
    /// Field path rendered in this column.
    pub field: String,
    /// Display width in terminal cells.
    pub width: usize,
}

impl Column {
    /// Creates a column sized to fit its title, at least 8 cells wide.
    pub fn new(title: impl Into<String>, field: impl Into<String>) -> Self {
        let title = title.into();
        let width = title.width().max(8);
        Self {
            title,
            field: field.into(),
            width,
        }
    }

    /// Sets the display width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Id of the item this row shows.
    pub id: String,
    /// Cell texts, one per column.
    pub cells: Vec<String>,
    /// Whether the row's checkbox is ticked.
    pub checked: bool,
}

impl Row {
    /// Builds a row by reading each column's field from `item`. Missing
    /// values render as `-`.
    pub fn from_item<I: Item>(item: &I, columns: &[Column], checked: bool) -> Self {
        Self {
            id: item.id(),
            cells: columns
                .iter()
                .map(|c| item.field_text(&c.field).unwrap_or_else(|| "-".to_string()))
                .collect(),
            checked,
        }
    }
}

/// State of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCheck {
    /// Nothing on the page is selected.
    #[default]
    Unchecked,
    /// Every row on the page is selected.
    Checked,
    /// Some rows on the page are selected.
    Indeterminate,
}

impl HeaderCheck {
    fn glyph(self) -> &'static str {
        match self {
            HeaderCheck::Unchecked => UNCHECKED,
            HeaderCheck::Checked => CHECKED,
            HeaderCheck::Indeterminate => INDETERMINATE,
        }
    }
}

/// Table styles.
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Header row.
    pub header: Style,
    /// Row under the cursor.
    pub cursor_row: Style,
    /// Other rows.
    pub row: Style,
    /// Placeholder shown when there are no rows.
    pub empty: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(true),
            cursor_row: Style::new().foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            row: Style::new(),
            empty: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}

/// Table component.
#[derive(Debug, Clone)]
pub struct Model {
    columns: Vec<Column>,
    rows: Vec<Row>,
    cursor: usize,
    header_check: HeaderCheck,
    /// Render a checkbox column.
    pub show_checkboxes: bool,
    /// Text shown when there are no rows.
    pub empty_text: String,
    /// Styles.
    pub styles: TableStyles,
}

impl Model {
    /// Creates a table with the given columns and no rows.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            cursor: 0,
            header_check: HeaderCheck::Unchecked,
            show_checkboxes: true,
            empty_text: "No items found.".to_string(),
            styles: TableStyles::default(),
        }
    }

    /// Sets the rows (builder pattern).
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Enables or disables the checkbox column (builder pattern).
    pub fn with_checkboxes(mut self, show: bool) -> Self {
        self.show_checkboxes = show;
        self
    }

    /// Sets the placeholder text (builder pattern).
    pub fn with_empty_text(mut self, text: &str) -> Self {
        self.empty_text = text.to_string();
        self
    }

    /// Replaces the rows, keeping the cursor in range.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    /// Sets the header checkbox state.
    pub fn set_header_check(&mut self, check: HeaderCheck) {
        self.header_check = check;
    }

    /// Returns the columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamped to the rows.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.rows.len().saturating_sub(1));
    }

    /// Returns the row under the cursor.
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.cursor)
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.rows.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    /// Renders the table.
    pub fn view(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let mut header = String::from("  ");
        if self.show_checkboxes {
            header.push_str(self.header_check.glyph());
            header.push(' ');
        }
        header.push_str(&self.join_cells(self.columns.iter().map(|c| c.title.as_str())));
        lines.push(self.styles.header.clone().inline(true).render(&header));

        let mut separator = String::from("  ");
        if self.show_checkboxes {
            separator.push_str("----");
        }
        separator.push_str(
            &self
                .columns
                .iter()
                .map(|c| "-".repeat(c.width))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        lines.push(separator);

        if self.rows.is_empty() {
            lines.push(
                self.styles
                    .empty
                    .clone()
                    .inline(true)
                    .render(&format!("  {}", self.empty_text)),
            );
        }

        for (index, row) in self.rows.iter().enumerate() {
            let at_cursor = index == self.cursor;
            let mut line = String::from(if at_cursor { "> " } else { "  " });
            if self.show_checkboxes {
                line.push_str(if row.checked { CHECKED } else { UNCHECKED });
                line.push(' ');
            }
            line.push_str(&self.join_cells(row.cells.iter().map(String::as_str)));
            let style = if at_cursor {
                &self.styles.cursor_row
            } else {
                &self.styles.row
            };
            lines.push(style.clone().inline(true).render(&line));
        }

        lines.join("\n")
    }

    fn join_cells<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        self.columns
            .iter()
            .zip(cells)
            .map(|(column, text)| fit(text, column.width))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Pads or truncates `text` to exactly `width` display cells.
pub fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{text}{}", " ".repeat(width - text_width));
    }
    let budget = width.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    used += ELLIPSIS.width();
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
