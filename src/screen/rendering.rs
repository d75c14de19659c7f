//! View rendering for list screens.

use super::types::ScreenState;
use super::Model;
use crate::item::Item;
use crate::key;
use chrono::Local;

impl<I: Item> Model<I> {
    /// Renders the screen.
    ///
    /// Layout, top to bottom: title, search and month header, table,
    /// paginator with counts, status line, alert or confirmation prompt,
    /// help line. While loading or after a failed load the table is
    /// replaced by a message.
    pub fn view(&self) -> String {
        let mut sections = vec![self.styles.title.clone().render(&self.config.title)];

        match self.state() {
            ScreenState::Loading => {
                sections.push(
                    self.styles
                        .status
                        .clone()
                        .render(&format!("Loading {}…", self.config.title.to_lowercase())),
                );
                return sections.join("\n\n");
            }
            ScreenState::Error(message) => {
                sections.push(self.styles.error.clone().render(&format!("Error: {message}")));
                sections.push(self.styles.help.clone().render("r retry"));
                return sections.join("\n\n");
            }
            ScreenState::Ready => {}
        }

        sections.push(self.header_view());
        sections.push(self.table.view());
        sections.push(self.footer_view());

        if let Some(prompt) = &self.prompt {
            let body = format!("{}\n\n{}\n\ny confirm • n cancel", prompt.title, prompt.message);
            sections.push(self.styles.prompt.clone().render(&body));
        } else if let Some(alert) = &self.alert {
            sections.push(self.styles.alert.clone().render(alert));
        }

        sections.push(
            self.styles
                .help
                .clone()
                .render(&key::short_help_view(&self.keymap)),
        );
        sections.join("\n\n")
    }

    fn header_view(&self) -> String {
        let search = if self.searching {
            format!("{}█", self.search_input)
        } else if self.criteria.search_term.is_empty() {
            "-".to_string()
        } else {
            self.criteria.search_term.clone()
        };
        format!(
            "{} {}   {} {}",
            self.styles.label.clone().render("Search:"),
            self.styles.search_input.clone().render(&search),
            self.styles.label.clone().render("Month:"),
            self.styles
                .month
                .clone()
                .render(&self.criteria.selected_month.to_string()),
        )
    }

    fn footer_view(&self) -> String {
        let mut parts = vec![
            self.paginator.view(),
            format!("{} of {} items", self.filtered.len(), self.sync.items().len()),
        ];
        let selected = self.selected_ids().len();
        if selected > 0 {
            parts.push(format!("{selected} selected"));
        }
        let mut footer = self.styles.pagination.clone().render(&parts.join(" • "));

        let status = if self.sync.loading() {
            Some("Syncing…".to_string())
        } else if let Some(status) = &self.status {
            Some(status.clone())
        } else {
            self.sync.last_synced().map(|at| {
                format!("Updated {}", at.with_timezone(&Local).format("%H:%M:%S"))
            })
        };
        if let Some(status) = status {
            footer.push('\n');
            footer.push_str(&self.styles.status.clone().render(&status));
        }
        footer
    }
}
