//! Configuration and state types for list screens.

use crate::entity::Entity;
use crate::sync::types::duration_ms;
use crate::sync::RefreshConfig;
use crate::table::Column;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coarse screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    /// A blocking load is running (mount or retry).
    Loading,
    /// Data is on screen.
    Ready,
    /// The last blocking load failed; the message is shown with a retry hint.
    Error(String),
}

/// What a confirmation prompt will do when accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete one item.
    Delete(String),
    /// Delete several items at once.
    DeleteMany(Vec<String>),
}

/// An open confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Prompt title.
    pub title: String,
    /// Prompt body.
    pub message: String,
    /// Action run on confirm.
    pub action: PendingAction,
}

/// Settings for one list screen.
///
/// Loadable from JSON; durations are in milliseconds.
///
/// ```rust
/// use backoffice_widgets::entity::Entity;
/// use backoffice_widgets::screen::ScreenConfig;
///
/// let config = ScreenConfig::for_entity(Entity::Owners).with_page_size(7);
/// assert_eq!(config.title, "Owners");
/// assert_eq!(config.page_size, 7);
/// assert_eq!(config.refresh.events, ["owner-stats-updated"]);
///
/// let parsed: ScreenConfig = serde_json::from_str(
///     r#"{"title": "Leads", "searchFields": ["name"], "pageSize": 5, "searchDebounceMs": 150}"#,
/// ).unwrap();
/// assert_eq!(parsed.date_field, "createdAt");
/// assert_eq!(parsed.search_debounce.as_millis(), 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenConfig {
    /// Title rendered above the table.
    pub title: String,
    /// Fields matched by the free-text search.
    pub search_fields: Vec<String>,
    /// Field read by the month filter.
    pub date_field: String,
    /// Rows per page.
    pub page_size: usize,
    /// Delay between the last keystroke and the search being applied.
    #[serde(rename = "searchDebounceMs", with = "duration_ms")]
    pub search_debounce: Duration,
    /// Background refresh settings.
    pub refresh: RefreshConfig,
    /// Table columns.
    pub columns: Vec<Column>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            title: "Items".to_string(),
            search_fields: vec!["name".to_string()],
            date_field: "createdAt".to_string(),
            page_size: 5,
            search_debounce: crate::debounce::DEFAULT_DELAY,
            refresh: RefreshConfig::default(),
            columns: vec![Column::new("Name", "name").with_width(24)],
        }
    }
}

impl ScreenConfig {
    /// Creates a config with default settings and the given title.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Builds the preset config for an entity.
    pub fn for_entity(entity: Entity) -> Self {
        Self {
            title: entity.title().to_string(),
            search_fields: entity.search_fields().iter().map(|f| f.to_string()).collect(),
            date_field: entity.date_field().to_string(),
            page_size: entity.page_size(),
            search_debounce: crate::debounce::DEFAULT_DELAY,
            refresh: RefreshConfig::default().with_events(entity.refresh_events().iter().copied()),
            columns: entity.columns(),
        }
    }

    /// Sets the searchable fields (builder pattern).
    pub fn with_search_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the date field (builder pattern).
    pub fn with_date_field(mut self, field: &str) -> Self {
        self.date_field = field.to_string();
        self
    }

    /// Sets the page size (builder pattern). Clamped to 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the search debounce delay (builder pattern).
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// Sets the background refresh settings (builder pattern).
    pub fn with_refresh(mut self, refresh: RefreshConfig) -> Self {
        self.refresh = refresh;
        self
    }

    /// Sets the table columns (builder pattern).
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_presets() {
        let config = ScreenConfig::for_entity(Entity::Transactions);
        assert_eq!(config.date_field, "date");
        assert_eq!(config.page_size, 6);
        assert_eq!(config.refresh.events, ["transaction-updated"]);
        assert!(config.search_fields.contains(&"property.name".to_string()));
        assert_eq!(config.search_debounce, Duration::from_millis(300));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = ScreenConfig::for_entity(Entity::Customers).with_page_size(0);
        assert_eq!(config.page_size, 1);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""searchDebounceMs":300"#));
        assert!(json.contains(r#""intervalMs":30000"#));
        let back: ScreenConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
