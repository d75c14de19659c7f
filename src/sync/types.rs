//! Messages and configuration for the sync controller.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default period of the background refresh.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Background refresh settings.
///
/// Serialised with the interval in milliseconds; an interval of zero turns
/// the periodic refresh off.
///
/// ```rust
/// use backoffice_widgets::sync::RefreshConfig;
/// use std::time::Duration;
///
/// let config: RefreshConfig =
///     serde_json::from_str(r#"{"intervalMs": 15000, "events": ["order-updated"]}"#).unwrap();
/// assert_eq!(config.interval, Duration::from_secs(15));
/// assert_eq!(config.events, ["order-updated"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshConfig {
    /// Period of the silent background refresh.
    #[serde(rename = "intervalMs", with = "duration_ms")]
    pub interval: Duration,
    /// Realtime event types that trigger a silent refresh.
    pub events: Vec<String>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            events: Vec::new(),
        }
    }
}

impl RefreshConfig {
    /// Sets the refresh period (builder pattern).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the realtime allow-list (builder pattern).
    pub fn with_events<S: Into<String>>(mut self, events: impl IntoIterator<Item = S>) -> Self {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }
}

/// `Duration` as integer milliseconds.
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Why a silent refresh was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshReason {
    /// The background interval elapsed.
    Interval,
    /// A realtime event of this type arrived.
    Event(String),
}

/// Result of a collection fetch.
#[derive(Debug, Clone)]
pub struct LoadedMsg<I> {
    pub(crate) controller_id: i64,
    pub(crate) generation: u64,
    /// Whether the fetch was a silent refresh.
    pub silent: bool,
    /// The fetched collection or the failure.
    pub result: Result<Vec<I>>,
}

/// One or more refresh triggers collected by the signal pump.
#[derive(Debug, Clone)]
pub struct SignalMsg {
    pub(crate) controller_id: i64,
    pub(crate) session: u64,
    /// Every trigger drained in this batch, in arrival order.
    pub reasons: Vec<RefreshReason>,
}

/// Result of a single delete.
#[derive(Debug, Clone)]
pub struct DeletedMsg {
    pub(crate) controller_id: i64,
    /// Id of the deleted item.
    pub id: String,
    /// Outcome of the request.
    pub result: Result<()>,
}

/// Results of a bulk delete, one per requested id, in request order.
#[derive(Debug, Clone)]
pub struct BulkDeletedMsg {
    pub(crate) controller_id: i64,
    /// Per-id outcome.
    pub outcomes: Vec<(String, Result<()>)>,
}

impl BulkDeletedMsg {
    /// Ids whose delete failed.
    pub fn failed_ids(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ids whose delete succeeded.
    pub fn succeeded_ids(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Returns true when every delete succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }
}

/// Result of a create.
#[derive(Debug, Clone)]
pub struct CreatedMsg<I> {
    pub(crate) controller_id: i64,
    /// The server's copy of the new item, or the failure.
    pub result: Result<I>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_refresh_config_defaults_and_roundtrip() {
        let config: RefreshConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RefreshConfig::default());
        assert_eq!(config.interval, Duration::from_secs(30));

        let json = serde_json::to_value(
            RefreshConfig::default()
                .with_interval(Duration::from_millis(1500))
                .with_events(["customer-updated"]),
        )
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"intervalMs": 1500, "events": ["customer-updated"]})
        );
    }

    #[test]
    fn test_bulk_outcome_partition() {
        let msg = BulkDeletedMsg {
            controller_id: 0,
            outcomes: vec![
                ("1".into(), Ok(())),
                ("2".into(), Err(Error::Network("timeout".into()))),
                ("3".into(), Ok(())),
            ],
        };
        assert!(!msg.all_succeeded());
        assert_eq!(msg.failed_ids(), ["2"]);
        assert_eq!(msg.succeeded_ids(), ["1", "3"]);
    }
}
