//! Realtime event channel collaborator.
//!
//! A channel is opened per mounted controller and closed by dropping the
//! [`EventSource`] it returned, so two screens never share a listener and a
//! remount never leaves a duplicate behind.

use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;

/// A push notification: a `type` plus arbitrary payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEvent {
    /// Event type, e.g. `"customer-updated"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Remaining fields.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ServerEvent {
    /// Creates an event with an empty payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Adds a payload field (builder pattern).
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(name.to_string(), value.into());
        self
    }

    /// Decodes an event from a JSON text frame.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// An open event connection. Dropping it disconnects.
#[async_trait]
pub trait EventSource: Send {
    /// Waits for the next event. `None` means the connection closed.
    async fn next_event(&mut self) -> Option<ServerEvent>;
}

/// Something that can open event connections.
#[async_trait]
pub trait EventChannel: Send + Sync {
    /// Opens a fresh connection.
    async fn connect(&self) -> Result<Box<dyn EventSource>>;
}

type EventPredicate = Arc<dyn Fn(&ServerEvent) -> bool + Send + Sync>;

/// Decides which events trigger a refresh: an allow-list of types plus an
/// optional extra predicate.
#[derive(Clone, Default)]
pub struct EventFilter {
    types: Vec<String>,
    predicate: Option<EventPredicate>,
}

impl EventFilter {
    /// Accepts events whose type is in `types`.
    pub fn new<S: Into<String>>(types: impl IntoIterator<Item = S>) -> Self {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            predicate: None,
        }
    }

    /// Additionally requires `predicate` to hold (builder pattern).
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ServerEvent) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// The allowed types.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Tests one event.
    pub fn matches(&self, event: &ServerEvent) -> bool {
        self.types.iter().any(|t| *t == event.kind)
            && self.predicate.as_ref().map_or(true, |p| p(event))
    }
}

impl fmt::Debug for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFilter")
            .field("types", &self.types)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// In-process broadcast channel.
///
/// Bridges any socket transport into [`EventChannel`]: the transport calls
/// [`EventHub::publish`] for every frame it receives, and each connected
/// controller gets its own receiver.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventHub {
    /// Creates a hub buffering up to `capacity` events per receiver.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Delivers an event to every open connection and returns how many
    /// received it.
    pub fn publish(&self, event: ServerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Number of open connections.
    pub fn connections(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl EventChannel for EventHub {
    async fn connect(&self) -> Result<Box<dyn EventSource>> {
        debug!("event hub connection opened");
        Ok(Box::new(HubSource {
            receiver: self.sender.subscribe(),
        }))
    }
}

struct HubSource {
    receiver: broadcast::Receiver<ServerEvent>,
}

#[async_trait]
impl EventSource for HubSource {
    async fn next_event(&mut self) -> Option<ServerEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("event listener lagged, skipped {skipped} events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// A channel whose connections always fail. Useful when realtime updates
/// are configured but the transport is known to be down.
#[derive(Debug, Clone)]
pub struct UnavailableChannel(pub String);

#[async_trait]
impl EventChannel for UnavailableChannel {
    async fn connect(&self) -> Result<Box<dyn EventSource>> {
        Err(Error::Disconnected(self.0.clone()))
    }
}
