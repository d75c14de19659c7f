//! Server synchronisation for one collection.
//!
//! [`SyncController`] owns the client-side copy of a remote collection. It
//! performs the initial load, keeps the copy fresh through a periodic silent
//! refresh and realtime events, and lets screens mutate the copy
//! optimistically before the server confirms.
//!
//! The controller talks to two collaborators:
//!
//! - a [`CollectionClient`] for `GET`, `DELETE` and `POST` against the
//!   collection (see [`RestClient`] behind the `http` feature);
//! - an optional [`EventChannel`] delivering `{ "type": ..., ... }` push
//!   events ([`EventHub`] bridges any socket transport).
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use backoffice_widgets::error::Result;
//! use backoffice_widgets::item::Record;
//! use backoffice_widgets::sync::{CollectionClient, DeleteResponse, SyncController};
//! use std::sync::Arc;
//!
//! struct Fixed;
//!
//! #[async_trait]
//! impl CollectionClient<Record> for Fixed {
//!     async fn fetch_all(&self) -> Result<Vec<Record>> {
//!         Ok(vec![Record::new("a"), Record::new("b")])
//!     }
//!     async fn delete(&self, _id: &str) -> Result<DeleteResponse> {
//!         Ok(DeleteResponse::ok())
//!     }
//!     async fn create(&self, item: &Record) -> Result<Record> {
//!         Ok(item.clone())
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut sync = SyncController::<Record>::new(Arc::new(Fixed));
//! let cmd = sync.load(false).unwrap();
//! assert!(sync.loading());
//!
//! let msg = cmd.await.unwrap();
//! sync.update(&msg);
//! assert_eq!(sync.items().len(), 2);
//!
//! sync.optimistic_remove("a");
//! assert_eq!(sync.items().len(), 1);
//! # });
//! ```

pub mod client;
pub mod events;
#[cfg(feature = "http")]
pub mod http;
pub mod model;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{CollectionClient, DeleteResponse};
pub use events::{EventChannel, EventFilter, EventHub, EventSource, ServerEvent, UnavailableChannel};
#[cfg(feature = "http")]
pub use http::RestClient;
pub use model::SyncController;
pub use types::{
    BulkDeletedMsg, CreatedMsg, DeletedMsg, LoadedMsg, RefreshConfig, RefreshReason, SignalMsg,
    DEFAULT_REFRESH_INTERVAL,
};
