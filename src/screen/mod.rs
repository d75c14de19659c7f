//! List screens for back-office collections.
//!
//! A screen is a generic `Model<I: Item>` that owns everything needed to
//! show one collection: a [`SyncController`](crate::sync::SyncController)
//! for the data, a search box with debounce, a month filter, a paginator,
//! row selection, delete confirmation and a status line.
//!
//! ## Architecture Overview
//!
//! ### Derived state
//! Data flows one way on every change:
//! 1. **Snapshot**: the last successful load, plus optimistic edits
//! 2. **Filtered**: search and month predicates applied in order
//! 3. **Page**: a window of `page_size` filtered items
//! 4. **Selection**: ids checked on the current page
//!
//! Changing the search or the month resets to page 1. Changing page, or any
//! reset of the page, clears the selection.
//!
//! ### Screen states
//! - `Loading`: the mount-time (or retry) load has not resolved yet
//! - `Error`: the last blocking load failed; only `r` (retry) is accepted
//! - `Ready`: the table is shown; background refreshes happen silently
//!
//! ### Deletes
//! Confirmed deletes remove rows from the snapshot before the server
//! answers. A failure puts the rows back, raises an alert and reloads.
//!
//! ## Embedding in an application
//!
//! A screen needs its client up front, so the host application owns it and
//! forwards the bubbletea-rs `Model` calls:
//!
//! ```rust
//! use async_trait::async_trait;
//! use backoffice_widgets::entity::Entity;
//! use backoffice_widgets::error::Result;
//! use backoffice_widgets::item::Record;
//! use backoffice_widgets::screen::{Model, ScreenConfig, ScreenState};
//! use backoffice_widgets::sync::{CollectionClient, DeleteResponse};
//! use backoffice_widgets::Lifecycle;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use std::sync::Arc;
//!
//! struct Customers;
//!
//! #[async_trait]
//! impl CollectionClient<Record> for Customers {
//!     async fn fetch_all(&self) -> Result<Vec<Record>> {
//!         Ok(vec![Record::new("c1").with_field("name", "Ada Lovelace")])
//!     }
//!     async fn delete(&self, _id: &str) -> Result<DeleteResponse> {
//!         Ok(DeleteResponse::ok())
//!     }
//!     async fn create(&self, item: &Record) -> Result<Record> {
//!         Ok(item.clone())
//!     }
//! }
//!
//! struct App {
//!     customers: Model<Record>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let config = ScreenConfig::for_entity(Entity::Customers);
//!         let mut customers = Model::new(config, Arc::new(Customers));
//!         let cmd = customers.mount();
//!         (App { customers }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.customers.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.customers.view()
//!     }
//! }
//!
//! let (mut app, cmd) = App::init();
//! assert_eq!(app.customers.state(), ScreenState::Loading);
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let msg = runtime.block_on(cmd.unwrap()).unwrap();
//! app.update(msg);
//! assert_eq!(app.customers.state(), ScreenState::Ready);
//! assert!(app.view().contains("Ada Lovelace"));
//! ```

/// Key bindings for screen navigation, filters and actions.
pub mod keys;

/// Styles for the screen's sections.
pub mod style;

mod api;
mod model;
mod rendering;
mod types;


pub use keys::ScreenKeyMap;
pub use model::Model;
pub use style::ScreenStyles;
pub use types::{ConfirmPrompt, PendingAction, ScreenConfig, ScreenState};
