#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/backoffice-widgets/")]

//! # backoffice-widgets
//!
//! Data-synchronised list screens for back-office terminal applications
//! built with [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! Every screen in a back-office tool looks the same: fetch a collection
//! from a REST API, keep it fresh in the background, let the user search
//! it, narrow it to a month, page through it, tick some rows and delete
//! them. This crate provides those pieces once, parameterised per entity
//! type, following the Elm Architecture with `update()` and `view()`
//! methods.
//!
//! ## Components
//!
//! - **Data**: [`sync::SyncController`] owns the snapshot, loading and error
//!   state, periodic and realtime refresh, and optimistic deletes.
//! - **Derivation**: [`filter`] (search and month predicates),
//!   [`paginator`] and [`selection`].
//! - **Input**: [`debounce`] for live search, [`key`] for bindings.
//! - **Display**: [`table`] and the composed [`screen::Model`].
//! - **Presets**: [`entity::Entity`] for the standard collections.
//!
//! ## Lifecycle
//!
//! Anything that opens connections or spawns background work implements
//! [`Lifecycle`]. Mount when the screen becomes visible, unmount when it
//! goes away; nothing keeps running in between.
//!
//! ```rust
//! use backoffice_widgets::prelude::*;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Fixed(Vec<Record>);
//!
//! #[async_trait]
//! impl CollectionClient<Record> for Fixed {
//!     async fn fetch_all(&self) -> Result<Vec<Record>> {
//!         Ok(self.0.clone())
//!     }
//!     async fn delete(&self, _id: &str) -> Result<DeleteResponse> {
//!         Ok(DeleteResponse::ok())
//!     }
//!     async fn create(&self, item: &Record) -> Result<Record> {
//!         Ok(item.clone())
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = Arc::new(Fixed(vec![Record::new("c1").with_field("name", "Ada")]));
//! let mut screen = Screen::<Record>::new(ScreenConfig::for_entity(Entity::Customers), client);
//!
//! let load = screen.mount().unwrap();
//! let _pump = screen.update(load.await.unwrap());
//! assert_eq!(screen.state(), ScreenState::Ready);
//! assert_eq!(screen.page_ids(), ["c1"]);
//!
//! screen.unmount();
//! assert!(!screen.mounted());
//! # }
//! ```
//!
//! ## Features
//!
//! - `http`: [`sync::RestClient`], a [`sync::CollectionClient`] over a REST
//!   collection endpoint using reqwest.

pub mod debounce;
pub mod entity;
pub mod error;
pub mod filter;
pub mod item;
pub mod key;
pub mod paginator;
pub mod screen;
pub mod selection;
pub mod sync;
pub mod table;

use bubbletea_rs::Cmd;

/// Components that acquire resources while visible.
///
/// Mounting starts whatever the component needs while on screen (initial
/// load, refresh timers, realtime connections) and may return a command to
/// run. Unmounting releases all of it, and messages produced by work
/// started before the unmount are ignored afterwards.
///
/// ## Implementation Guidelines
///
/// - `mount()` on an already mounted component returns `None` and does
///   nothing else
/// - `unmount()` on an unmounted component is a no-op
/// - A component may be mounted again after being unmounted; the new mount
///   starts from fresh connections
///
/// ```rust
/// use backoffice_widgets::Lifecycle;
/// use bubbletea_rs::Cmd;
///
/// fn remount<T: Lifecycle>(component: &mut T) -> Option<Cmd> {
///     component.unmount();
///     assert!(!component.mounted());
///     component.mount()
/// }
/// ```
pub trait Lifecycle {
    /// Acquires resources and returns the first command to run, if any.
    fn mount(&mut self) -> Option<Cmd>;

    /// Releases every resource acquired by [`Lifecycle::mount`].
    fn unmount(&mut self);

    /// Returns true between a mount and the next unmount.
    fn mounted(&self) -> bool;
}

pub use debounce::Model as Debounce;
pub use entity::Entity;
pub use error::{Error, Result};
pub use filter::{FilterCriteria, FilterPipeline, Month, MonthFilter};
pub use item::{Item, Record};
pub use key::{Binding, Help as KeyHelp, KeyMap};
pub use paginator::Model as Paginator;
pub use screen::Model as Screen;
pub use screen::{ScreenConfig, ScreenKeyMap, ScreenState, ScreenStyles};
pub use selection::Model as Selection;
pub use sync::{
    CollectionClient, DeleteResponse, EventChannel, EventHub, RefreshConfig, ServerEvent,
    SyncController,
};
pub use table::Model as Table;

/// Prelude module for convenient imports.
///
/// ```rust
/// use backoffice_widgets::prelude::*;
///
/// let criteria = FilterCriteria::new("smith", MonthFilter::Month(Month::March));
/// assert!(!criteria.is_empty());
/// ```
pub mod prelude {
    pub use crate::debounce::{DebounceMsg, Model as Debounce};
    pub use crate::entity::Entity;
    pub use crate::error::{Error, Result};
    pub use crate::filter::{FilterCriteria, FilterPipeline, Month, MonthFilter};
    pub use crate::item::{Item, Record};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::paginator::Model as Paginator;
    pub use crate::screen::{
        ConfirmPrompt, Model as Screen, PendingAction, ScreenConfig, ScreenKeyMap, ScreenState,
        ScreenStyles,
    };
    pub use crate::selection::Model as Selection;
    #[cfg(feature = "http")]
    pub use crate::sync::RestClient;
    pub use crate::sync::{
        CollectionClient, DeleteResponse, EventChannel, EventFilter, EventHub, RefreshConfig,
        ServerEvent, SyncController,
    };
    pub use crate::table::{Column, Model as Table};
    pub use crate::Lifecycle;
}
