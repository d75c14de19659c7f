//! Debouncing for live input.
//!
//! Every call to [`Model::trigger`] schedules a [`DebounceMsg`] after the
//! configured delay and supersedes any message scheduled earlier. Only the
//! message carrying the latest tag is accepted by [`Model::update`]; older
//! ones are ignored rather than queued, so a burst of keystrokes results in
//! exactly one filter pass measured from the last keystroke.
//!
//! ```rust
//! use backoffice_widgets::debounce::{DebounceMsg, Model};
//! use bubbletea_rs::Msg;
//! use std::time::Duration;
//!
//! let mut debounce = Model::new(Duration::from_millis(300));
//! let _first = debounce.trigger();
//! let _second = debounce.trigger();
//!
//! // Only the second trigger's message fires.
//! let stale: Msg = Box::new(DebounceMsg::for_test(debounce.id(), 1));
//! let latest: Msg = Box::new(DebounceMsg::for_test(debounce.id(), 2));
//! assert!(!debounce.update(&stale));
//! assert!(debounce.update(&latest));
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Default delay between the last keystroke and the filter pass.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered when a debounce delay elapses.
#[derive(Debug, Clone)]
pub struct DebounceMsg {
    /// Identifier of the debouncer that scheduled this message.
    pub id: i64,
    tag: u64,
}

impl DebounceMsg {
    /// Builds a message by hand. Useful when driving a debouncer in tests
    /// without waiting for the real delay.
    pub fn for_test(id: i64, tag: u64) -> Self {
        Self { id, tag }
    }
}

/// Debouncer state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Delay between the last trigger and the accepted message.
    pub delay: Duration,
    id: i64,
    tag: u64,
    pending: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Model {
    /// Creates a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            id: next_id(),
            tag: 0,
            pending: false,
        }
    }

    /// Returns the unique identifier of this debouncer.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns true while a triggered delay has not yet been accepted.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Supersedes any pending delay and schedules a new one.
    pub fn trigger(&mut self) -> Cmd {
        self.tag += 1;
        self.pending = true;
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.delay, move |_| Box::new(DebounceMsg { id, tag }) as Msg)
    }

    /// Cancels any pending delay without scheduling a new one.
    pub fn cancel(&mut self) {
        if self.pending {
            self.tag += 1;
            self.pending = false;
        }
    }

    /// Returns true when `msg` is this debouncer's latest message, i.e. the
    /// debounced action should run now.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(debounce_msg) = msg.downcast_ref::<DebounceMsg>() else {
            return false;
        };
        if !self.pending || debounce_msg.id != self.id || debounce_msg.tag != self.tag {
            return false;
        }
        self.pending = false;
        true
    }
}
