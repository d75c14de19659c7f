//! In-memory collaborators for tests.

use super::client::{CollectionClient, DeleteResponse};
use crate::error::{Error, Result};
use crate::item::Item;
use async_trait::async_trait;
use bubbletea_rs::{Cmd, Msg};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A collection held in memory, with switches for simulating failures.
pub(crate) struct MockClient<I> {
    server: Mutex<Vec<I>>,
    fail_fetch: AtomicBool,
    failing_deletes: Mutex<HashSet<String>>,
    fetches: AtomicUsize,
    pub deletes: Mutex<Vec<String>>,
}

impl<I: Item> MockClient<I> {
    pub fn new(items: Vec<I>) -> Self {
        Self {
            server: Mutex::new(items),
            fail_fetch: AtomicBool::new(false),
            failing_deletes: Mutex::new(HashSet::new()),
            fetches: AtomicUsize::new(0),
            deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn set_items(&self, items: Vec<I>) {
        *self.server.lock().unwrap() = items;
    }

    pub fn server_ids(&self) -> Vec<String> {
        self.server.lock().unwrap().iter().map(Item::id).collect()
    }

    pub fn set_offline(&self, offline: bool) {
        self.fail_fetch.store(offline, Ordering::SeqCst);
    }

    pub fn fail_delete_of(&self, id: &str) {
        self.failing_deletes.lock().unwrap().insert(id.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<I: Item> CollectionClient<I> for MockClient<I> {
    async fn fetch_all(&self) -> Result<Vec<I>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Error::Network("connection refused".to_string()));
        }
        Ok(self.server.lock().unwrap().clone())
    }

    async fn delete(&self, id: &str) -> Result<DeleteResponse> {
        self.deletes.lock().unwrap().push(id.to_string());
        if self.failing_deletes.lock().unwrap().contains(id) {
            return Err(Error::Network(format!("timeout deleting {id}")));
        }
        let mut server = self.server.lock().unwrap();
        let before = server.len();
        server.retain(|item| item.id() != id);
        if server.len() == before {
            return Ok(DeleteResponse::rejected("not found"));
        }
        Ok(DeleteResponse::ok())
    }

    async fn create(&self, item: &I) -> Result<I> {
        self.server.lock().unwrap().push(item.clone());
        Ok(item.clone())
    }
}

/// Awaits a command and returns its message.
pub(crate) async fn run(cmd: Cmd) -> Msg {
    tokio::time::timeout(Duration::from_secs(2), cmd)
        .await
        .expect("command timed out")
        .expect("command produced no message")
}
