//! The sync controller: canonical in-memory copy of one remote collection.

use super::client::{CollectionClient, DeleteResponse};
use super::events::{EventChannel, EventFilter};
use super::types::{
    BulkDeletedMsg, CreatedMsg, DeletedMsg, LoadedMsg, RefreshConfig, RefreshReason, SignalMsg,
};
use crate::error::Error;
use crate::item::Item;
use crate::Lifecycle;
use bubbletea_rs::{Cmd, Msg};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

type SignalReceiver = Arc<Mutex<mpsc::UnboundedReceiver<RefreshReason>>>;

struct Realtime {
    channel: Arc<dyn EventChannel>,
    filter: EventFilter,
}

/// Owns the snapshot of a remote collection and keeps it fresh.
///
/// Loads are tagged with a generation number; only the response to the
/// latest issued load is applied. Silent loads are coalesced: while any
/// load is outstanding, further silent requests are dropped.
///
/// While mounted, a background interval and (optionally) a realtime event
/// listener run as tokio tasks. Their triggers are collected by a single
/// signal pump command and answered with one silent load per batch.
pub struct SyncController<I: Item> {
    id: i64,
    client: Arc<dyn CollectionClient<I>>,
    items: Vec<I>,
    loading: bool,
    error: Option<Error>,
    last_synced: Option<DateTime<Utc>>,
    generation: u64,
    awaiting: bool,
    refresh: RefreshConfig,
    realtime: Option<Realtime>,
    mounted: bool,
    session: u64,
    tasks: Vec<JoinHandle<()>>,
    signals: Option<SignalReceiver>,
    pump_armed: bool,
}

impl<I: Item> SyncController<I> {
    /// Creates an unmounted controller with an empty snapshot.
    pub fn new(client: Arc<dyn CollectionClient<I>>) -> Self {
        Self {
            id: next_id(),
            client,
            items: Vec::new(),
            loading: false,
            error: None,
            last_synced: None,
            generation: 0,
            awaiting: false,
            refresh: RefreshConfig::default(),
            realtime: None,
            mounted: false,
            session: 0,
            tasks: Vec::new(),
            signals: None,
            pump_armed: false,
        }
    }

    /// Sets the background refresh settings (builder pattern).
    pub fn with_refresh(mut self, refresh: RefreshConfig) -> Self {
        self.refresh = refresh;
        self
    }

    /// Subscribes to realtime events while mounted (builder pattern).
    ///
    /// Events whose type is in the configured allow-list trigger a silent
    /// refresh.
    pub fn with_realtime(mut self, channel: Arc<dyn EventChannel>) -> Self {
        let filter = EventFilter::new(self.refresh.events.clone());
        self.realtime = Some(Realtime { channel, filter });
        self
    }

    /// Subscribes to realtime events with a custom filter (builder pattern).
    pub fn with_realtime_filter(mut self, channel: Arc<dyn EventChannel>, filter: EventFilter) -> Self {
        self.realtime = Some(Realtime { channel, filter });
        self
    }

    /// Unique id of this controller; messages carry it.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The current snapshot.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// True while a non-silent load is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The error left by the last failed non-silent load, if no load has
    /// succeeded since.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// When the snapshot was last replaced by a successful load.
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    /// Generation of the most recently issued load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the most recently issued load has not resolved.
    pub fn in_flight(&self) -> bool {
        self.awaiting
    }

    /// Background refresh settings.
    pub fn refresh(&self) -> &RefreshConfig {
        &self.refresh
    }

    /// Position of an item in the snapshot.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Requests a fetch of the whole collection.
    ///
    /// A non-silent load raises the loading flag and is always issued. A
    /// silent load leaves the flag alone and is dropped (`None`) while
    /// another load is outstanding.
    pub fn load(&mut self, silent: bool) -> Option<Cmd> {
        if silent && self.awaiting {
            debug!("sync {}: silent load coalesced into generation {}", self.id, self.generation);
            return None;
        }
        if !silent {
            self.loading = true;
        }
        self.generation += 1;
        self.awaiting = true;

        let client = Arc::clone(&self.client);
        let controller_id = self.id;
        let generation = self.generation;
        debug!("sync {controller_id}: load generation {generation} (silent: {silent})");
        Some(Box::pin(async move {
            let result = client.fetch_all().await;
            Some(Box::new(LoadedMsg {
                controller_id,
                generation,
                silent,
                result,
            }) as Msg)
        }))
    }

    /// Removes an item from the snapshot ahead of the server, returning it
    /// so the caller can put it back.
    pub fn optimistic_remove(&mut self, id: &str) -> Option<I> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Appends an item to the snapshot ahead of the next refresh.
    pub fn optimistic_append(&mut self, item: I) {
        self.items.push(item);
    }

    /// Re-inserts an item at `index` (clamped to the snapshot length).
    pub fn restore(&mut self, index: usize, item: I) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Issues a network delete for one id.
    pub fn delete(&self, id: &str) -> Cmd {
        let client = Arc::clone(&self.client);
        let controller_id = self.id;
        let id = id.to_string();
        Box::pin(async move {
            let result = client.delete(&id).await.and_then(DeleteResponse::into_result);
            Some(Box::new(DeletedMsg {
                controller_id,
                id,
                result,
            }) as Msg)
        })
    }

    /// Issues one network delete per id, all at once, and reports every
    /// outcome together. Not atomic: some may succeed while others fail.
    pub fn delete_many(&self, ids: Vec<String>) -> Cmd {
        let client = Arc::clone(&self.client);
        let controller_id = self.id;
        Box::pin(async move {
            let requests = ids.into_iter().map(|id| {
                let client = Arc::clone(&client);
                async move {
                    let result = client.delete(&id).await.and_then(DeleteResponse::into_result);
                    (id, result)
                }
            });
            let outcomes = join_all(requests).await;
            Some(Box::new(BulkDeletedMsg {
                controller_id,
                outcomes,
            }) as Msg)
        })
    }

    /// Issues a network create.
    pub fn create(&self, item: I) -> Cmd {
        let client = Arc::clone(&self.client);
        let controller_id = self.id;
        Box::pin(async move {
            let result = client.create(&item).await;
            Some(Box::new(CreatedMsg {
                controller_id,
                result,
            }) as Msg)
        })
    }

    /// Returns the delete outcome if `msg` answers one of this controller's
    /// deletes.
    pub fn deleted<'a>(&self, msg: &'a Msg) -> Option<&'a DeletedMsg> {
        msg.downcast_ref::<DeletedMsg>()
            .filter(|m| m.controller_id == self.id)
    }

    /// Returns the bulk outcome if `msg` answers one of this controller's
    /// bulk deletes.
    pub fn bulk_deleted<'a>(&self, msg: &'a Msg) -> Option<&'a BulkDeletedMsg> {
        msg.downcast_ref::<BulkDeletedMsg>()
            .filter(|m| m.controller_id == self.id)
    }

    /// Returns the create outcome if `msg` answers one of this controller's
    /// creates.
    pub fn created<'a>(&self, msg: &'a Msg) -> Option<&'a CreatedMsg<I>> {
        msg.downcast_ref::<CreatedMsg<I>>()
            .filter(|m| m.controller_id == self.id)
    }

    /// Handles load results and refresh signals.
    ///
    /// Returns true in the first slot when the snapshot or status changed.
    pub fn update(&mut self, msg: &Msg) -> (bool, Option<Cmd>) {
        if let Some(loaded) = msg.downcast_ref::<LoadedMsg<I>>() {
            if loaded.controller_id != self.id {
                return (false, None);
            }
            let changed = self.apply_loaded(loaded);
            return (changed, self.arm_pump());
        }

        if let Some(signal) = msg.downcast_ref::<SignalMsg>() {
            if signal.controller_id != self.id {
                return (false, None);
            }
            if !self.mounted || signal.session != self.session {
                debug!("sync {}: dropping signal from a previous mount", self.id);
                return (false, None);
            }
            self.pump_armed = false;
            debug!(
                "sync {}: {} refresh trigger(s) {:?}",
                self.id,
                signal.reasons.len(),
                signal.reasons
            );
            return match self.load(true) {
                Some(cmd) => (false, Some(cmd)),
                None => (false, self.arm_pump()),
            };
        }

        (false, None)
    }

    fn apply_loaded(&mut self, loaded: &LoadedMsg<I>) -> bool {
        if loaded.generation != self.generation || !self.awaiting {
            debug!(
                "sync {}: discarding stale load generation {} (latest {})",
                self.id, loaded.generation, self.generation
            );
            return false;
        }
        self.awaiting = false;
        if !loaded.silent {
            self.loading = false;
        }

        match &loaded.result {
            Ok(items) => {
                self.items = items.clone();
                self.error = None;
                self.last_synced = Some(Utc::now());
                debug!("sync {}: snapshot replaced with {} items", self.id, self.items.len());
            }
            Err(err) if loaded.silent => {
                warn!("sync {}: background refresh failed: {err}", self.id);
            }
            Err(err) => {
                error!("sync {}: load failed: {err}", self.id);
                self.error = Some(err.clone());
            }
        }
        true
    }

    fn arm_pump(&mut self) -> Option<Cmd> {
        if !self.mounted || self.pump_armed {
            return None;
        }
        let receiver = Arc::clone(self.signals.as_ref()?);
        self.pump_armed = true;

        let controller_id = self.id;
        let session = self.session;
        Some(Box::pin(async move {
            let mut receiver = receiver.lock().await;
            let first = receiver.recv().await?;
            let mut reasons = vec![first];
            while let Ok(reason) = receiver.try_recv() {
                reasons.push(reason);
            }
            Some(Box::new(SignalMsg {
                controller_id,
                session,
                reasons,
            }) as Msg)
        }))
    }

    fn spawn_tasks(&mut self, sender: mpsc::UnboundedSender<RefreshReason>) {
        let period = self.refresh.interval;
        if !period.is_zero() {
            let sender = sender.clone();
            self.tasks.push(tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if sender.send(RefreshReason::Interval).is_err() {
                        break;
                    }
                }
            }));
        }

        if let Some(realtime) = &self.realtime {
            let channel = Arc::clone(&realtime.channel);
            let filter = realtime.filter.clone();
            let controller_id = self.id;
            self.tasks.push(tokio::spawn(async move {
                let mut source = match channel.connect().await {
                    Ok(source) => source,
                    Err(err) => {
                        warn!("sync {controller_id}: realtime updates unavailable: {err}");
                        return;
                    }
                };
                info!("sync {controller_id}: listening for {:?}", filter.types());
                while let Some(event) = source.next_event().await {
                    if !filter.matches(&event) {
                        continue;
                    }
                    if sender.send(RefreshReason::Event(event.kind)).is_err() {
                        break;
                    }
                }
                debug!("sync {controller_id}: realtime listener stopped");
            }));
        }
    }

    fn release(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.signals = None;
        self.pump_armed = false;
    }
}

impl<I: Item> Lifecycle for SyncController<I> {
    /// Starts the background tasks and the initial non-silent load. The
    /// signal pump starts once that load resolves.
    fn mount(&mut self) -> Option<Cmd> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.session += 1;

        let (sender, receiver) = mpsc::unbounded_channel();
        if tokio::runtime::Handle::try_current().is_ok() {
            self.signals = Some(Arc::new(Mutex::new(receiver)));
            self.spawn_tasks(sender);
        } else {
            warn!("sync {}: no tokio runtime, background refresh disabled", self.id);
        }
        info!("sync {}: mounted", self.id);
        self.load(false)
    }

    /// Stops the background tasks, closes the realtime connection and
    /// invalidates every outstanding load.
    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.release();
        self.generation += 1;
        self.awaiting = false;
        self.loading = false;
        info!("sync {}: unmounted", self.id);
    }

    fn mounted(&self) -> bool {
        self.mounted
    }
}

impl<I: Item> Drop for SyncController<I> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Record;
    use crate::sync::events::{EventHub, ServerEvent};
    use crate::sync::testing::{run, MockClient};
    use std::time::Duration;

    fn records(ids: &[&str]) -> Vec<Record> {
        ids.iter()
            .map(|id| Record::new(*id).with_field("name", format!("Client {id}")))
            .collect()
    }

    fn ids(controller: &SyncController<Record>) -> Vec<String> {
        controller.items().iter().map(|r| r.id.clone()).collect()
    }

    async fn loaded(mock: &Arc<MockClient<Record>>, items: &[&str]) -> SyncController<Record> {
        mock.set_items(records(items));
        let mut controller = SyncController::<Record>::new(mock.clone());
        let cmd = controller.load(false).unwrap();
        let msg = run(cmd).await;
        controller.update(&msg);
        controller
    }

    async fn wait_for_connections(hub: &EventHub, expected: usize) {
        for _ in 0..400 {
            if hub.connections() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("expected {expected} connections, have {}", hub.connections());
    }

    #[tokio::test]
    async fn test_non_silent_load_toggles_loading() {
        let mock = Arc::new(MockClient::new(records(&["a", "b"])));
        let mut controller = SyncController::<Record>::new(mock.clone());

        let cmd = controller.load(false).unwrap();
        assert!(controller.loading());
        assert!(controller.in_flight());

        let msg = run(cmd).await;
        let (changed, _) = controller.update(&msg);
        assert!(changed);
        assert!(!controller.loading());
        assert_eq!(ids(&controller), ["a", "b"]);
        assert!(controller.last_synced().is_some());
    }

    #[tokio::test]
    async fn test_silent_load_never_touches_loading() {
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock.clone());
        let cmd = controller.load(true).unwrap();
        assert!(!controller.loading());
        controller.update(&run(cmd).await);
        assert!(!controller.loading());
        assert_eq!(ids(&controller), ["a"]);
    }

    #[tokio::test]
    async fn test_optimistic_remove_is_immediate() {
        let mock = Arc::new(MockClient::new(vec![]));
        let mut controller = loaded(&mock, &["A", "B", "C"]).await;

        let removed = controller.optimistic_remove("B");
        assert_eq!(removed.map(|r| r.id), Some("B".to_string()));
        assert_eq!(ids(&controller), ["A", "C"]);
        assert!(controller.optimistic_remove("missing").is_none());

        controller.restore(1, Record::new("B"));
        assert_eq!(ids(&controller), ["A", "B", "C"]);
        controller.restore(99, Record::new("D"));
        controller.optimistic_append(Record::new("E"));
        assert_eq!(ids(&controller), ["A", "B", "C", "D", "E"]);
    }

    #[tokio::test]
    async fn test_silent_failure_keeps_snapshot_without_error() {
        let mock = Arc::new(MockClient::new(vec![]));
        let mut controller = loaded(&mock, &["a", "b", "c"]).await;

        mock.set_offline(true);
        let cmd = controller.load(true).unwrap();
        controller.update(&run(cmd).await);

        assert_eq!(ids(&controller), ["a", "b", "c"]);
        assert!(controller.error().is_none());
        assert!(!controller.loading());
    }

    #[tokio::test]
    async fn test_failed_load_sets_error_and_success_clears_it() {
        let mock = Arc::new(MockClient::new(records(&["a"])));
        mock.set_offline(true);
        let mut controller = SyncController::<Record>::new(mock.clone());

        let cmd = controller.load(false).unwrap();
        controller.update(&run(cmd).await);
        assert!(matches!(controller.error(), Some(Error::Network(_))));
        assert!(!controller.loading());

        mock.set_offline(false);
        let cmd = controller.load(true).unwrap();
        controller.update(&run(cmd).await);
        assert!(controller.error().is_none());
        assert_eq!(ids(&controller), ["a"]);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mock = Arc::new(MockClient::new(vec![]));
        let mut controller = SyncController::<Record>::new(mock.clone());

        let slow = controller.load(false).unwrap();
        let fast = controller.load(false).unwrap();
        assert_eq!(controller.generation(), 2);

        mock.set_items(records(&["old"]));
        let stale = run(slow).await;
        mock.set_items(records(&["new"]));
        let latest = run(fast).await;

        let (changed, _) = controller.update(&latest);
        assert!(changed);
        let (changed, _) = controller.update(&stale);
        assert!(!changed);
        assert_eq!(ids(&controller), ["new"]);
        assert!(!controller.loading());
    }

    #[tokio::test]
    async fn test_silent_loads_coalesce_while_in_flight() {
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock.clone());

        let first = controller.load(true).unwrap();
        assert!(controller.load(true).is_none());
        assert!(controller.load(true).is_none());
        controller.update(&run(first).await);
        assert_eq!(mock.fetch_count(), 1);

        assert!(controller.load(true).is_some());
    }

    #[tokio::test]
    async fn test_messages_for_other_controllers_are_ignored() {
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut mine = SyncController::<Record>::new(mock.clone());
        let mut other = SyncController::<Record>::new(mock.clone());

        let _pending = mine.load(false);
        let msg = run(other.load(false).unwrap()).await;
        let (changed, cmd) = mine.update(&msg);
        assert!(!changed && cmd.is_none());
        assert!(mine.items().is_empty());
        assert!(mine.deleted(&run(other.delete("a")).await).is_none());
    }

    #[tokio::test]
    async fn test_delete_many_reports_each_outcome() {
        let mock = Arc::new(MockClient::new(records(&["1", "2", "3"])));
        mock.fail_delete_of("2");
        let controller = SyncController::<Record>::new(mock.clone());

        let msg = run(controller.delete_many(vec!["1".into(), "2".into(), "3".into()])).await;
        let bulk = controller.bulk_deleted(&msg).unwrap();
        assert_eq!(bulk.succeeded_ids(), ["1", "3"]);
        assert_eq!(bulk.failed_ids(), ["2"]);
        assert_eq!(mock.server_ids(), ["2"]);
        assert_eq!(mock.deletes.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rejected_delete_is_an_error() {
        let mock = Arc::new(MockClient::new(records(&["1"])));
        let controller = SyncController::<Record>::new(mock.clone());
        let msg = run(controller.delete("nope")).await;
        let deleted = controller.deleted(&msg).unwrap();
        assert_eq!(deleted.id, "nope");
        assert!(matches!(deleted.result, Err(Error::Rejected(_))));
    }

    #[tokio::test]
    async fn test_create_returns_server_copy() {
        let mock = Arc::new(MockClient::new(vec![]));
        let controller = SyncController::<Record>::new(mock.clone());
        let msg = run(controller.create(Record::new("n1"))).await;
        let created = controller.created(&msg).unwrap();
        assert_eq!(created.result.as_ref().map(|r| r.id.as_str()), Ok("n1"));
    }

    #[tokio::test]
    async fn test_realtime_event_triggers_one_silent_load() {
        let hub = EventHub::default();
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock.clone())
            .with_refresh(
                RefreshConfig::default()
                    .with_interval(Duration::ZERO)
                    .with_events(["customer-updated"]),
            )
            .with_realtime(Arc::new(hub.clone()));

        let initial = controller.mount().unwrap();
        assert!(controller.loading());
        let (_, pump) = controller.update(&run(initial).await);
        let pump = pump.expect("pump armed after the initial load");
        wait_for_connections(&hub, 1).await;

        mock.set_items(records(&["a", "b"]));
        hub.publish(ServerEvent::new("owner-stats-updated"));
        hub.publish(ServerEvent::new("customer-updated"));
        hub.publish(ServerEvent::new("customer-updated"));

        let signal = run(pump).await;
        let reasons = &signal.downcast_ref::<SignalMsg>().unwrap().reasons;
        assert!(!reasons.is_empty());
        assert!(reasons
            .iter()
            .all(|r| *r == RefreshReason::Event("customer-updated".into())));

        let (_, refresh) = controller.update(&signal);
        let refresh = refresh.expect("silent load issued");
        assert!(!controller.loading());
        let (changed, rearmed) = controller.update(&run(refresh).await);
        assert!(changed);
        assert!(rearmed.is_some());
        assert_eq!(ids(&controller), ["a", "b"]);
        assert_eq!(mock.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_signal_while_loading_rearms_without_fetching() {
        let hub = EventHub::default();
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock.clone())
            .with_refresh(RefreshConfig::default().with_events(["customer-updated"]))
            .with_realtime(Arc::new(hub.clone()));

        let initial = controller.mount().unwrap();
        let (_, pump) = controller.update(&run(initial).await);
        wait_for_connections(&hub, 1).await;

        let _retry = controller.load(false).unwrap();
        hub.publish(ServerEvent::new("customer-updated"));
        let signal = run(pump.unwrap()).await;
        let (_, next) = controller.update(&signal);
        assert!(next.is_some(), "pump re-armed");
        assert_eq!(controller.generation(), 2);
    }

    #[tokio::test]
    async fn test_interval_triggers_refresh() {
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock.clone())
            .with_refresh(RefreshConfig::default().with_interval(Duration::from_millis(20)));

        let initial = controller.mount().unwrap();
        let (_, pump) = controller.update(&run(initial).await);
        let signal = run(pump.unwrap()).await;
        assert_eq!(
            signal.downcast_ref::<SignalMsg>().unwrap().reasons[0],
            RefreshReason::Interval
        );
        controller.unmount();
    }

    #[tokio::test]
    async fn test_unmount_releases_everything() {
        let hub = EventHub::default();
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock.clone())
            .with_refresh(
                RefreshConfig::default()
                    .with_interval(Duration::ZERO)
                    .with_events(["customer-updated"]),
            )
            .with_realtime(Arc::new(hub.clone()));

        let initial = controller.mount().unwrap();
        assert!(controller.mount().is_none());
        let (_, pump) = controller.update(&run(initial).await);
        wait_for_connections(&hub, 1).await;

        let late = controller.load(true).unwrap();
        controller.unmount();
        assert!(!controller.mounted());
        wait_for_connections(&hub, 0).await;

        // The pump ends without a message once its senders are gone.
        let ended = tokio::time::timeout(Duration::from_secs(2), pump.unwrap())
            .await
            .unwrap();
        assert!(ended.is_none());

        // A response arriving after unmount does not touch the snapshot.
        mock.set_items(records(&["zombie"]));
        let (changed, cmd) = controller.update(&run(late).await);
        assert!(!changed && cmd.is_none());
        assert_eq!(ids(&controller), ["a"]);
    }

    #[tokio::test]
    async fn test_remount_opens_a_single_fresh_connection() {
        let hub = EventHub::default();
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock.clone())
            .with_refresh(RefreshConfig::default().with_events(["customer-updated"]))
            .with_realtime(Arc::new(hub.clone()));

        let _ = controller.mount();
        wait_for_connections(&hub, 1).await;
        controller.unmount();
        wait_for_connections(&hub, 0).await;
        let _ = controller.mount();
        wait_for_connections(&hub, 1).await;
        drop(controller);
        wait_for_connections(&hub, 0).await;
    }

    #[test]
    fn test_mount_without_runtime_still_loads() {
        let mock = Arc::new(MockClient::new(records(&["a"])));
        let mut controller = SyncController::<Record>::new(mock);
        assert!(controller.mount().is_some());
        assert!(controller.mounted());
        assert!(controller.loading());
    }
}
