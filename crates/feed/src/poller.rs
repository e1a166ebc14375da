//! Periodic profile polling.
//!
//! Every tick issues a fetch tagged with an increasing sequence number.
//! Fetches run alongside the tick loop, so a slow request can finish after
//! a newer one; the store only accepts a response newer than the one it
//! holds. Failed and empty polls leave the previous snapshot in place.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use studyjam_core::RawProfile;
use tokio::sync::{oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::config::FeedConfig;
use crate::source::{ProfileSource, Result};

/// A successfully fetched set of profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Sequence number of the poll that produced it
    pub sequence: u64,
    /// When the response was applied
    pub fetched_at: DateTime<Utc>,
    /// Profiles as delivered by the source
    pub profiles: Vec<RawProfile>,
}

/// Latest applied snapshot, shared between the poller and its readers.
#[derive(Clone)]
pub struct SnapshotStore {
    tx: Arc<watch::Sender<Option<Arc<Snapshot>>>>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Latest snapshot, if any poll has succeeded.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.tx.borrow().as_ref().cloned()
    }

    /// Sequence of the latest snapshot, 0 when empty.
    pub fn applied_sequence(&self) -> u64 {
        self.tx.borrow().as_ref().map_or(0, |s| s.sequence)
    }

    /// Receiver notified whenever a snapshot is applied.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.tx.subscribe()
    }

    /// Replace the snapshot if `sequence` is newer than the applied one.
    ///
    /// Returns whether the snapshot was replaced.
    pub fn apply(&self, sequence: u64, profiles: Vec<RawProfile>) -> bool {
        let fetched_at = Utc::now();
        self.tx.send_if_modified(|current| {
            if current.as_ref().is_some_and(|s| s.sequence >= sequence) {
                return false;
            }
            *current = Some(Arc::new(Snapshot {
                sequence,
                fetched_at,
                profiles,
            }));
            true
        })
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Polls a profile source on a fixed interval.
pub struct Poller {
    source: Arc<dyn ProfileSource>,
    interval: Duration,
    store: SnapshotStore,
}

impl Poller {
    /// Create a poller with an empty store.
    pub fn new(source: Arc<dyn ProfileSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            store: SnapshotStore::new(),
        }
    }

    /// Create a poller that polls at the configured interval.
    pub fn from_config(source: Arc<dyn ProfileSource>, config: &FeedConfig) -> Self {
        Self::new(source, config.poll_interval)
    }

    /// Use an existing store.
    pub fn with_store(mut self, store: SnapshotStore) -> Self {
        self.store = store;
        self
    }

    /// The store snapshots are applied to.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Start polling in the background. The first poll is issued at once.
    pub fn spawn(self) -> PollerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let store = self.store.clone();
        let task = tokio::spawn(self.run(shutdown_rx));

        PollerHandle {
            store,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    async fn run(self, mut shutdown: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut in_flight: JoinSet<(u64, Result<Vec<RawProfile>>)> = JoinSet::new();
        let mut sequence = 0u64;

        info!("Polling {} every {:?}", self.source.describe(), self.interval);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    sequence += 1;
                    let seq = sequence;
                    let source = Arc::clone(&self.source);
                    in_flight.spawn(async move { (seq, source.fetch().await) });
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    match joined {
                        Ok((seq, result)) => self.handle_response(seq, result),
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => error!("Poll task failed: {}", e),
                    }
                }
            }
        }

        if !in_flight.is_empty() {
            debug!("Dropping {} in-flight polls", in_flight.len());
        }
        in_flight.abort_all();
        info!("Stopped polling {}", self.source.describe());
    }

    fn handle_response(&self, seq: u64, result: Result<Vec<RawProfile>>) {
        match result {
            Ok(profiles) if profiles.is_empty() => {
                debug!("Poll {} returned no profiles, keeping previous snapshot", seq);
            }
            Ok(profiles) => {
                let count = profiles.len();
                if self.store.apply(seq, profiles) {
                    debug!("Applied poll {} ({} profiles)", seq, count);
                } else {
                    debug!(
                        "Discarded stale poll {} (already at {})",
                        seq,
                        self.store.applied_sequence()
                    );
                }
            }
            Err(e) => {
                warn!(
                    "Poll {} of {} failed, keeping previous snapshot: {}",
                    seq,
                    self.source.describe(),
                    e
                );
            }
        }
    }
}

/// Handle to a running poller. Dropping it stops the poller.
pub struct PollerHandle {
    store: SnapshotStore,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// The store snapshots are applied to.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Receiver notified whenever a snapshot is applied.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.store.subscribe()
    }

    /// Stop polling, dropping any in-flight request, and wait for the loop
    /// to exit.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Poller task failed: {}", e);
                }
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
