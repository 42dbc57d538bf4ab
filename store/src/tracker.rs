//! TrackerStore
//!
//! Single-writer state container for the live asset view.
//! Responsibilities:
//!   • Hold the canonical asset collection and the active filter/sort specs
//!   • Apply the initial batch load and streamed partial updates atomically
//!   • Re-derive the filtered + sorted projection after every mutation
//!   • Broadcast immutable snapshots to all subscribed components
//!
//! Every mutation locks the state, commits, builds a snapshot, releases the
//! lock and only then notifies subscribers, so no reader can ever observe a
//! half-applied transition.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc::Sender};
use tracing::{debug, warn};
use uuid::Uuid;

use assets::filter::{FilterPatch, FilterSpec};
use assets::model::AssetRecord;
use assets::sort::{SortKey, SortSpec};
use assets::update::{AssetUpdate, merge};

use crate::source::AssetSource;
use crate::state::{StoreSnapshot, TrackerState};

pub type SubscriptionId = Uuid;

pub struct TrackerStore {
    state: Mutex<TrackerState>,
    subscribers: Mutex<HashMap<SubscriptionId, Sender<StoreSnapshot>>>,
}

impl TrackerStore {
    /// Create an empty store wrapped in `Arc<Self>` for multi-task ownership.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(TrackerState::default()),
            subscribers: Mutex::new(HashMap::new()),
        })
    }

    // ---- Mutations ----

    /// Replace the canonical collection wholesale, recompute the projection
    /// and clear the loading flag. A batch containing an invalid record is
    /// rejected as a unit: the error is recorded and the collection stays
    /// untouched.
    pub async fn load_assets(&self, batch: Vec<AssetRecord>) {
        self.commit(|state| {
            match batch.iter().find_map(|asset| asset.validate().err()) {
                Some(err) => {
                    warn!(%err, "asset batch rejected");
                    state.error = Some(err.to_string());
                }
                None => {
                    state.replace_assets(batch);
                    state.recompute();
                }
            }
            state.loading = false;
            true
        })
        .await;
    }

    /// Merge a partial update into the record with this id. An id that is
    /// not currently tracked is silently ignored; a rejected merge records
    /// the error and leaves the collection as it was.
    pub async fn update_asset(&self, id: &str, update: AssetUpdate) {
        self.commit(|state| {
            let Some(&pos) = state.index.get(id) else {
                debug!(asset = id, "update for untracked asset dropped");
                return false;
            };
            match merge(&state.assets[pos], &update) {
                Ok(merged) => {
                    state.assets[pos] = merged;
                    state.recompute();
                }
                Err(err) => {
                    warn!(asset = id, %err, "partial update rejected");
                    state.error = Some(err.to_string());
                    state.loading = false;
                }
            }
            true
        })
        .await;
    }

    /// Wire-shaped variant of [`TrackerStore::update_asset`]: the update
    /// arrives as a loose JSON object. A payload that fails to parse is
    /// recorded exactly like a rejected merge.
    pub async fn apply_raw_update(&self, id: &str, payload: &serde_json::Value) {
        match AssetUpdate::from_value(payload) {
            Ok(update) => self.update_asset(id, update).await,
            Err(err) => {
                self.commit(|state| {
                    warn!(asset = id, %err, "malformed update payload rejected");
                    state.error = Some(err.to_string());
                    state.loading = false;
                    true
                })
                .await;
            }
        }
    }

    /// Shallow-merge `patch` into the active filter and recompute.
    pub async fn set_filter(&self, patch: FilterPatch) {
        self.commit(|state| {
            state.filter.apply(patch);
            state.recompute();
            true
        })
        .await;
    }

    /// Replace the sort spec wholesale and recompute.
    pub async fn set_sort(&self, spec: SortSpec) {
        self.commit(|state| {
            state.sort = spec;
            state.recompute();
            true
        })
        .await;
    }

    /// Re-select `key`: flips the direction when it is already the active
    /// key, otherwise starts ascending.
    pub async fn toggle_sort(&self, key: SortKey) {
        self.commit(|state| {
            state.sort = state.sort.toggled(key);
            state.recompute();
            true
        })
        .await;
    }

    /// Restore the default filter and recompute.
    pub async fn reset_filter(&self) {
        self.commit(|state| {
            state.filter = FilterSpec::default();
            state.recompute();
            true
        })
        .await;
    }

    pub async fn set_loading(&self, loading: bool) {
        self.commit(|state| {
            state.loading = loading;
            true
        })
        .await;
    }

    /// Record or clear the store-level error. Recording one also clears the
    /// loading flag.
    pub async fn set_error(&self, error: Option<String>) {
        self.commit(|state| {
            if error.is_some() {
                state.loading = false;
            }
            state.error = error;
            true
        })
        .await;
    }

    /// Bootstrap the collection from an external source: marks the store
    /// loading, then either loads the fetched batch or records the source's
    /// failure message verbatim.
    pub async fn hydrate<S: AssetSource>(&self, source: &S) {
        self.set_loading(true).await;
        match source.fetch_assets().await {
            Ok(batch) => self.load_assets(batch).await,
            Err(err) => self.set_error(Some(err.to_string())).await,
        }
    }

    // ---- Selectors (read-only clones, never internal references) ----

    pub async fn assets(&self) -> Vec<AssetRecord> {
        self.state.lock().await.assets.clone()
    }

    /// The derived filtered + sorted projection.
    pub async fn visible_assets(&self) -> Vec<AssetRecord> {
        self.state.lock().await.visible.clone()
    }

    pub async fn filter(&self) -> FilterSpec {
        self.state.lock().await.filter.clone()
    }

    pub async fn sort(&self) -> SortSpec {
        self.state.lock().await.sort
    }

    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.lock().await.snapshot()
    }

    // ---- Pub/sub ----

    /// Register a subscriber channel; it receives a snapshot after every
    /// committed mutation, in commit order.
    pub async fn subscribe(&self, sender: Sender<StoreSnapshot>) -> SubscriptionId {
        let id = Uuid::new_v4();
        self.subscribers.lock().await.insert(id, sender);
        id
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().await.remove(&id);
    }

    /// Run one state transition. When `mutate` reports a committed change,
    /// a snapshot taken inside the critical section is broadcast after the
    /// state lock is released.
    async fn commit<F>(&self, mutate: F)
    where
        F: FnOnce(&mut TrackerState) -> bool,
    {
        let snapshot = {
            let mut state = self.state.lock().await;
            if !mutate(&mut state) {
                return;
            }
            state.snapshot()
        };
        self.broadcast(snapshot).await;
    }

    async fn broadcast(&self, snapshot: StoreSnapshot) {
        let subscribers = self.subscribers.lock().await;
        for sender in subscribers.values() {
            let _ = sender.send(snapshot.clone()).await;
        }
    }
}
