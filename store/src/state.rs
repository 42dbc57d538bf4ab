//! Internal store state: the canonical collection plus everything derived
//! from it, guarded as one unit by the store mutex.

use std::collections::HashMap;

use assets::filter::FilterSpec;
use assets::model::{AssetId, AssetRecord};
use assets::projection::project;
use assets::sort::SortSpec;

/// All store-owned state.
///
/// The canonical collection lives in a `Vec` so the stable sort always sees
/// the same input sequence; the id index makes per-asset lookups O(1).
#[derive(Debug, Default)]
pub(crate) struct TrackerState {
    pub(crate) assets: Vec<AssetRecord>,
    pub(crate) index: HashMap<AssetId, usize>,
    pub(crate) filter: FilterSpec,
    pub(crate) sort: SortSpec,
    pub(crate) visible: Vec<AssetRecord>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
}

impl TrackerState {
    /// Replace the canonical collection wholesale and rebuild the id index.
    pub(crate) fn replace_assets(&mut self, batch: Vec<AssetRecord>) {
        self.index = batch
            .iter()
            .enumerate()
            .map(|(pos, asset)| (asset.id.clone(), pos))
            .collect();
        self.assets = batch;
    }

    /// Re-derive the visible sequence from the canonical collection.
    pub(crate) fn recompute(&mut self) {
        self.visible = project(&self.assets, &self.filter, &self.sort);
    }

    pub(crate) fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            assets: self.assets.clone(),
            visible: self.visible.clone(),
            filter: self.filter.clone(),
            sort: self.sort,
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// Read-only copy of the store state published to subscribers after every
/// committed mutation. Holds no references into the store.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub assets: Vec<AssetRecord>,
    pub visible: Vec<AssetRecord>,
    pub filter: FilterSpec,
    pub sort: SortSpec,
    pub loading: bool,
    pub error: Option<String>,
}
