//! Derivation of the visible set from the canonical collection.

use crate::filter::FilterSpec;
use crate::model::AssetRecord;
use crate::sort::{SortSpec, sorted};

/// Filter then sort. Always recomputed wholesale from the full canonical
/// collection so the visible set can never drift from what `filter` and
/// `sort` would produce on the current records.
pub fn project(assets: &[AssetRecord], filter: &FilterSpec, sort: &SortSpec) -> Vec<AssetRecord> {
    let visible: Vec<AssetRecord> = assets
        .iter()
        .filter(|asset| filter.matches(asset))
        .cloned()
        .collect();
    sorted(&visible, sort)
}
