//! Ordering of asset records under a sort specification.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::AssetRecord;

/// Closed set of fields the projection may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Rank,
    Name,
    Symbol,
    Price,
    PriceChange1h,
    PriceChange24h,
    PriceChange7d,
    MarketCap,
    Volume24h,
}

impl SortKey {
    /// Natural (ascending) ordering of `a` and `b` under this key.
    fn compare(self, a: &AssetRecord, b: &AssetRecord) -> Ordering {
        match self {
            SortKey::Rank => a.rank.cmp(&b.rank),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Symbol => a.symbol.cmp(&b.symbol),
            // All numeric fields are finite once in the store, so total_cmp
            // agrees with the plain numeric order.
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::PriceChange1h => a.price_change_1h.total_cmp(&b.price_change_1h),
            SortKey::PriceChange24h => a.price_change_24h.total_cmp(&b.price_change_24h),
            SortKey::PriceChange7d => a.price_change_7d.total_cmp(&b.price_change_7d),
            SortKey::MarketCap => a.market_cap.total_cmp(&b.market_cap),
            SortKey::Volume24h => a.volume_24h.total_cmp(&b.volume_24h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Rank,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Selecting the active key again flips the direction; selecting a new
    /// key always starts ascending.
    pub fn toggled(&self, key: SortKey) -> SortSpec {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortSpec { key, direction }
    }
}

/// Return a new sequence holding every element of `assets` ordered under
/// `spec`. The sort is stable in both directions: records with equal keys
/// keep their relative input order. The input is never mutated.
pub fn sorted(assets: &[AssetRecord], spec: &SortSpec) -> Vec<AssetRecord> {
    let mut out = assets.to_vec();
    out.sort_by(|a, b| {
        let ord = spec.key.compare(a, b);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    out
}
