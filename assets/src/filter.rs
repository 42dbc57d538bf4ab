//! Filter predicate over asset records.

use serde::{Deserialize, Serialize};

use crate::model::AssetRecord;

/// Inclusive numeric range. `min > max` is legal and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// What the visible set is narrowed down by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring match against name or symbol.
    pub search_term: String,
    pub price_range: ValueRange,
    pub market_cap_range: ValueRange,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            price_range: ValueRange::new(0.0, 100_000.0),
            market_cap_range: ValueRange::new(0.0, 1_000_000_000_000.0),
        }
    }
}

impl FilterSpec {
    /// True iff `asset` passes the search term and both range conditions.
    pub fn matches(&self, asset: &AssetRecord) -> bool {
        let matches_search = self.search_term.is_empty() || {
            let term = self.search_term.to_lowercase();
            asset.name.to_lowercase().contains(&term)
                || asset.symbol.to_lowercase().contains(&term)
        };

        matches_search
            && self.price_range.contains(asset.price)
            && self.market_cap_range.contains(asset.market_cap)
    }

    /// Shallow-merge `patch` into this spec: fields carried by the patch
    /// overwrite, the rest stay as they were.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(term) = patch.search_term {
            self.search_term = term;
        }
        if let Some(range) = patch.price_range {
            self.price_range = range;
        }
        if let Some(range) = patch.market_cap_range {
            self.market_cap_range = range;
        }
    }
}

/// Per-field override of a [`FilterSpec`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search_term: Option<String>,
    pub price_range: Option<ValueRange>,
    pub market_cap_range: Option<ValueRange>,
}

impl FilterPatch {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn price_range(min: f64, max: f64) -> Self {
        Self {
            price_range: Some(ValueRange::new(min, max)),
            ..Self::default()
        }
    }

    pub fn market_cap_range(min: f64, max: f64) -> Self {
        Self {
            market_cap_range: Some(ValueRange::new(min, max)),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::record;

    #[test]
    fn empty_search_term_matches_everything() {
        let filter = FilterSpec::default();
        assert!(filter.matches(&record("bitcoin", 1, 50_000.0, 950_000.0)));
        assert!(filter.matches(&record("solana", 5, 150.0, 50_000.0)));
    }

    #[test]
    fn search_is_case_insensitive_on_name_and_symbol() {
        let mut filter = FilterSpec::default();
        let mut btc = record("bitcoin", 1, 50_000.0, 950_000.0);
        btc.symbol = "XBT".into();

        filter.search_term = "BITC".into();
        assert!(filter.matches(&btc)); // name only

        filter.search_term = "xbt".into();
        assert!(filter.matches(&btc)); // symbol only

        filter.search_term = "eth".into();
        assert!(!filter.matches(&btc));
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let mut filter = FilterSpec::default();
        filter.price_range = ValueRange::new(10.0, 20.0);

        assert!(filter.matches(&record("a", 1, 10.0, 100.0)));
        assert!(filter.matches(&record("b", 2, 20.0, 100.0)));
        assert!(!filter.matches(&record("c", 3, 20.01, 100.0)));
        assert!(!filter.matches(&record("d", 4, 9.99, 100.0)));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let mut filter = FilterSpec::default();
        filter.market_cap_range = ValueRange::new(500.0, 100.0);
        assert!(!filter.matches(&record("a", 1, 10.0, 300.0)));
    }

    #[test]
    fn patch_overwrites_only_named_fields() {
        let mut filter = FilterSpec::default();
        filter.apply(FilterPatch::search("sol"));

        assert_eq!(filter.search_term, "sol");
        assert_eq!(filter.price_range, FilterSpec::default().price_range);
        assert_eq!(
            filter.market_cap_range,
            FilterSpec::default().market_cap_range
        );

        filter.apply(FilterPatch::price_range(1.0, 2.0));
        assert_eq!(filter.search_term, "sol");
        assert_eq!(filter.price_range, ValueRange::new(1.0, 2.0));
    }
}
