//! Canonical shape of one tracked asset.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub type AssetId = String;

/// Number of past price samples kept per asset, oldest first.
pub const SPARKLINE_LEN: usize = 7;

/// One tracked asset and its recent-price window.
///
/// `id` is unique across the collection and never changes after creation.
/// `name`, `symbol` and `logo` are static display fields; partial updates
/// have no way to touch them (see [`crate::update::AssetUpdate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: AssetId,
    pub rank: u32,
    pub logo: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub price_change_1h: f64,
    pub price_change_24h: f64,
    pub price_change_7d: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,
    /// `None` means unlimited supply.
    pub max_supply: Option<f64>,
    /// Past price samples, oldest first. Always `SPARKLINE_LEN` entries.
    pub sparkline: Vec<f64>,
}

impl AssetRecord {
    /// Check the invariants a record must satisfy before it may enter the
    /// collection: every numeric field finite, rank positive, and a full
    /// sparkline window.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
        }
        if let Some(value) = self.max_supply {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: "maxSupply",
                    value,
                });
            }
        }
        if self.rank == 0 {
            return Err(ValidationError::InvalidRank);
        }
        if self.sparkline.len() != SPARKLINE_LEN {
            return Err(ValidationError::SparklineLength {
                expected: SPARKLINE_LEN,
                actual: self.sparkline.len(),
            });
        }
        if let Some(value) = self.sparkline.iter().copied().find(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite {
                field: "sparkline",
                value,
            });
        }
        Ok(())
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 7] {
        [
            ("price", self.price),
            ("priceChange1h", self.price_change_1h),
            ("priceChange24h", self.price_change_24h),
            ("priceChange7d", self.price_change_7d),
            ("marketCap", self.market_cap),
            ("volume24h", self.volume_24h),
            ("circulatingSupply", self.circulating_supply),
        ]
    }
}
