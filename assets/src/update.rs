//! Partial per-asset updates and the merge that applies them.

use serde_json::Value;

use crate::error::ValidationError;
use crate::model::AssetRecord;

/// The fields a feed may change on an existing record. `None` leaves the
/// field untouched. Static display fields (`id`, `name`, `symbol`, `logo`)
/// deliberately have no counterpart here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetUpdate {
    pub rank: Option<u32>,
    pub price: Option<f64>,
    pub price_change_1h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_7d: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    /// Outer option: present in the update at all. Inner `None` sets
    /// unlimited supply.
    pub max_supply: Option<Option<f64>>,
    pub sparkline: Option<Vec<f64>>,
}

impl AssetUpdate {
    /// Parse a loose JSON object naming only the changed fields.
    ///
    /// An explicit `null` on any field other than `maxSupply` is a request
    /// to clear a required field and is rejected, as are non-numeric values
    /// and fields outside the mutable set.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let mut update = AssetUpdate::default();
        for (key, raw) in object {
            match key.as_str() {
                "rank" => update.rank = Some(require_rank(raw)?),
                "price" => update.price = Some(require_number("price", raw)?),
                "priceChange1h" => {
                    update.price_change_1h = Some(require_number("priceChange1h", raw)?)
                }
                "priceChange24h" => {
                    update.price_change_24h = Some(require_number("priceChange24h", raw)?)
                }
                "priceChange7d" => {
                    update.price_change_7d = Some(require_number("priceChange7d", raw)?)
                }
                "marketCap" => update.market_cap = Some(require_number("marketCap", raw)?),
                "volume24h" => update.volume_24h = Some(require_number("volume24h", raw)?),
                "circulatingSupply" => {
                    update.circulating_supply = Some(require_number("circulatingSupply", raw)?)
                }
                // The one field where null is meaningful: unlimited supply.
                "maxSupply" => {
                    update.max_supply = Some(if raw.is_null() {
                        None
                    } else {
                        Some(require_number("maxSupply", raw)?)
                    })
                }
                "sparkline" => update.sparkline = Some(require_samples(raw)?),
                other => {
                    return Err(ValidationError::UnknownField {
                        field: other.to_string(),
                    });
                }
            }
        }
        Ok(update)
    }
}

/// Return a new record equal to `existing` with every field present in
/// `update` overwritten. The merged record must still satisfy the
/// collection invariants; otherwise the merge is rejected and `existing`
/// stays as it was.
pub fn merge(existing: &AssetRecord, update: &AssetUpdate) -> Result<AssetRecord, ValidationError> {
    let mut merged = existing.clone();

    if let Some(rank) = update.rank {
        merged.rank = rank;
    }
    if let Some(price) = update.price {
        merged.price = price;
    }
    if let Some(change) = update.price_change_1h {
        merged.price_change_1h = change;
    }
    if let Some(change) = update.price_change_24h {
        merged.price_change_24h = change;
    }
    if let Some(change) = update.price_change_7d {
        merged.price_change_7d = change;
    }
    if let Some(market_cap) = update.market_cap {
        merged.market_cap = market_cap;
    }
    if let Some(volume) = update.volume_24h {
        merged.volume_24h = volume;
    }
    if let Some(supply) = update.circulating_supply {
        merged.circulating_supply = supply;
    }
    if let Some(max_supply) = update.max_supply {
        merged.max_supply = max_supply;
    }
    if let Some(sparkline) = &update.sparkline {
        merged.sparkline = sparkline.clone();
    }

    merged.validate()?;
    Ok(merged)
}

fn require_number(field: &'static str, raw: &Value) -> Result<f64, ValidationError> {
    if raw.is_null() {
        return Err(ValidationError::NullField { field });
    }
    raw.as_f64().ok_or(ValidationError::NotANumber { field })
}

fn require_rank(raw: &Value) -> Result<u32, ValidationError> {
    if raw.is_null() {
        return Err(ValidationError::NullField { field: "rank" });
    }
    raw.as_u64()
        .and_then(|rank| u32::try_from(rank).ok())
        .filter(|rank| *rank > 0)
        .ok_or(ValidationError::InvalidRank)
}

fn require_samples(raw: &Value) -> Result<Vec<f64>, ValidationError> {
    if raw.is_null() {
        return Err(ValidationError::NullField { field: "sparkline" });
    }
    raw.as_array()
        .ok_or(ValidationError::NotANumber { field: "sparkline" })?
        .iter()
        .map(|sample| {
            sample
                .as_f64()
                .ok_or(ValidationError::NotANumber { field: "sparkline" })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testutil::record;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let existing = record("bitcoin", 1, 50_000.0, 950_000.0);
        let update = AssetUpdate {
            price: Some(51_000.0),
            price_change_24h: Some(2.9),
            ..AssetUpdate::default()
        };

        let merged = merge(&existing, &update).unwrap();

        assert_eq!(merged.price, 51_000.0);
        assert_eq!(merged.price_change_24h, 2.9);
        // Everything else is carried over untouched.
        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.market_cap, existing.market_cap);
        assert_eq!(merged.sparkline, existing.sparkline);
    }

    #[test]
    fn empty_update_is_identity() {
        let existing = record("bitcoin", 1, 50_000.0, 950_000.0);
        assert_eq!(merge(&existing, &AssetUpdate::default()).unwrap(), existing);
    }

    #[test]
    fn merge_rejects_non_finite_values() {
        let existing = record("bitcoin", 1, 50_000.0, 950_000.0);
        let update = AssetUpdate {
            price: Some(f64::NAN),
            ..AssetUpdate::default()
        };
        assert!(matches!(
            merge(&existing, &update),
            Err(ValidationError::NonFinite { field: "price", .. })
        ));
    }

    #[test]
    fn merge_rejects_truncated_sparkline() {
        let existing = record("bitcoin", 1, 50_000.0, 950_000.0);
        let update = AssetUpdate {
            sparkline: Some(vec![1.0, 2.0]),
            ..AssetUpdate::default()
        };
        assert!(matches!(
            merge(&existing, &update),
            Err(ValidationError::SparklineLength { actual: 2, .. })
        ));
    }

    #[test]
    fn merge_can_clear_max_supply() {
        let existing = record("bitcoin", 1, 50_000.0, 950_000.0);
        let update = AssetUpdate {
            max_supply: Some(None),
            ..AssetUpdate::default()
        };
        assert_eq!(merge(&existing, &update).unwrap().max_supply, None);
    }

    #[test]
    fn from_value_reads_changed_fields() {
        let update = AssetUpdate::from_value(&json!({
            "price": 50123.45,
            "volume24h": 25000000000.0_f64,
        }))
        .unwrap();

        assert_eq!(update.price, Some(50123.45));
        assert_eq!(update.volume_24h, Some(25_000_000_000.0));
        assert_eq!(update.rank, None);
        assert_eq!(update.sparkline, None);
    }

    #[test]
    fn from_value_rejects_null_on_required_field() {
        let err = AssetUpdate::from_value(&json!({ "price": null })).unwrap_err();
        assert_eq!(err, ValidationError::NullField { field: "price" });
    }

    #[test]
    fn from_value_accepts_null_max_supply() {
        let update = AssetUpdate::from_value(&json!({ "maxSupply": null })).unwrap();
        assert_eq!(update.max_supply, Some(None));
    }

    #[test]
    fn from_value_rejects_unknown_and_static_fields() {
        assert!(matches!(
            AssetUpdate::from_value(&json!({ "name": "Bitcoin2" })),
            Err(ValidationError::UnknownField { .. })
        ));
    }

    #[test]
    fn from_value_rejects_non_object_payloads() {
        assert_eq!(
            AssetUpdate::from_value(&json!(42)).unwrap_err(),
            ValidationError::NotAnObject
        );
    }
}
