//! Small builders shared by the unit tests in this crate.

use crate::model::{AssetRecord, SPARKLINE_LEN};

pub fn record(id: &str, rank: u32, price: f64, market_cap: f64) -> AssetRecord {
    AssetRecord {
        id: id.into(),
        rank,
        logo: format!("/assets/coin_icon/{id}.png"),
        name: {
            let mut name = id.to_string();
            if let Some(first) = name.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            name
        },
        symbol: id.get(0..3).unwrap_or(id).to_ascii_uppercase(),
        price,
        price_change_1h: 0.1,
        price_change_24h: 1.0,
        price_change_7d: -2.0,
        market_cap,
        volume_24h: 1_000.0,
        circulating_supply: 500.0,
        max_supply: Some(1_000.0),
        sparkline: vec![price; SPARKLINE_LEN],
    }
}
