//! Built-in sample data source.
//!
//! Stands in for a real exchange API: resolves a fixed five-asset batch
//! after a short artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use assets::model::AssetRecord;
use store::AssetSource;

pub const DEFAULT_FETCH_LATENCY: Duration = Duration::from_millis(500);

/// The full sample dataset, one record per tracked asset.
pub fn sample_assets() -> Vec<AssetRecord> {
    vec![
        AssetRecord {
            id: "bitcoin".into(),
            rank: 1,
            logo: "/assets/coin_icon/bitcoin.png".into(),
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            price: 50_000.0,
            price_change_1h: 0.5,
            price_change_24h: 2.3,
            price_change_7d: -1.2,
            market_cap: 950_000_000_000.0,
            volume_24h: 25_000_000_000.0,
            circulating_supply: 19_000_000.0,
            max_supply: Some(21_000_000.0),
            sparkline: vec![
                49_000.0, 49_500.0, 50_200.0, 49_800.0, 50_500.0, 50_300.0, 50_900.0,
            ],
        },
        AssetRecord {
            id: "ethereum".into(),
            rank: 2,
            logo: "/assets/coin_icon/ethereum.png".into(),
            name: "Ethereum".into(),
            symbol: "ETH".into(),
            price: 3_000.0,
            price_change_1h: 0.8,
            price_change_24h: 3.1,
            price_change_7d: 5.2,
            market_cap: 360_000_000.0,
            volume_24h: 18_000_000.0,
            circulating_supply: 12_000_000.0,
            max_supply: Some(15_000_000.0),
            sparkline: vec![
                2_900.0, 2_950.0, 3_020.0, 4_080.0, 3_050.0, 3_030.0, 2_000.0,
            ],
        },
        AssetRecord {
            id: "tether".into(),
            rank: 3,
            logo: "/assets/coin_icon/tether.png".into(),
            name: "Tether".into(),
            symbol: "USDT".into(),
            price: 1.0,
            price_change_1h: 0.0,
            price_change_24h: 0.0,
            price_change_7d: 0.0,
            market_cap: 80_000_000_000.0,
            volume_24h: 50_000_000_000.0,
            circulating_supply: 80_000_000_000.0,
            max_supply: Some(145_000_000.0),
            sparkline: vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        },
        AssetRecord {
            id: "binancecoin".into(),
            rank: 4,
            logo: "/assets/coin_icon/binance.png".into(),
            name: "Binance Coin".into(),
            symbol: "BNB".into(),
            price: 400.0,
            price_change_1h: 0.3,
            price_change_24h: 1.5,
            price_change_7d: 2.8,
            market_cap: 65_000_000_000.0,
            volume_24h: 2_000_000_000.0,
            circulating_supply: 160_000_000.0,
            max_supply: Some(170_000_000.0),
            sparkline: vec![390.0, 395.0, 402.0, 398.0, 405.0, 407.0, 410.0],
        },
        AssetRecord {
            id: "solana".into(),
            rank: 5,
            logo: "/assets/coin_icon/solana.png".into(),
            name: "Solana".into(),
            symbol: "SOL".into(),
            price: 150.0,
            price_change_1h: 1.2,
            price_change_24h: 4.5,
            price_change_7d: 8.2,
            market_cap: 50_000_000_000.0,
            volume_24h: 3_000_000_000.0,
            circulating_supply: 330_000_000.0,
            max_supply: Some(517_000_000.0),
            sparkline: vec![140.0, 145.0, 152.0, 148.0, 155.0, 153.0, 150.0],
        },
    ]
}

/// Asset source backed by the sample dataset.
pub struct SampleAssetSource {
    latency: Duration,
}

impl SampleAssetSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SampleAssetSource {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_LATENCY)
    }
}

#[async_trait]
impl AssetSource for SampleAssetSource {
    async fn fetch_assets(&self) -> anyhow::Result<Vec<AssetRecord>> {
        sleep(self.latency).await;
        Ok(sample_assets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_records_satisfy_the_collection_invariants() {
        let batch = sample_assets();
        assert_eq!(batch.len(), 5);
        for record in &batch {
            assert_eq!(record.validate(), Ok(()), "record {}", record.id);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn source_resolves_after_its_latency() {
        let source = SampleAssetSource::default();
        let batch = source.fetch_assets().await.unwrap();
        assert_eq!(batch.len(), 5);
    }
}
