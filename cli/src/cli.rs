use clap::{Parser, ValueEnum};

use assets::sort::SortKey;
use store::StoreSnapshot;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKeyCli {
    Rank,
    Name,
    Symbol,
    Price,
    Change24h,
    MarketCap,
    Volume,
}

#[derive(Debug, Parser)]
#[clap(name = "tickboard", version)]
pub struct Cli {
    /// Milliseconds between simulated feed deliveries
    #[clap(long, default_value = "2000")]
    pub tick_ms: u64,

    /// How long to run before shutting down (seconds)
    #[clap(long, default_value = "20")]
    pub run_for_secs: u64,

    /// Initial sort key for the visible table
    #[clap(long, value_enum, default_value_t = SortKeyCli::Rank)]
    pub sort: SortKeyCli,

    /// Only show assets whose name or symbol contains this term
    #[clap(long, default_value = "")]
    pub search: String,

    /// Seed for the feed's RNG (random when omitted)
    #[clap(long)]
    pub seed: Option<u64>,
}

/// Convert CLI sort selection → internal SortKey enum
pub(crate) fn cli_to_sort_key(key: SortKeyCli) -> SortKey {
    match key {
        SortKeyCli::Rank => SortKey::Rank,
        SortKeyCli::Name => SortKey::Name,
        SortKeyCli::Symbol => SortKey::Symbol,
        SortKeyCli::Price => SortKey::Price,
        SortKeyCli::Change24h => SortKey::PriceChange24h,
        SortKeyCli::MarketCap => SortKey::MarketCap,
        SortKeyCli::Volume => SortKey::Volume24h,
    }
}

/// Print the visible projection as a small console table.
pub(crate) fn render(snapshot: &StoreSnapshot) {
    if let Some(err) = &snapshot.error {
        println!("⚠️  {err}");
        return;
    }
    if snapshot.loading {
        println!("⏳ loading…");
        return;
    }

    println!("#    SYMBOL  PRICE           24H%      MARKET CAP");
    for asset in &snapshot.visible {
        println!(
            "{:<4} {:<7} {:<15.2} {:<+9.2} {:.0}",
            asset.rank, asset.symbol, asset.price, asset.price_change_24h, asset.market_cap
        );
    }
    println!();
}
