pub mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::info;

use assets::filter::FilterPatch;
use assets::sort::{SortDirection, SortSpec};
use cli::{Cli, cli_to_sort_key, render};
use feed::sample::SampleAssetSource;
use feed::simulator::{FeedEvent, FeedSimulator, UpdateHandler};
use store::{StoreSnapshot, TrackerStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logger::init_logger("tickboard");
    let cli = Cli::parse();

    let store = TrackerStore::new();

    // Console consumer: re-render the projection on every published snapshot.
    let (snapshot_tx, mut snapshot_rx) = mpsc::channel::<StoreSnapshot>(64);
    let subscription = store.subscribe(snapshot_tx).await;
    let printer = tokio::spawn(async move {
        while let Some(snapshot) = snapshot_rx.recv().await {
            render(&snapshot);
        }
    });

    store.hydrate(&SampleAssetSource::default()).await;
    store
        .set_sort(SortSpec::new(
            cli_to_sort_key(cli.sort),
            SortDirection::Ascending,
        ))
        .await;
    if !cli.search.is_empty() {
        store.set_filter(FilterPatch::search(cli.search.clone())).await;
    }

    // Feed events funnel through one channel so they reach the store in
    // delivery order.
    let (event_tx, mut event_rx) = mpsc::channel::<FeedEvent>(64);
    let handler: UpdateHandler = Arc::new(move |event| {
        let _ = event_tx.try_send(event);
    });

    let tick = Duration::from_millis(cli.tick_ms);
    let simulator = match cli.seed {
        Some(seed) => {
            FeedSimulator::with_rng(store.assets().await, tick, StdRng::seed_from_u64(seed))
        }
        None => FeedSimulator::new(store.assets().await, tick),
    };
    let feed = simulator.spawn(handler);

    let applier = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                store.update_asset(&event.id, event.update).await;
            }
        })
    };

    tokio::time::sleep(Duration::from_secs(cli.run_for_secs)).await;

    feed.cancel();
    store.unsubscribe(subscription).await;
    applier.abort();
    printer.abort();

    info!("shutting down");
    Ok(())
}
