//! Streaming update simulator.
//!
//! Stands in for a live websocket feed: on every tick it picks one asset
//! at random from its backing set, perturbs the fast-moving fields and
//! delivers the resulting partial update to a handler. Time comes from the
//! tokio clock and randomness from a caller-supplied RNG so tests can pin
//! both down.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use assets::model::{AssetId, AssetRecord};
use assets::update::AssetUpdate;

/// Default delivery interval.
pub const DEFAULT_TICK: Duration = Duration::from_millis(2000);

/// One streamed delivery: which asset changed and the fields that moved.
#[derive(Debug, Clone)]
pub struct FeedEvent {
    pub id: AssetId,
    pub update: AssetUpdate,
}

/// Callback invoked once per tick with the computed update.
pub type UpdateHandler = Arc<dyn Fn(FeedEvent) + Send + Sync>;

pub struct FeedSimulator<R: Rng> {
    backing: Vec<AssetRecord>,
    tick: Duration,
    rng: R,
}

impl FeedSimulator<StdRng> {
    /// Simulator over `backing` with OS-seeded randomness.
    pub fn new(backing: Vec<AssetRecord>, tick: Duration) -> Self {
        Self::with_rng(backing, tick, StdRng::from_entropy())
    }
}

impl<R: Rng + Send + 'static> FeedSimulator<R> {
    pub fn with_rng(backing: Vec<AssetRecord>, tick: Duration, rng: R) -> Self {
        Self { backing, tick, rng }
    }

    /// Compute the next delivery without touching the clock. `None` when
    /// the backing set is empty.
    ///
    /// Perturbations, all rounded to 2 decimals:
    ///   • price drifts by up to ±1%
    ///   • each change percentage moves by up to ±0.5 points
    ///   • 24h volume drifts by a bounded factor
    pub fn next_event(&mut self) -> Option<FeedEvent> {
        if self.backing.is_empty() {
            return None;
        }
        let asset = &self.backing[self.rng.gen_range(0..self.backing.len())];

        let drift = (self.rng.gen_range(0.0..1.0) - 0.5) * 2.0;
        let price = asset.price * (1.0 + drift / 100.0);

        let update = AssetUpdate {
            price: Some(round2(price)),
            price_change_1h: Some(round2(
                asset.price_change_1h + self.rng.gen_range(0.0..1.0) - 0.5,
            )),
            price_change_24h: Some(round2(
                asset.price_change_24h + self.rng.gen_range(0.0..1.0) - 0.5,
            )),
            price_change_7d: Some(round2(
                asset.price_change_7d + self.rng.gen_range(0.0..1.0) - 0.5,
            )),
            volume_24h: Some(round2(
                asset.volume_24h * (1.0 + (self.rng.gen_range(0.0..1.0) - 0.3) / 10.0),
            )),
            ..AssetUpdate::default()
        };

        Some(FeedEvent {
            id: asset.id.clone(),
            update,
        })
    }

    /// Drive the simulator on the tokio clock, one delivery per tick.
    /// Delivery stops when the returned handle is cancelled or dropped.
    pub fn spawn(mut self, handler: UpdateHandler) -> FeedHandle {
        let join = tokio::spawn(async move {
            let mut ticker = interval(self.tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The interval yields once immediately; the feed delivers its
            // first update one full period in.
            ticker.tick().await;

            info!(every_ms = self.tick.as_millis() as u64, "feed simulator started");

            loop {
                ticker.tick().await;
                if let Some(event) = self.next_event() {
                    debug!(asset = %event.id, "feed update emitted");
                    handler(event);
                }
            }
        });

        FeedHandle { join }
    }
}

/// Cancellation handle for a running simulator.
pub struct FeedHandle {
    join: JoinHandle<()>,
}

impl FeedHandle {
    /// Stop further deliveries.
    pub fn cancel(&self) {
        self.join.abort();
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
