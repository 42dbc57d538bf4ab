pub mod sample;
pub mod simulator;

pub use sample::{SampleAssetSource, sample_assets};
pub use simulator::{FeedEvent, FeedHandle, FeedSimulator, UpdateHandler};
