pub mod source;
pub mod state;
pub mod tracker;

pub use source::AssetSource;
pub use state::StoreSnapshot;
pub use tracker::{SubscriptionId, TrackerStore};
