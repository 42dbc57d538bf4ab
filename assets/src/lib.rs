pub mod error;
pub mod filter;
pub mod model;
pub mod projection;
pub mod sort;
pub mod update;

pub use error::ValidationError;
pub use model::{AssetId, AssetRecord, SPARKLINE_LEN};

#[cfg(test)]
pub(crate) mod testutil;
