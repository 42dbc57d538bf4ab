use assets::model::AssetRecord;

/// The initial data boundary: one asynchronous fetch that resolves to a
/// full batch of records or fails with a human-readable message. The core
/// imposes no retry policy; the host may call it again.
#[async_trait::async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch_assets(&self) -> anyhow::Result<Vec<AssetRecord>>;
}
