use crate::outcome::{CreateOutcome, ResolveOutcome};
use async_trait::async_trait;
use burrow_core::ShortUrlId;

#[async_trait]
pub trait MappingLifecycle: Send + Sync + 'static {
    /// Returns the short URL id for `original_url`, reusing a live mapping
    /// or writing a new one.
    ///
    /// `request_path` must be the canonical creation path.
    async fn create(&self, request_path: &str, original_url: &str) -> CreateOutcome;

    /// Looks up the original URL behind `id`.
    async fn resolve(&self, id: &ShortUrlId) -> ResolveOutcome;
}
