use crate::error::StorageError;
use crate::record::StoredRecord;
use crate::short_url_id::ShortUrlId;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Key-value persistence for short URL records.
///
/// Expiry is logical: backends store and return records regardless of
/// their age and never evict them on their own.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Fetches the record stored under `id`.
    ///
    /// Returns `Ok(None)` if nothing is stored; infrastructure failures are
    /// reported as `Err`, never as absence.
    async fn get(&self, id: &ShortUrlId) -> Result<Option<StoredRecord>>;

    /// Stores a record under `id`, replacing whatever was there.
    ///
    /// The backend stamps `createdAt` with its own notion of now.
    async fn put(&self, id: &ShortUrlId, original_url: &str, ttl_seconds: u64) -> Result<()>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn get(&self, id: &ShortUrlId) -> Result<Option<StoredRecord>> {
        (**self).get(id).await
    }

    async fn put(&self, id: &ShortUrlId, original_url: &str, ttl_seconds: u64) -> Result<()> {
        (**self).put(id, original_url, ttl_seconds).await
    }
}
