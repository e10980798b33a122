use async_trait::async_trait;
use burrow_core::backend::{Backend, Result};
use burrow_core::{Clock, ShortUrlId, StoredRecord, SystemClock};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

/// In-memory implementation of [`Backend`] using DashMap.
///
/// Clones share the same map. Records are kept until overwritten; nothing
/// is evicted.
#[derive(Debug, Clone)]
pub struct InMemoryBackend<C = SystemClock> {
    storage: Arc<DashMap<String, StoredRecord>>,
    clock: C,
}

impl InMemoryBackend {
    /// Creates an empty backend stamping records with the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryBackend<C> {
    /// Creates an empty backend stamping records with `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            storage: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Stores `record` verbatim, bypassing the `createdAt` stamping of
    /// [`Backend::put`]. Used to seed fixtures, including malformed ones.
    pub fn insert_raw(&self, record: StoredRecord) {
        self.storage.insert(record.short_url_id.clone(), record);
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl<C: Clock> Backend for InMemoryBackend<C> {
    async fn get(&self, id: &ShortUrlId) -> Result<Option<StoredRecord>> {
        trace!(id = %id, "in-memory get");
        Ok(self.storage.get(id.as_str()).map(|entry| entry.value().clone()))
    }

    async fn put(&self, id: &ShortUrlId, original_url: &str, ttl_seconds: u64) -> Result<()> {
        trace!(id = %id, ttl_seconds, "in-memory put");
        let record = StoredRecord::new(id, original_url, self.clock.now(), ttl_seconds);
        self.storage.insert(id.as_str().to_owned(), record);
        Ok(())
    }
}
