use async_trait::async_trait;
use burrow_core::backend::{Backend, Result};
use burrow_core::{Clock, ShortUrlId, StorageError, StoredRecord, SystemClock};
use redis::AsyncCommands;
use tracing::trace;

/// Default prefix for record keys.
pub const DEFAULT_KEY_PREFIX: &str = "burrow:url:";

/// A Redis implementation of [`Backend`].
///
/// Records are stored as JSON strings under `<prefix><id>` with a plain
/// `SET`, without a Redis-side expiry.
#[derive(Clone)]
pub struct RedisBackend<C = SystemClock> {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
    clock: C,
}

impl RedisBackend {
    /// Creates a backend on an existing connection with the default key prefix.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a backend on an existing connection with a custom key prefix.
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            clock: SystemClock,
        }
    }

    /// Opens a multiplexed connection to `redis_url`.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self> {
        let client =
            redis::Client::open(redis_url).map_err(|e| map_redis_error("open client", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("connect", e))?;
        Ok(Self::with_prefix(conn, key_prefix))
    }
}

impl<C: Clock> RedisBackend<C> {
    /// Replaces the clock used to stamp `createdAt`.
    pub fn with_clock<D: Clock>(self, clock: D) -> RedisBackend<D> {
        RedisBackend {
            conn: self.conn,
            key_prefix: self.key_prefix,
            clock,
        }
    }

    fn key(&self, id: &ShortUrlId) -> String {
        format!("{}{}", self.key_prefix, id.as_str())
    }
}

impl<C> std::fmt::Debug for RedisBackend<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        StorageError::Timeout(message)
    } else if err.is_io_error() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

#[async_trait]
impl<C: Clock> Backend for RedisBackend<C> {
    async fn get(&self, id: &ShortUrlId) -> Result<Option<StoredRecord>> {
        let key = self.key(id);
        trace!(id = %id, key = %key, "redis get");

        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| map_redis_error("get", e))?;

        raw.map(|json| {
            serde_json::from_str::<StoredRecord>(&json).map_err(|e| {
                StorageError::InvalidData(format!("invalid record under key '{key}': {e}"))
            })
        })
        .transpose()
    }

    async fn put(&self, id: &ShortUrlId, original_url: &str, ttl_seconds: u64) -> Result<()> {
        let key = self.key(id);
        trace!(id = %id, key = %key, ttl_seconds, "redis put");

        let record = StoredRecord::new(id, original_url, self.clock.now(), ttl_seconds);
        let json = serde_json::to_string(&record)
            .map_err(|e| StorageError::Operation(format!("serialize record: {e}")))?;

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&key, json)
            .await
            .map_err(|e| map_redis_error("set", e))
    }
}
