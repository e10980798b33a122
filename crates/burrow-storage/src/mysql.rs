use async_trait::async_trait;
use burrow_core::backend::{Backend, Result};
use burrow_core::{Clock, ShortUrlId, StorageError, StoredRecord, SystemClock};
use sqlx::{MySqlPool, Row};
use tracing::trace;

/// DDL for the `short_urls` table.
pub const SCHEMA: &str = include_str!("../ddl/mysql/short_urls.sql");

/// MySQL implementation of [`Backend`].
///
/// One row per short URL id. Writes use `REPLACE INTO`, so an expired row
/// is overwritten in place and concurrent writers of the same id resolve
/// to last-write-wins.
#[derive(Debug, Clone)]
pub struct MySqlBackend<C = SystemClock> {
    pool: MySqlPool,
    clock: C,
}

impl MySqlBackend {
    /// Creates a backend from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_clock(pool, SystemClock)
    }

    /// Creates a backend by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }
}

impl<C: Clock> MySqlBackend<C> {
    /// Creates a backend stamping records with `clock`.
    pub fn with_clock(pool: MySqlPool, clock: C) -> Self {
        Self { pool, clock }
    }

    /// Creates the `short_urls` table if it does not exist yet.
    pub async fn bootstrap_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl<C: Clock> Backend for MySqlBackend<C> {
    async fn get(&self, id: &ShortUrlId) -> Result<Option<StoredRecord>> {
        trace!(id = %id, "mysql get");

        let row = sqlx::query(
            r#"
            SELECT short_url_id, original_url, created_at, ttl_seconds
            FROM short_urls
            WHERE short_url_id = ?
            LIMIT 1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(StoredRecord {
            short_url_id: row.try_get("short_url_id").map_err(map_sqlx_error)?,
            original_url: row.try_get("original_url").map_err(map_sqlx_error)?,
            created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
            ttl_seconds: row.try_get("ttl_seconds").map_err(map_sqlx_error)?,
        }))
    }

    async fn put(&self, id: &ShortUrlId, original_url: &str, ttl_seconds: u64) -> Result<()> {
        trace!(id = %id, ttl_seconds, "mysql put");
        let record = StoredRecord::new(id, original_url, self.clock.now(), ttl_seconds);

        sqlx::query(
            r#"
            REPLACE INTO short_urls (short_url_id, original_url, created_at, ttl_seconds)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(record.short_url_id)
        .bind(record.original_url)
        .bind(record.created_at)
        .bind(record.ttl_seconds)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
