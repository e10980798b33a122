//! Persistence backends for Burrow.
//!
//! Every backend implements [`burrow_core::Backend`]: a plain `get`/`put`
//! key-value contract with unconditional overwrite and no eviction.

pub mod memory;
pub mod mysql;
pub mod redis;

pub use burrow_core::{Backend, StorageError, StoredRecord};
pub use memory::InMemoryBackend;
pub use mysql::MySqlBackend;
pub use self::redis::RedisBackend;
