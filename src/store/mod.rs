//! Key-Value Store Module
//!
//! The storage port used by the page cache and data cache, with a Redis
//! adapter and an in-memory adapter.

mod entry;
mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::StoreEntry;
pub use memory::{MemoryStore, SharedMemoryStore};
pub use redis_store::RedisStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 4096;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 16 * 1024 * 1024; // 16 MB

// == Key-Value Store ==
/// Atomic single-key primitives required from a backing store.
///
/// Implementations must serialize concurrent operations on the same key;
/// callers perform no locking of their own.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or None if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key` with no expiry.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Increments the integer under `key` by one and returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Removes every key from the store.
    async fn flush(&self) -> Result<()>;
}
