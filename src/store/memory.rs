//! In-Memory Store Module
//!
//! HashMap-backed key-value store with native TTL expiry, used when no
//! Redis server is configured.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, StoreEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Memory Store ==
/// Key-value storage with per-entry expiry.
///
/// Expired entries are never returned. They are dropped lazily on access
/// and in bulk by [`MemoryStore::cleanup_expired`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, StoreEntry>,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Retrieves the bytes stored under `key` if present and not expired.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    // == Set ==
    /// Stores a value with optional TTL, overwriting any previous entry.
    ///
    /// Overwriting resets the expiry: a plain `set` (TTL None) makes the key
    /// persistent again.
    pub fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        validate_key(key)?;

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidInput(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        self.entries
            .insert(key.to_string(), StoreEntry::new(value, ttl));
        Ok(())
    }

    // == Increment ==
    /// Atomically adds one to the integer stored under `key`.
    ///
    /// A missing or expired key counts as zero. The stored representation is
    /// a decimal string, and an existing expiry is preserved.
    pub fn incr(&mut self, key: &str) -> Result<i64> {
        validate_key(key)?;

        let current = match self.get(key) {
            Some(bytes) => parse_integer(key, &bytes)?,
            None => 0,
        };

        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::Internal(format!("increment would overflow at '{}'", key))
        })?;
        let encoded = next.to_string().into_bytes();

        match self.entries.get_mut(key) {
            Some(entry) => entry.value = encoded,
            None => {
                self.entries
                    .insert(key.to_string(), StoreEntry::new(encoded, None));
            }
        }

        Ok(next)
    }

    // == Flush ==
    /// Removes every entry.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of entries held, including not yet purged expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidInput("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidInput(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

fn parse_integer(key: &str, bytes: &[u8]) -> Result<i64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| CacheError::Internal(format!("value at '{}' is not an integer", key)))
}

// == Shared Handle ==
/// Cloneable, thread-safe handle to a [`MemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct SharedMemoryStore {
    inner: Arc<RwLock<MemoryStore>>,
}

impl SharedMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying store, for the cleanup task.
    pub fn inner(&self) -> Arc<RwLock<MemoryStore>> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl KeyValueStore for SharedMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: expired entries are removed on read
        Ok(self.inner.write().await.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.inner.write().await.set(key, value, None)
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.inner.write().await.set(key, value, Some(ttl))
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.inner.write().await.incr(key)
    }

    async fn flush(&self) -> Result<()> {
        self.inner.write().await.flush();
        Ok(())
    }
}
