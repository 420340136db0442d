//! Read-Through Cache Module
//!
//! Wraps a [`Fetcher`] with an access counter and a fixed-TTL result cache,
//! both kept in a [`KeyValueStore`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, Fetcher, MAX_INPUT_LENGTH};
use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

/// Key prefix of the per-input access counter
pub const COUNT_PREFIX: &str = "count:";

/// Key prefix of the per-input cached result
pub const CACHED_PREFIX: &str = "cached:";

// == Read-Through Cache ==
/// Counts every call for an input and serves fetched results from the
/// store until they expire.
///
/// Concurrent misses on the same input may each invoke the fetcher; the
/// last one to finish wins the cache slot.
pub struct ReadThroughCache {
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn Fetcher>,
    ttl: Duration,
    stats: RwLock<CacheStats>,
}

impl ReadThroughCache {
    // == Constructor ==
    /// Creates a cache holding results for `ttl` after each fresh fetch.
    pub fn new(store: Arc<dyn KeyValueStore>, fetcher: Arc<dyn Fetcher>, ttl: Duration) -> Self {
        Self {
            store,
            fetcher,
            ttl,
            stats: RwLock::new(CacheStats::new()),
        }
    }

    // == Fetch ==
    /// Returns the result for `input`, fetching it only when no fresh entry exists.
    ///
    /// The access counter is incremented before the lookup and is never
    /// rolled back. A failed fetch leaves no cache entry behind.
    pub async fn fetch(&self, input: &str) -> Result<String> {
        validate_input(input)?;

        let count = self.store.incr(&count_key(input)).await?;

        let cache_key = cached_key(input);
        if let Some(bytes) = self.store.get(&cache_key).await? {
            self.stats.write().await.record_hit();
            debug!("Cache hit for {} (access #{})", input, count);
            return String::from_utf8(bytes).map_err(|_| {
                CacheError::Internal(format!("cached value for '{}' is not valid UTF-8", input))
            });
        }

        self.stats.write().await.record_miss();
        debug!("Cache miss for {} (access #{})", input, count);

        let result = match self.fetcher.retrieve(input).await {
            Ok(result) => result,
            Err(err) => {
                self.stats.write().await.record_fetch_failure();
                warn!("Fetch failed for {}: {}", input, err);
                return Err(match err {
                    CacheError::FetchFailed(_) => err,
                    other => CacheError::FetchFailed(other.to_string()),
                });
            }
        };

        self.store
            .set_ex(&cache_key, result.clone().into_bytes(), self.ttl)
            .await?;

        Ok(result)
    }

    // == Access Count ==
    /// Number of times `fetch` has been called for `input`.
    pub async fn access_count(&self, input: &str) -> Result<u64> {
        validate_input(input)?;

        match self.store.get(&count_key(input)).await? {
            Some(bytes) => std::str::from_utf8(&bytes)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| {
                    CacheError::Internal(format!("access counter for '{}' is corrupt", input))
                }),
            None => Ok(0),
        }
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    // == TTL ==
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

fn count_key(input: &str) -> String {
    format!("{}{}", COUNT_PREFIX, input)
}

fn cached_key(input: &str) -> String {
    format!("{}{}", CACHED_PREFIX, input)
}

/// Rejects inputs that cannot serve as a store key.
pub fn validate_input(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(CacheError::InvalidInput("Input cannot be empty".to_string()));
    }
    if input.len() > MAX_INPUT_LENGTH {
        return Err(CacheError::InvalidInput(format!(
            "Input exceeds maximum length of {} bytes",
            MAX_INPUT_LENGTH
        )));
    }
    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(CacheError::InvalidInput(
            "Input cannot contain whitespace or control characters".to_string(),
        ));
    }
    Ok(())
}
