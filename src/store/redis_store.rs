//! Redis Store Module
//!
//! Key-value store backed by a Redis server. Expiry, atomicity and
//! eviction are all handled by Redis itself.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use crate::error::Result;
use crate::store::KeyValueStore;

/// Handle to a Redis server.
///
/// Cloning is cheap; every clone shares the same multiplexed connection,
/// which reconnects on failure.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to the server at `url` (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Connected to Redis at {}", url);
        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let millis = ttl.as_millis() as u64;

        // Redis rejects a zero expiry; an entry that is already stale is never stored
        if millis == 0 {
            let _: () = conn.del(key).await?;
            return Ok(());
        }

        let _: () = conn.pset_ex(key, value, millis).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1i64).await?;
        Ok(value)
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs a live server: REDIS_URL=redis://127.0.0.1/ cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_redis_primitives() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".into());
        let store = RedisStore::connect(&url).await.unwrap();
        store.flush().await.unwrap();

        store.set("plain", b"p".to_vec()).await.unwrap();
        assert_eq!(store.get("plain").await.unwrap(), Some(b"p".to_vec()));

        assert_eq!(store.incr("count:x").await.unwrap(), 1);
        assert_eq!(store.incr("count:x").await.unwrap(), 2);

        store
            .set_ex("temp", b"t".to_vec(), Duration::from_millis(200))
            .await
            .unwrap();
        assert!(store.get("temp").await.unwrap().is_some());
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(store.get("temp").await.unwrap().is_none());

        store.flush().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisStore::connect("not a url").await;
        assert!(matches!(
            result,
            Err(crate::error::CacheError::StoreUnavailable(_))
        ));
    }
}
