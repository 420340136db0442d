//! Data Cache Module
//!
//! Stores arbitrary scalar data under generated keys.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Stored Value ==
/// A value accepted by [`DataCache::store`].
///
/// Numbers are stored as their decimal text, the way Redis stores them.
/// Floats keep their fractional part, so `42.0` is stored as `"42.0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl StoredValue {
    /// Encodes the value as stored bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            StoredValue::Int(n) => n.to_string().into_bytes(),
            StoredValue::Float(f) => format!("{:?}", f).into_bytes(),
            StoredValue::Str(s) => s.into_bytes(),
            StoredValue::Bytes(b) => b,
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Str(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Str(value)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Int(value)
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Data Cache ==
/// Writes values under random UUID keys and reads them back typed.
#[derive(Clone)]
pub struct DataCache {
    store: Arc<dyn KeyValueStore>,
}

impl DataCache {
    // == Constructor ==
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Creates a cache over a freshly flushed store.
    pub async fn with_flush(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        store.flush().await?;
        Ok(Self::new(store))
    }

    // == Store ==
    /// Stores `data` under a new random key and returns the key.
    pub async fn store(&self, data: impl Into<StoredValue>) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, data.into().into_bytes()).await?;
        debug!("Stored data under {}", key);

        Ok(key)
    }

    // == Get ==
    /// Raw bytes stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Value under `key` decoded as UTF-8.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
            .await?
            .map(|bytes| {
                String::from_utf8(bytes).map_err(|_| {
                    CacheError::Internal(format!("value at '{}' is not valid UTF-8", key))
                })
            })
            .transpose()
    }

    /// Value under `key` parsed as an integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_str(key)
            .await?
            .map(|text| {
                text.parse::<i64>().map_err(|_| {
                    CacheError::Internal(format!("value at '{}' is not an integer", key))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SharedMemoryStore;

    fn data_cache() -> DataCache {
        DataCache::new(Arc::new(SharedMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_store_returns_uuid_keys() {
        let cache = data_cache();

        let first = cache.store("Hello, World!").await.unwrap();
        let second = cache.store("Hello, World!").await.unwrap();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[tokio::test]
    async fn test_store_each_type() {
        let cache = data_cache();

        let s = cache.store("Hello, World!").await.unwrap();
        let i = cache.store(42i64).await.unwrap();
        let f = cache.store(2.5f64).await.unwrap();
        let b = cache.store(b"Binary Data".to_vec()).await.unwrap();

        assert_eq!(cache.get_str(&s).await.unwrap().as_deref(), Some("Hello, World!"));
        assert_eq!(cache.get_int(&i).await.unwrap(), Some(42));
        assert_eq!(cache.get_str(&f).await.unwrap().as_deref(), Some("2.5"));
        assert_eq!(cache.get(&b).await.unwrap(), Some(b"Binary Data".to_vec()));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = data_cache();

        assert_eq!(cache.get("missing").await.unwrap(), None);
        assert_eq!(cache.get_str("missing").await.unwrap(), None);
        assert_eq!(cache.get_int("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_int_on_text_fails() {
        let cache = data_cache();

        let key = cache.store("not a number").await.unwrap();
        assert!(matches!(
            cache.get_int(&key).await,
            Err(CacheError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_integral_float_keeps_fraction() {
        let cache = data_cache();

        let f = cache.store(42.0f64).await.unwrap();
        let i = cache.store(42i64).await.unwrap();

        assert_eq!(cache.get_str(&f).await.unwrap().as_deref(), Some("42.0"));
        assert_eq!(cache.get_str(&i).await.unwrap().as_deref(), Some("42"));
        assert!(matches!(
            cache.get_int(&f).await,
            Err(CacheError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_store_writes_only_the_value() {
        let store = SharedMemoryStore::new();
        let cache = DataCache::new(Arc::new(store.clone()));

        cache.store("a").await.unwrap();
        cache.store(1i64).await.unwrap();

        assert_eq!(store.inner().read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_with_flush_clears_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(SharedMemoryStore::new());
        store.set("stale", b"x".to_vec()).await.unwrap();

        let cache = DataCache::with_flush(store).await.unwrap();
        assert_eq!(cache.get("stale").await.unwrap(), None);
    }

    #[test]
    fn test_stored_value_from_json() {
        let int: StoredValue = serde_json::from_str("42").unwrap();
        let float: StoredValue = serde_json::from_str("3.5").unwrap();
        let text: StoredValue = serde_json::from_str(r#""hi""#).unwrap();
        let bytes: StoredValue = serde_json::from_str("[1, 2, 3]").unwrap();

        assert_eq!(int, StoredValue::Int(42));
        assert_eq!(float, StoredValue::Float(3.5));
        assert_eq!(text, StoredValue::Str("hi".to_string()));
        assert_eq!(bytes, StoredValue::Bytes(vec![1, 2, 3]));
    }
}
