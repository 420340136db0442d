//! Response DTOs for the page cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for GET /page
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub url: String,
    /// Page body, fresh or cached
    pub content: String,
}

impl PageResponse {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Response body for GET /count
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub url: String,
    /// Number of times the page has been requested
    pub count: u64,
}

impl CountResponse {
    pub fn new(url: impl Into<String>, count: u64) -> Self {
        Self {
            url: url.into(),
            count,
        }
    }
}

/// Response body for PUT /data
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Generated key the data was stored under
    pub key: String,
}

/// Response body for GET /data/:key
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    pub key: String,
    /// Stored value, decoded as UTF-8 (lossily for binary data)
    pub value: String,
}

impl DataResponse {
    pub fn new(key: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub fetch_failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Page cache TTL in seconds
    pub ttl_secs: u64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, ttl_secs: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            fetch_failures: stats.fetch_failures,
            hit_rate: stats.hit_rate(),
            ttl_secs,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
