//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime of a cached page in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// In-memory store cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Redis connection URL; the in-memory store is used when unset
    pub redis_url: Option<String>,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// Database holding the document collections
    pub mongo_database: String,
    /// Collection holding nginx access logs
    pub mongo_collection: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Page cache TTL in seconds (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `REDIS_URL` - Redis URL (default: unset, in-memory store)
    /// - `MONGO_URI` - MongoDB URI (default: mongodb://127.0.0.1:27017)
    /// - `MONGO_DATABASE` - Database name (default: logs)
    /// - `MONGO_COLLECTION` - Log collection name (default: nginx)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            mongo_uri: env::var("MONGO_URI").unwrap_or(defaults.mongo_uri),
            mongo_database: env::var("MONGO_DATABASE").unwrap_or(defaults.mongo_database),
            mongo_collection: env::var("MONGO_COLLECTION").unwrap_or(defaults.mongo_collection),
        }
    }

    /// Page cache TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 10,
            server_port: 3000,
            cleanup_interval: 1,
            redis_url: None,
            mongo_uri: "mongodb://127.0.0.1:27017".to_string(),
            mongo_database: "logs".to_string(),
            mongo_collection: "nginx".to_string(),
        }
    }
}
