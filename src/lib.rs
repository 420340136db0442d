//! Page Cache - Read-through TTL caching of fetched pages
//!
//! Counts every page request and serves fetched pages from a key-value
//! store (Redis or in-memory) until their TTL lapses. Also carries thin
//! typed helpers over a MongoDB document collection.

pub mod api;
pub mod cache;
pub mod config;
pub mod documents;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
