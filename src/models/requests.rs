//! Request DTOs for the page cache API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

use crate::cache::StoredValue;

/// Query string for GET /page and GET /count
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// The page URL, also the cache key
    pub url: String,
}

/// Request body for PUT /data
///
/// `data` may be a string, an integer, a float or an array of bytes.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    pub data: StoredValue,
}
