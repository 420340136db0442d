//! API Handlers
//!
//! HTTP request handlers for each page cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{DataCache, Fetcher, ReadThroughCache};
use crate::error::{CacheError, Result};
use crate::models::{
    CountResponse, DataResponse, HealthResponse, PageQuery, PageResponse, StatsResponse,
    StoreRequest, StoreResponse,
};
use crate::store::KeyValueStore;

/// Application state shared across all handlers.
///
/// Both caches share the same store handle.
#[derive(Clone)]
pub struct AppState {
    /// Read-through page cache
    pub pages: Arc<ReadThroughCache>,
    /// Generated-key data cache
    pub data: DataCache,
}

impl AppState {
    /// Creates a new AppState over `store`, fetching pages with `fetcher`.
    pub fn new(store: Arc<dyn KeyValueStore>, fetcher: Arc<dyn Fetcher>, ttl: Duration) -> Self {
        Self {
            pages: Arc::new(ReadThroughCache::new(store.clone(), fetcher, ttl)),
            data: DataCache::new(store),
        }
    }
}

/// Handler for GET /page?url=...
///
/// Returns the page body, from the cache when a fresh copy exists.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>> {
    let content = state.pages.fetch(&query.url).await?;
    Ok(Json(PageResponse::new(query.url, content)))
}

/// Handler for GET /count?url=...
pub async fn count_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CountResponse>> {
    let count = state.pages.access_count(&query.url).await?;
    Ok(Json(CountResponse::new(query.url, count)))
}

/// Handler for PUT /data
///
/// Stores the value under a generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.data.store(req.data).await?;
    Ok(Json(StoreResponse { key }))
}

/// Handler for GET /data/:key
pub async fn data_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DataResponse>> {
    match state.data.get(&key).await? {
        Some(bytes) => Ok(Json(DataResponse::new(key, &bytes))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.pages.stats().await;
    Json(StatsResponse::new(&stats, state.pages.ttl().as_secs()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
