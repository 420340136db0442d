//! API Routes
//!
//! Configures the Axum router with all page cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    count_handler, data_handler, health_handler, page_handler, stats_handler, store_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /page?url=...` - Fetch a page through the cache
/// - `GET /count?url=...` - Access count for a page
/// - `PUT /data` - Store a value under a generated key
/// - `GET /data/:key` - Read a stored value
/// - `GET /stats` - Page cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/page", get(page_handler))
        .route("/count", get(count_handler))
        .route("/data", put(store_handler))
        .route("/data/:key", get(data_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::StubFetcher;
    use crate::store::SharedMemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            Arc::new(SharedMemoryStore::new()),
            Arc::new(StubFetcher::new()),
            Duration::from_secs(10),
        );
        create_router(state)
    }

    async fn get_status(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(get_status("/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_page_without_url_is_rejected() {
        assert_eq!(get_status("/page").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_bad_gateway() {
        assert_eq!(
            get_status("/page?url=http%3A%2F%2Fexample.com").await,
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_data_not_found() {
        assert_eq!(get_status("/data/nonexistent").await, StatusCode::NOT_FOUND);
    }
}
