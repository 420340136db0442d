//! API Module
//!
//! HTTP handlers and routing for the page cache REST API.
//!
//! # Endpoints
//! - `GET /page?url=...` - Fetch a page through the read-through cache
//! - `GET /count?url=...` - Access count for a page
//! - `PUT /data` - Store a value under a generated key
//! - `GET /data/:key` - Read a stored value
//! - `GET /stats` - Page cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
