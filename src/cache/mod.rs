//! Cache Module
//!
//! Read-through page caching with per-input access counting, plus a small
//! data cache storing values under generated keys.

mod data;
mod fetcher;
mod read_through;
mod stats;


// Re-export public types
pub use data::{DataCache, StoredValue};
pub use fetcher::{Fetcher, HttpFetcher, StubFetcher};
pub use read_through::{validate_input, ReadThroughCache, CACHED_PREFIX, COUNT_PREFIX};
pub use stats::CacheStats;

// == Public Constants ==
/// Maximum allowed input (URL) length in bytes
pub const MAX_INPUT_LENGTH: usize = 2048;
