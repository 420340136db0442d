//! TTL Cleanup Task
//!
//! Background task that periodically purges expired entries from the
//! in-memory store. Reads already ignore expired entries; this only
//! reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically removes expired entries.
///
/// The task loops forever, sleeping for `cleanup_interval_secs` between
/// runs and taking the write lock only for the purge itself.
///
/// Returns the JoinHandle so the caller can abort the task at shutdown.
///
/// # Example
/// ```ignore
/// let store = SharedMemoryStore::new();
/// let cleanup_handle = spawn_cleanup_task(store.inner(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    store: Arc<RwLock<MemoryStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = store.write().await;
                guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
