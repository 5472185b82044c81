//! Expiration Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::cache::shared::CacheInner;

/// Spawns the periodic expiration sweep for a cache.
///
/// The task sleeps for `interval`, then takes the exclusive lock and
/// removes expired entries from the front of the expiration order. It
/// holds only a weak reference to the cache, so it exits on its own once
/// every cache handle has been dropped; `Cache::close` aborts it earlier.
pub(crate) fn spawn_sweep_task<V>(cache: Weak<CacheInner<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        debug!(interval_ms = interval.as_millis() as u64, "expiration sweep started");

        loop {
            tokio::time::sleep(interval).await;

            let Some(inner) = cache.upgrade() else {
                debug!("cache dropped, expiration sweep exiting");
                break;
            };
            let removed = inner.sweep().await;

            if removed > 0 {
                debug!(removed, "swept expired entries");
            } else {
                trace!("sweep found no expired entries");
            }
        }
    })
}
