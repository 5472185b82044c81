//! Shared Cache Handle Module
//!
//! Thread-safe, cheaply cloneable front door to a [`CacheStore`]. One
//! read-write lock guards the whole store; hit/miss counters live outside
//! the lock and are read without blocking writers. Construction starts the
//! background expiration sweep, and the sweep's lifetime is tied to the
//! cache's: it stops when the last handle is dropped or when [`Cache::close`]
//! is called.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::cache::stats::{CacheStats, StatsSnapshot};
use crate::cache::store::CacheStore;
use crate::config::CacheConfig;
use crate::tasks::spawn_sweep_task;

// == Cache ==
/// Concurrent cache handle.
///
/// Cloning is cheap and every clone refers to the same underlying store.
#[derive(Debug)]
pub struct Cache<V> {
    inner: Arc<CacheInner<V>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Debug)]
pub(crate) struct CacheInner<V> {
    state: RwLock<CacheStore<V>>,
    stats: Arc<CacheStats>,
    janitor: Mutex<Option<JoinHandle<()>>>,
}

impl<V> CacheInner<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Runs one expiration sweep under the exclusive lock.
    pub(crate) async fn sweep(&self) -> usize {
        self.state.write().await.remove_expired()
    }
}

impl<V> Drop for CacheInner<V> {
    fn drop(&mut self) {
        // Last handle gone; stop the sweep task.
        if let Some(handle) = self.janitor.get_mut().ok().and_then(|slot| slot.take()) {
            handle.abort();
        }
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache with the given default TTL and capacity, using a
    /// one-second sweep interval.
    ///
    /// A `default_ttl` of `None` means entries written via [`Cache::set`]
    /// never expire; a `capacity` of 0 disables LRU eviction. The sweep
    /// task is running by the time this returns.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(default_ttl: Option<Duration>, capacity: usize) -> Self {
        Self::with_config(CacheConfig::new(default_ttl, capacity))
    }

    /// Creates a cache from an explicit [`CacheConfig`].
    pub fn with_config(config: CacheConfig) -> Self {
        let store = CacheStore::new(config.capacity, config.default_ttl);
        let stats = Arc::clone(store.stats());
        let inner = Arc::new(CacheInner {
            state: RwLock::new(store),
            stats,
            janitor: Mutex::new(None),
        });

        // The sweep task holds only a weak reference so it cannot keep the
        // cache alive; it exits once every handle is gone.
        let handle = spawn_sweep_task(Arc::downgrade(&inner), config.sweep_interval);
        if let Ok(mut slot) = inner.janitor.lock() {
            *slot = Some(handle);
        }

        Self { inner }
    }

    // == Set ==
    /// Stores a key-value pair with weight 1 and the default TTL.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.inner.state.write().await.set(key.into(), value);
    }

    // == Set With ==
    /// Stores a key-value pair with an explicit weight and TTL.
    ///
    /// See [`CacheStore::set_with`] for the oversized-write and zero-TTL
    /// policies.
    pub async fn set_with(
        &self,
        key: impl Into<String>,
        value: V,
        weight: usize,
        ttl: Option<Duration>,
    ) {
        self.inner
            .state
            .write()
            .await
            .set_with(key.into(), value, weight, ttl);
    }

    // == Get ==
    /// Retrieves a value and marks the key most recently used.
    ///
    /// Two-phase locking: the lookup and expiry check run under the shared
    /// lock, then the recency promotion takes a brief exclusive lock. The
    /// promotion re-validates presence, so an entry evicted between the
    /// two phases is simply left alone.
    pub async fn get(&self, key: &str) -> Option<V> {
        let value = { self.inner.state.read().await.lookup(key) }?;
        self.inner.state.write().await.promote(key);
        Some(value)
    }

    // == Remove ==
    /// Removes an entry by key; no-op if absent.
    pub async fn remove(&self, key: &str) {
        self.inner.state.write().await.remove(key);
    }

    // == Counters ==
    /// Returns the hit counter. Lock-free; never blocks writers.
    pub fn hit_count(&self) -> u64 {
        self.inner.stats.hits()
    }

    /// Returns the miss counter. Lock-free; never blocks writers.
    pub fn miss_count(&self) -> u64 {
        self.inner.stats.misses()
    }

    // == Accessors ==
    /// Returns the current number of live entries.
    pub async fn len(&self) -> usize {
        self.inner.state.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.state.read().await.is_empty()
    }

    /// Returns the total weight of live entries.
    pub async fn used(&self) -> usize {
        self.inner.state.read().await.used()
    }

    /// Captures a point-in-time statistics snapshot.
    pub async fn stats(&self) -> StatsSnapshot {
        self.inner.state.read().await.snapshot()
    }

    // == Close ==
    /// Stops the background sweep task.
    ///
    /// The cache remains usable afterwards; expired entries are then only
    /// hidden lazily at lookup time, never physically removed. Idempotent.
    pub fn close(&self) {
        if let Some(handle) = self
            .inner
            .janitor
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
        {
            handle.abort();
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_and_get() {
        let cache: Cache<String> = Cache::new(None, 100);
        cache.set("key1", "value1".to_string()).await;

        assert_eq!(cache.get("key1").await, Some("value1".to_string()));
        assert_eq!(cache.get("missing").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_counters_without_lock() {
        let cache: Cache<u32> = Cache::new(None, 100);
        cache.set("a", 1).await;

        cache.get("a").await;
        cache.get("a").await;
        cache.get("nope").await;

        assert_eq!(cache.hit_count(), 2);
        assert_eq!(cache.miss_count(), 1);
    }

    #[tokio::test]
    async fn test_cache_clone_shares_state() {
        let cache: Cache<u32> = Cache::new(None, 100);
        let other = cache.clone();

        cache.set("a", 7).await;
        assert_eq!(other.get("a").await, Some(7));
        assert_eq!(other.hit_count(), 1);
    }

    #[tokio::test]
    async fn test_cache_get_promotes_against_eviction() {
        let cache: Cache<u32> = Cache::new(None, 3);
        cache.set("a", 1).await;
        cache.set("b", 2).await;
        cache.set("c", 3).await;

        // Reading "a" protects it; "b" becomes the victim
        cache.get("a").await;
        cache.set("d", 4).await;

        assert!(cache.get("a").await.is_some());
        assert_eq!(cache.get("b").await, None);
        assert_eq!(cache.len().await, 3);
    }

    #[tokio::test]
    async fn test_cache_close_is_idempotent() {
        let cache: Cache<u32> = Cache::new(None, 10);
        cache.close();
        cache.close();

        // Still serves reads and writes after close
        cache.set("a", 1).await;
        assert_eq!(cache.get("a").await, Some(1));
    }

    #[tokio::test]
    async fn test_cache_stats_snapshot() {
        let cache: Cache<u32> = Cache::new(None, 10);
        cache.set_with("a", 1, 4, None).await;
        cache.get("a").await;
        cache.get("zzz").await;

        let snap = cache.stats().await;
        assert_eq!(snap.hits, 1);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.entries, 1);
        assert_eq!(snap.used, 4);
    }
}
