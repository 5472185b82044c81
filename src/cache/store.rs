//! Cache Store Module
//!
//! The single-threaded cache engine: a lookup table plus two index-linked
//! lists (recency order and insertion/update order) with weight-based
//! capacity accounting. [`crate::cache::Cache`] wraps this in a lock for
//! concurrent use; the store itself can also be driven directly by callers
//! that supply their own synchronization.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::entry::{deadline, Entry};
use crate::cache::list::IndexList;
use crate::cache::stats::{CacheStats, StatsSnapshot};

// == Cache Store ==
/// Cache engine with TTL expiration and weighted LRU eviction.
///
/// Invariants maintained outside of any single method call:
/// - a key is present in the lookup table iff it owns exactly one node in
///   each of the two lists;
/// - `used` equals the sum of live entry weights;
/// - when `capacity > 0`, `used` never exceeds `capacity`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to entry lookup table
    items: HashMap<String, Entry<V>>,
    /// Recency order: front = most recently used, back = eviction victim
    recency: IndexList<String>,
    /// Insertion/update order: front = oldest write, scanned by the sweep
    expiry: IndexList<String>,
    /// Maximum total weight; 0 disables LRU eviction
    capacity: usize,
    /// Total weight of live entries
    used: usize,
    /// TTL applied by the simple write path
    default_ttl: Option<Duration>,
    /// Lock-free performance counters
    stats: Arc<CacheStats>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum total weight across live entries; 0 means unbounded
    /// * `default_ttl` - TTL for the simple write path; `None` means never expire
    pub fn new(capacity: usize, default_ttl: Option<Duration>) -> Self {
        Self {
            items: HashMap::new(),
            recency: IndexList::new(),
            expiry: IndexList::new(),
            capacity,
            used: 0,
            default_ttl,
            stats: Arc::new(CacheStats::new()),
        }
    }

    // == Set ==
    /// Stores a key-value pair with weight 1 and the default TTL.
    pub fn set(&mut self, key: String, value: V) {
        self.set_with(key, value, 1, self.default_ttl);
    }

    // == Set With ==
    /// Stores a key-value pair with an explicit weight and TTL.
    ///
    /// A weight larger than a bounded capacity is a silent no-op: such an
    /// item would be evicted the instant it was admitted, so it is never
    /// admitted at all. A `ttl` of `None` (or zero) means the entry never
    /// expires. Existing keys are updated in place with their positions in
    /// both orderings refreshed.
    pub fn set_with(&mut self, key: String, value: V, weight: usize, ttl: Option<Duration>) {
        if self.capacity > 0 && weight > self.capacity {
            return;
        }
        let expires_at = deadline(ttl);

        // Eviction runs before the existence check, so an update that has
        // to make room may evict its own previous version off the recency
        // tail; the insert path below then recreates the key.
        while self.capacity > 0 && self.used + weight > self.capacity {
            if !self.evict_lru() {
                break;
            }
        }

        if let Some(entry) = self.items.get_mut(&key) {
            self.used = self.used - entry.weight + weight;
            entry.value = value;
            entry.weight = weight;
            entry.expires_at = expires_at;
            let (recency, expiry) = (entry.recency, entry.expiry);
            self.recency.move_to_front(recency);
            self.expiry.move_to_back(expiry);
            return;
        }

        let recency = self.recency.push_front(key.clone());
        let expiry = self.expiry.push_back(key.clone());
        self.items
            .insert(key, Entry::new(value, weight, expires_at, recency, expiry));
        self.used += weight;
    }

    // == Lookup ==
    /// Shared-access read: presence and expiry check plus counter update,
    /// without touching the recency order.
    ///
    /// An entry whose deadline has passed but which the sweep has not yet
    /// removed counts as a miss; it stays resident until swept.
    pub fn lookup(&self, key: &str) -> Option<V> {
        match self.items.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Promote ==
    /// Moves a key to the front of the recency order.
    ///
    /// Re-checks presence so a promotion racing with an eviction between
    /// two lock sections cannot corrupt the list; returns false if the key
    /// is gone.
    pub fn promote(&mut self, key: &str) -> bool {
        match self.items.get(key) {
            Some(entry) => {
                let recency = entry.recency;
                self.recency.move_to_front(recency)
            }
            None => false,
        }
    }

    // == Get ==
    /// Retrieves a value and marks the key most recently used.
    ///
    /// Combines [`CacheStore::lookup`] and [`CacheStore::promote`] for
    /// callers holding exclusive access for the whole operation.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let value = self.lookup(key)?;
        self.promote(key);
        Some(value)
    }

    // == Remove ==
    /// Removes an entry by key; no-op if absent.
    pub fn remove(&mut self, key: &str) {
        self.remove_entry(key);
    }

    // == Remove Expired ==
    /// Sweeps expired entries off the front of the expiration list.
    ///
    /// The list is ordered by insertion/update time, which stands in for
    /// expiration order. The scan stops at the first unexpired entry, so
    /// with heterogeneous TTLs an expired entry behind a longer-lived one
    /// stays resident (but hidden from lookups) until the entry ahead of
    /// it also expires. Returns the number of entries removed.
    pub fn remove_expired(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let key = match self.expiry.front() {
                Some(key) => key.clone(),
                None => break,
            };
            match self.items.get(&key) {
                Some(entry) if entry.is_expired() => {
                    self.remove_entry(&key);
                    self.stats.record_expiration();
                    removed += 1;
                }
                Some(_) => break,
                None => {
                    debug_assert!(false, "expiry list references missing key {key:?}");
                    break;
                }
            }
        }
        removed
    }

    // == Accessors ==
    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total weight of live entries.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Returns the configured capacity (0 = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the shared counter handle.
    pub fn stats(&self) -> &Arc<CacheStats> {
        &self.stats
    }

    /// Captures current statistics together with entry count and used weight.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(self.items.len(), self.used)
    }

    // == Internals ==
    /// Evicts the least recently used entry; returns false when empty.
    fn evict_lru(&mut self) -> bool {
        let victim = match self.recency.back() {
            Some(key) => key.clone(),
            None => return false,
        };
        self.remove_entry(&victim);
        self.stats.record_eviction();
        true
    }

    /// Detaches an entry from all three structures and settles accounting.
    fn remove_entry(&mut self, key: &str) -> bool {
        match self.items.remove(key) {
            Some(entry) => {
                self.recency.remove(entry.recency);
                self.expiry.remove(entry.expiry);
                self.used -= entry.weight;
                true
            }
            None => false,
        }
    }
}
