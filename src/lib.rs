//! ttlru - An in-process key-value cache
//!
//! Provides bounded-memory caching with two independent eviction policies:
//! TTL expiration and capacity-weighted LRU eviction.

pub mod cache;
pub mod config;
mod tasks;

pub use cache::{Cache, CacheStats, CacheStore, StatsSnapshot};
pub use config::CacheConfig;
