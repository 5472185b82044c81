//! Configuration Module
//!
//! Construction-time parameters for a cache instance.

use std::time::Duration;

/// Cache configuration parameters.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum total weight across all live entries; 0 disables LRU eviction
    pub capacity: usize,
    /// TTL applied by the simple write path; `None` means entries never expire
    pub default_ttl: Option<Duration>,
    /// Interval between background expiration sweeps
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates a config with the given default TTL and capacity.
    ///
    /// The sweep interval starts at one second; override it with
    /// [`CacheConfig::sweep_interval`].
    pub fn new(default_ttl: Option<Duration>, capacity: usize) -> Self {
        Self {
            capacity,
            default_ttl,
            sweep_interval: Duration::from_secs(1),
        }
    }

    /// Sets the background sweep interval.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            default_ttl: None,
            sweep_interval: Duration::from_secs(1),
        }
    }
}
