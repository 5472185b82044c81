//! Cache Entry Module
//!
//! Defines a single cached record: value, capacity weight, expiration
//! deadline, and the record's position in the two orderings.

use std::time::{Duration, Instant};

use crate::cache::list::NodeId;

// == Cache Entry ==
/// A single cached record.
///
/// Each live entry occupies exactly one node in the recency list and one
/// node in the expiration list; the handles below name those nodes.
#[derive(Debug)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Caller-assigned weight consumed against capacity
    pub weight: usize,
    /// Absolute expiration deadline; `None` means the entry never expires
    pub expires_at: Option<Instant>,
    /// Position in the recency list (front = most recently used)
    pub recency: NodeId,
    /// Position in the expiration list (back = most recently written)
    pub expiry: NodeId,
}

impl<V> Entry<V> {
    pub fn new(
        value: V,
        weight: usize,
        expires_at: Option<Instant>,
        recency: NodeId,
        expiry: NodeId,
    ) -> Self {
        Self {
            value,
            weight,
            expires_at,
            recency,
            expiry,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's deadline has passed.
    ///
    /// An entry is expired once the current time reaches the deadline;
    /// entries without a deadline never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or `None` if no deadline is set.
    ///
    /// Reports `Some(Duration::ZERO)` once the deadline has passed.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

// == Utility Functions ==
/// Converts a TTL into an absolute deadline.
///
/// `None` and a zero-length TTL both mean "never expires"; the simple
/// write path passes the cache-wide default here.
pub(crate) fn deadline(ttl: Option<Duration>) -> Option<Instant> {
    ttl.filter(|d| !d.is_zero()).map(|d| Instant::now() + d)
}
