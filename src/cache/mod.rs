//! Cache Module
//!
//! In-process caching with TTL expiration and capacity-weighted LRU eviction.

mod entry;
mod list;
pub(crate) mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::Entry;
pub use list::{IndexList, NodeId};
pub use shared::Cache;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
