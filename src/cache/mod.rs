//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration, LRU eviction and
//! compute-or-fetch helpers.

mod entry;
mod fetch;
mod hooks;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use hooks::{tracing_logger, EvictionListener, Hooks, LogEvent, Logger};
pub use lru::LruTracker;
pub use shared::{Cache, CacheBuilder};
pub use stats::CacheStats;
pub use store::CacheStore;
