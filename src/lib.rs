//! TTL LRU Cache - An in-process generic key/value cache
//!
//! Provides bounded capacity with LRU eviction, lazy TTL expiration,
//! optional logging/eviction hooks and a compute-or-fetch helper.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{tracing_logger, Cache, CacheBuilder, CacheStats};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
