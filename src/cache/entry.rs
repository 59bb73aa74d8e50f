//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of the last write; reads never refresh it
    pub last_write: Instant,
    /// Handle of this entry's node in the recency list
    pub(crate) slot: usize,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry written now.
    pub(crate) fn new(value: V, slot: usize) -> Self {
        Self {
            value,
            last_write: Instant::now(),
            slot,
        }
    }

    // == Overwrite ==
    /// Replaces the value, refreshes the write timestamp and returns the old value.
    pub(crate) fn overwrite(&mut self, value: V) -> V {
        self.last_write = Instant::now();
        std::mem::replace(&mut self.value, value)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// An entry is expired once strictly more than `ttl` has elapsed since
    /// its last write.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.last_write.elapsed() > ttl
    }

    // == Time To Live ==
    /// Returns the time left before the entry expires, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.last_write.elapsed())
    }
}
