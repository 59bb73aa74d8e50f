//! Compute-or-Fetch
//!
//! "Return the cached value or compute and store it" on top of the primitive
//! operations. The producer always runs without the lock held.
//!
//! There is no single-flight deduplication: concurrent misses on the same key
//! each run their producer and the last `put` wins.

use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{Cache, LogEvent};

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + Display,
    V: Clone,
{
    /// Returns the cached value for `key`, or runs `producer` and caches what it yields.
    ///
    /// A producer returning `None` leaves the cache untouched.
    pub fn with_cache<F>(&self, key: K, producer: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        if let Some(value) = self.lookup(&key) {
            return Some(value);
        }
        let value = producer()?;
        self.put(key, value.clone());
        Some(value)
    }

    /// Like [`Cache::with_cache`] for a fallible producer.
    ///
    /// The producer's error is returned unchanged and nothing is cached.
    pub fn try_with_cache<F, E>(&self, key: K, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }
        let value = producer()?;
        self.put(key, value.clone());
        Ok(value)
    }

    /// Like [`Cache::with_cache`] for an async producer.
    ///
    /// The lock is never held across the `.await`, and `producer` is only
    /// polled on a miss.
    pub async fn with_cache_async<F>(&self, key: K, producer: F) -> Option<V>
    where
        F: Future<Output = Option<V>>,
    {
        if let Some(value) = self.lookup(&key) {
            return Some(value);
        }
        let value = producer.await?;
        self.put(key, value.clone());
        Some(value)
    }

    /// `get` plus the HIT/MISS log line.
    fn lookup(&self, key: &K) -> Option<V> {
        match self.get(key) {
            Some(value) => {
                trace!(key = %key, "Compute-or-fetch hit");
                self.hooks.log(LogEvent::Hit, key);
                Some(value)
            }
            None => {
                trace!(key = %key, "Compute-or-fetch miss");
                self.hooks.log(LogEvent::Miss, key);
                None
            }
        }
    }
}
