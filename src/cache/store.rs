//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy TTL
//! expiration. The store is unsynchronised; [`crate::cache::Cache`] wraps it
//! in a lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Hooks, LogEvent, LruTracker};
use crate::config::CacheConfig;
use crate::error::Result;

const CLEAR_MESSAGE: &str = "All cache entries have been removed.";

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// Every key in `entries` has exactly one node in `lru` and vice versa; each
/// entry carries the slot of its node.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Lifetime of an entry since its last write
    ttl: Duration,
    hooks: Arc<Hooks<K, V>>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone + Display,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Errors
    /// `CacheError::InvalidConfig` if `max_size` is zero or `ttl` is zero.
    pub fn new(max_size: usize, ttl: Duration, hooks: Arc<Hooks<K, V>>) -> Result<Self> {
        CacheConfig::new(max_size, ttl).validate()?;

        Ok(Self {
            entries: HashMap::with_capacity(max_size),
            lru: LruTracker::with_capacity(max_size),
            stats: CacheStats::new(),
            max_size,
            ttl,
            hooks,
        })
    }

    // == Contains ==
    /// Reports whether `key` is stored, without checking its TTL or touching recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A live entry is promoted to most recently used; its write timestamp is
    /// left alone. An expired entry is evicted and reported as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired(self.ttl) {
            if let Some((key, _)) = self.remove_entry(key) {
                debug!(key = %key, "Expired entry evicted on read");
            }
            self.stats.record_expiration();
            return None;
        }

        self.lru.touch(entry.slot);
        self.stats.record_hit();

        let (key, entry) = self.entries.get_key_value(key)?;
        self.hooks.log(LogEvent::Get, key);
        Some(entry.value.clone())
    }

    // == Put ==
    /// Stores a key-value pair, returning the value it replaced.
    ///
    /// Overwriting refreshes the write timestamp and recency but never evicts.
    /// A new key arriving at capacity evicts the least recently used entry first.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(entry) = self.entries.get_mut(&key) {
            let previous = entry.overwrite(value);
            self.lru.touch(entry.slot);
            self.hooks.log(LogEvent::Update, &key);
            return Some(previous);
        }

        if self.entries.len() >= self.max_size {
            if let Some((evicted, _)) = self.remove_oldest() {
                debug!(key = %evicted, "Capacity reached, evicted least recently used entry");
                self.stats.record_eviction();
            }
        }

        let slot = self.lru.push(key.clone());
        self.entries.insert(key.clone(), CacheEntry::new(value, slot));
        self.stats.set_total_entries(self.entries.len());
        self.hooks.log(LogEvent::Put, &key);
        None
    }

    // == Evict ==
    /// Removes `key`, notifying the eviction hook, and returns its value.
    pub fn evict<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (_, value) = self.remove_entry(key)?;
        self.stats.record_removal();
        Some(value)
    }

    // == Evict LRU ==
    /// Removes the least recently used entry. No-op on an empty store.
    pub fn evict_lru(&mut self) {
        if self.remove_oldest().is_some() {
            self.stats.record_removal();
        }
    }

    // == Clear ==
    /// Drops every entry without invoking the eviction hook.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        self.hooks.log(LogEvent::Clear, &CLEAR_MESSAGE);
    }

    /// Single-key eviction path shared by every removal trigger.
    ///
    /// The eviction hook sees the pair before it is unlinked; the log line is
    /// written once both structures agree again.
    fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (stored_key, entry) = self.entries.get_key_value(key)?;
        self.hooks.evicted(stored_key, &entry.value);

        let (stored_key, entry) = self.entries.remove_entry(key)?;
        self.lru.remove(entry.slot);
        self.stats.set_total_entries(self.entries.len());
        self.hooks.log(LogEvent::Evict, &stored_key);
        Some((stored_key, entry.value))
    }

    fn remove_oldest(&mut self) -> Option<(K, V)> {
        let (_, oldest) = self.lru.peek_oldest()?;
        let oldest = oldest.clone();
        self.remove_entry(&oldest)
    }
}

impl<K, V> CacheStore<K, V> {
    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys from least to most recently used.
    pub fn recency_order(&self) -> impl Iterator<Item = &K> + '_ {
        self.lru.iter()
    }

    // == Length ==
    /// Returns the current number of entries in the cache, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
impl<K: Hash + Eq, V> CacheStore<K, V> {
    /// Checks the one-to-one correspondence between map and recency list.
    pub(crate) fn is_consistent(&self) -> bool {
        self.lru.len() == self.entries.len()
            && self.lru.iter().all(|key| self.entries.contains_key(key))
    }
}
