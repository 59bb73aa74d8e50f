//! Thread-safe Cache
//!
//! Wraps a [`CacheStore`] in a single reader/writer lock so one instance can
//! be shared across threads (typically behind an `Arc`).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, EvictionListener, Hooks, Logger};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cache ==
/// Generic LRU + TTL cache guarded by one `RwLock`.
///
/// `contains`, `len` and `stats` take the shared lock. Every other operation
/// takes the exclusive lock for its full duration, `get` included since it
/// promotes and may evict. Hooks run while that lock is held.
pub struct Cache<K, V> {
    store: RwLock<CacheStore<K, V>>,
    pub(crate) hooks: Arc<Hooks<K, V>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + fmt::Display,
{
    // == Constructors ==
    /// Creates a cache without hooks.
    ///
    /// # Errors
    /// `CacheError::InvalidConfig` if `max_size` or `ttl` is zero.
    pub fn new(max_size: usize, ttl: Duration) -> Result<Self> {
        Self::builder().max_size(max_size).ttl(ttl).build()
    }

    /// Creates a cache without hooks from a loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::builder().config(config.clone()).build()
    }

    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    /// Presence check only: expired entries still count and recency is untouched.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.read().contains(key)
    }

    /// Returns a fresh value and promotes it; an expired entry is evicted.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.store.write().get(key)
    }

    /// Inserts or overwrites `key`, returning the replaced value.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.store.write().put(key, value)
    }

    /// Removes `key` and returns its value.
    pub fn evict<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.write().evict(key)
    }

    /// Removes the least recently used entry, if any.
    pub fn evict_lru(&self) {
        self.store.write().evict_lru();
    }

    /// Removes every entry. The eviction hook is not called.
    pub fn clear(&self) {
        self.store.write().clear();
    }
}

impl<K, V> Cache<K, V> {
    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.read().capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.store.read().ttl()
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store.read();
        f.debug_struct("Cache")
            .field("capacity", &store.capacity())
            .field("ttl", &store.ttl())
            .field("len", &store.len())
            .field("hooks", &self.hooks)
            .finish()
    }
}

// == Cache Builder ==
/// Collects configuration and hooks; validation happens in [`CacheBuilder::build`].
pub struct CacheBuilder<K, V> {
    config: CacheConfig,
    logger: Option<Logger>,
    on_evict: Option<EvictionListener<K, V>>,
}

impl<K, V> Default for CacheBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheBuilder<K, V> {
    pub fn new() -> Self {
        Self {
            config: CacheConfig::default(),
            logger: None,
            on_evict: None,
        }
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.config.max_size = max_size;
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self
    }

    pub fn config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs the logging hook.
    ///
    /// Must not call back into the cache being built.
    pub fn logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Installs the eviction hook, called once per individually removed entry.
    ///
    /// Must not call back into the cache being built.
    pub fn on_evict<F>(mut self, on_evict: F) -> Self
    where
        F: Fn(&K, &V) + Send + Sync + 'static,
    {
        self.on_evict = Some(Box::new(on_evict));
        self
    }
}

impl<K, V> CacheBuilder<K, V>
where
    K: Hash + Eq + Clone + fmt::Display,
{
    /// Validates the configuration and creates the cache.
    ///
    /// # Errors
    /// `CacheError::InvalidConfig` if `max_size` or `ttl` is zero; no cache is created.
    pub fn build(self) -> Result<Cache<K, V>> {
        let CacheBuilder {
            config,
            logger,
            on_evict,
        } = self;

        let hooks = Arc::new(Hooks::new(logger, on_evict));
        let store = CacheStore::new(config.max_size, config.ttl, hooks.clone())?;

        debug!(
            max_size = config.max_size,
            ttl_ms = config.ttl.as_millis() as u64,
            "Cache created"
        );

        Ok(Cache {
            store: RwLock::new(store),
            hooks,
        })
    }
}
