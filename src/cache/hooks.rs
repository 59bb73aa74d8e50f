//! Observability Hooks
//!
//! Optional callbacks invoked synchronously from cache operations. Apart from
//! the HIT/MISS lines of compute-or-fetch, they run while the cache's
//! exclusive lock is held, so hook bodies must not call back into the same
//! cache: the lock is not reentrant and doing so deadlocks.
//!
//! A panicking hook unwinds to the caller of the triggering operation.

use std::fmt;

/// Receives one formatted message per cache operation.
pub type Logger = Box<dyn Fn(&str) + Send + Sync>;

/// Receives every key/value pair removed individually from the cache.
pub type EvictionListener<K, V> = Box<dyn Fn(&K, &V) + Send + Sync>;

// == Log Events ==
/// Operation prefixes emitted through the logging hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    Get,
    Put,
    Update,
    Evict,
    Clear,
    Hit,
    Miss,
}

impl LogEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            LogEvent::Get => "GET",
            LogEvent::Put => "PUT",
            LogEvent::Update => "UPDATE",
            LogEvent::Evict => "EVICT",
            LogEvent::Clear => "CLEAR",
            LogEvent::Hit => "HIT",
            LogEvent::Miss => "MISS",
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Hooks ==
/// The pair of optional callbacks a cache is built with.
pub struct Hooks<K, V> {
    logger: Option<Logger>,
    on_evict: Option<EvictionListener<K, V>>,
}

impl<K, V> Default for Hooks<K, V> {
    fn default() -> Self {
        Self {
            logger: None,
            on_evict: None,
        }
    }
}

impl<K, V> fmt::Debug for Hooks<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("logger", &self.logger.is_some())
            .field("on_evict", &self.on_evict.is_some())
            .finish()
    }
}

impl<K, V> Hooks<K, V> {
    pub fn new(logger: Option<Logger>, on_evict: Option<EvictionListener<K, V>>) -> Self {
        Self { logger, on_evict }
    }

    /// Formats `<EVENT>: <key>` and hands it to the logger, if any.
    ///
    /// Nothing is formatted when no logger is installed.
    pub fn log(&self, event: LogEvent, subject: &dyn fmt::Display) {
        if let Some(logger) = &self.logger {
            logger(&format!("{event}: {subject}"));
        }
    }

    pub fn evicted(&self, key: &K, value: &V) {
        if let Some(on_evict) = &self.on_evict {
            on_evict(key, value);
        }
    }
}

/// A logging hook that forwards every cache message to `tracing` at debug level.
pub fn tracing_logger() -> impl Fn(&str) + Send + Sync + 'static {
    |message: &str| tracing::debug!(target: "ttl_lru_cache::ops", "{}", message)
}
