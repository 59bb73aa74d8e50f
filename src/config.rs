//! Configuration Module
//!
//! Handles loading and validating cache configuration.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default capacity when none is configured
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Default time-to-live (5 hours)
pub const DEFAULT_TTL: Duration = Duration::from_millis(1000 * 60 * 60 * 5);

/// Cache configuration parameters.
///
/// Both values are fixed for the lifetime of a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Time-to-live of an entry, measured from its last write
    pub ttl: Duration,
}

impl CacheConfig {
    /// Creates a config from explicit values. Call [`CacheConfig::validate`]
    /// (or build a cache from it) to check them.
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self { max_size, ttl }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_MS` - TTL in milliseconds (default: 5 hours)
    pub fn from_env() -> Self {
        Self::from_env_or(Self::default())
    }

    /// Like [`CacheConfig::from_env`], falling back to `defaults` for unset
    /// or unparsable variables.
    pub fn from_env_or(defaults: CacheConfig) -> Self {
        Self {
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_size),
            ttl: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.ttl),
        }
    }

    // == Validate ==
    /// Rejects a zero capacity or a zero TTL.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            ttl: DEFAULT_TTL,
        }
    }
}
