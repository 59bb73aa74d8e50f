//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Absence of a key is never an error: lookups return `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity or TTL rejected at construction time
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = CacheError::InvalidConfig("max_size must be greater than zero".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid config: max_size must be greater than zero"
        );
    }
}
