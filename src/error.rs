//! Error types for the memoization cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the memoization cache.
///
/// Errors raised by a wrapped computation are never converted into this type;
/// they reach the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity or other configuration value is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Call arguments cannot be turned into a stable cache key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Internal bookkeeping was driven into an inconsistent state
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

// == Result Type Alias ==
/// Convenience Result type for the memoization cache.
pub type Result<T> = std::result::Result<T, CacheError>;
