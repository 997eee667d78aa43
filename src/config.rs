//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_MAX_LIMIT;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of memoized results the cache can hold
    pub max_limit: usize,
    /// Interval in seconds between stats reports, 0 disables reporting
    pub report_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LFU_MAX_LIMIT` - Cache capacity (default: 64, must be positive)
    /// - `LFU_REPORT_INTERVAL` - Stats report frequency in seconds (default: 0)
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` when `LFU_MAX_LIMIT` is not a
    /// positive integer.
    pub fn from_env() -> Result<Self> {
        let max_limit = match env::var("LFU_MAX_LIMIT") {
            Ok(raw) => Self::parse_max_limit(&raw)?,
            Err(_) => DEFAULT_MAX_LIMIT,
        };

        Ok(Self {
            max_limit,
            report_interval: env::var("LFU_REPORT_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        })
    }

    /// Parses and validates a capacity value.
    ///
    /// Zero and negative values are rejected rather than clamped.
    pub fn parse_max_limit(raw: &str) -> Result<usize> {
        let value: i64 = raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfiguration(format!("max_limit is not an integer: {:?}", raw))
        })?;

        if value <= 0 {
            return Err(CacheError::InvalidConfiguration(format!(
                "max_limit must be positive, got {}",
                value
            )));
        }

        usize::try_from(value).map_err(|_| {
            CacheError::InvalidConfiguration(format!("max_limit {} does not fit in memory", value))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
            report_interval: 0,
        }
    }
}
