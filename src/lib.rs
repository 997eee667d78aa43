//! LFU Memo - A bounded memoization cache
//!
//! Wraps arbitrary computations and evicts the least frequently used result
//! once the configured capacity is reached.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{
    Arg, CacheKey, CacheSnapshot, CacheStats, CacheStore, CallArgs, MemoCache, Memoized,
};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_stats_reporter;
