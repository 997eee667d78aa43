//! Cache Module
//!
//! Provides LFU-bounded memoization of arbitrary computations.

mod args;
mod frequency;
mod key;
mod memo;
mod snapshot;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use args::{Arg, CallArgs};
pub use frequency::FrequencyTracker;
pub use key::{CacheKey, KeyValue};
pub use memo::{MemoCache, Memoized};
pub use snapshot::{CacheSnapshot, SnapshotEntry};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_MAX_LIMIT: usize = 64;
