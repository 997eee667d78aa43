//! Cache Store Module
//!
//! Bounded key-value storage with a parallel frequency tracker and LFU eviction.

use std::collections::HashMap;

use crate::cache::{CacheKey, CacheSnapshot, CacheStats, FrequencyTracker, SnapshotEntry};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded storage for memoized results.
///
/// `values` and `frequencies` always hold exactly the same keys; every
/// mutation touches both before returning.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Memoized results
    values: HashMap<CacheKey, V>,
    /// Use counts and insertion order
    frequencies: FrequencyTracker<CacheKey>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed, fixed at construction
    max_limit: usize,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if `max_limit` is zero.
    pub fn new(max_limit: usize) -> Result<Self> {
        if max_limit == 0 {
            return Err(CacheError::InvalidConfiguration(
                "max_limit must be positive, got 0".to_string(),
            ));
        }

        Ok(Self {
            values: HashMap::new(),
            frequencies: FrequencyTracker::new(),
            stats: CacheStats::new(max_limit),
            max_limit,
        })
    }

    // == Put ==
    /// Inserts a freshly computed value with a frequency of 1.
    ///
    /// # Errors
    /// Returns `CacheError::InvariantViolation` if the store is already full
    /// (callers must run [`evict_if_full`](Self::evict_if_full) first) or the
    /// key is already resident.
    pub fn put(&mut self, key: CacheKey, value: V) -> Result<()> {
        if self.values.len() >= self.max_limit {
            return Err(CacheError::InvariantViolation(format!(
                "put called at capacity {} without a prior eviction",
                self.max_limit
            )));
        }
        if self.values.contains_key(&key) {
            return Err(CacheError::InvariantViolation(format!(
                "put called for resident key {}",
                key
            )));
        }

        self.frequencies.insert(key.clone());
        self.values.insert(key, value);
        self.stats.record_miss();
        self.stats.set_total_entries(self.values.len());
        Ok(())
    }

    // == Replace ==
    /// Overwrites the value of a resident key, returning the old value.
    ///
    /// Frequency and insertion position are left untouched. Returns None and
    /// drops `value` if the key is not resident.
    pub fn replace(&mut self, key: &CacheKey, value: V) -> Option<V> {
        let slot = self.values.get_mut(key)?;
        self.stats.record_miss();
        Some(std::mem::replace(slot, value))
    }

    // == Evict If Full ==
    /// Evicts one entry if the store is at capacity.
    ///
    /// The victim is the key with the smallest frequency; ties go to the
    /// earliest inserted key. Returns the evicted key, or None when there
    /// was room.
    pub fn evict_if_full(&mut self) -> Option<CacheKey> {
        if self.values.len() < self.max_limit {
            return None;
        }

        let victim = self.frequencies.select_victim()?.clone();
        self.frequencies.remove(&victim);
        self.values.remove(&victim);
        self.stats.record_eviction();
        self.stats.set_total_entries(self.values.len());
        Some(victim)
    }

    // == Contains ==
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.values.contains_key(key)
    }

    // == Frequency ==
    /// Returns the frequency of a resident key without counting a hit.
    pub fn frequency(&self, key: &CacheKey) -> Option<u64> {
        self.frequencies.frequency(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.values.len());
        stats
    }

    // == Max Limit ==
    pub fn max_limit(&self) -> usize {
        self.max_limit
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a value by key, counting a hit.
    ///
    /// A hit bumps the key's frequency by one. A miss leaves the store
    /// untouched.
    pub fn get(&mut self, key: &CacheKey) -> Option<V> {
        let value = self.values.get(key)?.clone();
        self.frequencies.increment(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Snapshot ==
    /// Copies every resident entry with its frequency, in insertion order.
    pub fn snapshot(&self) -> CacheSnapshot<V> {
        let entries = self
            .frequencies
            .iter()
            .filter_map(|(key, frequency)| {
                self.values.get(key).map(|value| SnapshotEntry {
                    key: key.clone(),
                    value: value.clone(),
                    frequency,
                })
            })
            .collect();
        CacheSnapshot { entries }
    }
}
