//! Cache Snapshot Module
//!
//! Read-only copy of the resident entries and their frequencies.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::CacheKey;

/// One resident entry at the time of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry<V> {
    pub key: CacheKey,
    pub value: V,
    pub frequency: u64,
}

// == Cache Snapshot ==
/// Consistent view of a cache, taken under a single lock acquisition.
///
/// Entries are listed in insertion order, so the first entry with the
/// smallest frequency is the next eviction victim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheSnapshot<V> {
    pub entries: Vec<SnapshotEntry<V>>,
}

impl<V: Clone> CacheSnapshot<V> {
    /// Key to value mapping.
    pub fn values(&self) -> HashMap<CacheKey, V> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }
}

impl<V> CacheSnapshot<V> {
    /// Key to frequency mapping.
    pub fn frequencies(&self) -> HashMap<CacheKey, u64> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.frequency))
            .collect()
    }

    /// Resident keys in insertion order.
    pub fn keys(&self) -> Vec<&CacheKey> {
        self.entries.iter().map(|e| &e.key).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
