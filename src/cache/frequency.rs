//! Frequency Tracker Module
//!
//! Implements per-key use counting and LFU victim selection.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

// == Frequency Tracker ==
/// Tracks use frequency and insertion order for LFU eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Earliest inserted
/// - Back = Most recently inserted
///
/// A hit bumps the counter but never moves the key within the order.
#[derive(Debug)]
pub struct FrequencyTracker<K> {
    /// Use count per tracked key
    counts: HashMap<K, u64>,
    /// Keys by insertion time
    order: VecDeque<K>,
}

impl<K> Default for FrequencyTracker<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            order: VecDeque::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyTracker<K> {
    // == Constructor ==
    /// Creates a new empty frequency tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Starts tracking a key with a frequency of 1.
    ///
    /// Returns false, leaving the existing count alone, if the key is
    /// already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.counts.contains_key(&key) {
            return false;
        }
        self.counts.insert(key.clone(), 1);
        self.order.push_back(key);
        true
    }

    // == Increment ==
    /// Records one use of a key and returns its new frequency.
    pub fn increment(&mut self, key: &K) -> Option<u64> {
        self.counts.get_mut(key).map(|count| {
            *count += 1;
            *count
        })
    }

    // == Remove ==
    /// Stops tracking a key, returning its final frequency.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let count = self.counts.remove(key)?;
        self.order.retain(|k| k != key);
        Some(count)
    }

    // == Select Victim ==
    /// Returns the key with the smallest frequency without removing it.
    ///
    /// Among keys sharing the smallest frequency, the earliest inserted wins.
    /// Returns None if the tracker is empty.
    pub fn select_victim(&self) -> Option<&K> {
        let mut victim: Option<(&K, u64)> = None;
        for key in &self.order {
            let count = self.counts[key];
            // Strict comparison keeps the earliest key on ties.
            if victim.map_or(true, |(_, min)| count < min) {
                victim = Some((key, count));
            }
        }
        victim.map(|(key, _)| key)
    }

    // == Frequency ==
    /// Returns the current frequency of a key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }

    // == Iter ==
    /// Iterates over `(key, frequency)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.order.iter().map(move |key| (key, self.counts[key]))
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }
}
