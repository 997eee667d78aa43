//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store and memo cache against a simple
//! reference model.

use proptest::prelude::*;
use std::cell::Cell;

use crate::cache::{CacheKey, CacheStore, CallArgs, MemoCache};

// == Test Configuration ==
const TEST_MAX_LIMIT: usize = 4;

fn key(n: u8) -> CacheKey {
    CacheKey::build(&CallArgs::new().arg(u32::from(n))).unwrap()
}

// == Reference Model ==
/// Entries as `(id, frequency)` in insertion order.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(u8, u64)>,
}

impl Model {
    /// Mirrors one memoized call; returns true on a hit.
    fn call(&mut self, id: u8, max_limit: usize) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == id) {
            entry.1 += 1;
            return true;
        }
        if self.entries.len() >= max_limit {
            let min = self.entries.iter().map(|(_, f)| *f).min().unwrap();
            let victim = self.entries.iter().position(|(_, f)| *f == min).unwrap();
            self.entries.remove(victim);
        }
        self.entries.push((id, 1));
        false
    }
}

/// Small key space so hits and evictions both happen often
fn call_sequence_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..10, 1..80)
}

/// Generates keyword arguments with distinct names
fn keywords_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any call sequence, the store never holds more than max_limit entries
    // and every resident value has exactly one frequency.
    #[test]
    fn prop_capacity_and_bijection(
        calls in call_sequence_strategy(),
        max_limit in 1usize..6
    ) {
        let cache = MemoCache::new(max_limit).unwrap();

        for id in calls {
            cache.call(&CallArgs::new().arg(u32::from(id)), |_| u64::from(id) * 10).unwrap();

            let snapshot = cache.snapshot();
            let values = snapshot.values();
            let frequencies = snapshot.frequencies();
            prop_assert!(values.len() <= max_limit, "size {} exceeds {}", values.len(), max_limit);
            prop_assert_eq!(values.len(), frequencies.len());
            prop_assert!(values.keys().all(|k| frequencies.contains_key(k)));
        }
    }

    // Resident keys, their order and their frequencies match the model
    // after every call, which pins down victim choice and tie-breaking.
    #[test]
    fn prop_matches_reference_model(calls in call_sequence_strategy()) {
        let cache = MemoCache::new(TEST_MAX_LIMIT).unwrap();
        let mut model = Model::default();
        let computed = Cell::new(0u64);
        let mut expected_misses = 0u64;

        for id in calls {
            let hit = model.call(id, TEST_MAX_LIMIT);
            if !hit {
                expected_misses += 1;
            }

            let value = cache.call(&CallArgs::new().arg(u32::from(id)), |_| {
                computed.set(computed.get() + 1);
                u64::from(id)
            }).unwrap();
            prop_assert_eq!(value, u64::from(id));

            let snapshot = cache.snapshot();
            let actual: Vec<_> = snapshot
                .entries
                .iter()
                .map(|e| (e.key.clone(), e.frequency))
                .collect();
            let expected: Vec<_> = model
                .entries
                .iter()
                .map(|(id, f)| (key(*id), *f))
                .collect();
            prop_assert_eq!(actual, expected);
        }

        prop_assert_eq!(computed.get(), expected_misses);
        prop_assert_eq!(cache.stats().misses, expected_misses);
    }

    // Frequencies of keys not involved in a call never change.
    #[test]
    fn prop_untouched_frequencies_stable(calls in call_sequence_strategy()) {
        let mut store = CacheStore::new(TEST_MAX_LIMIT).unwrap();

        for id in calls {
            let target = key(id);
            let before = store.snapshot().frequencies();

            if store.get(&target).is_none() {
                store.evict_if_full();
                store.put(target.clone(), id).unwrap();
            }

            let after = store.snapshot().frequencies();
            for (k, freq) in &after {
                if *k != target {
                    prop_assert_eq!(Some(freq), before.get(k));
                }
            }
            prop_assert!(after[&target] >= 1);
        }
    }

    // Supplying the same keywords in any order yields the same key.
    #[test]
    fn prop_keyword_order_independent(
        positional in prop::collection::vec(any::<i64>(), 0..4),
        keywords in keywords_strategy()
    ) {
        let build = |kws: &[(String, i64)]| {
            let mut args = CallArgs::new();
            for p in &positional {
                args = args.arg(*p);
            }
            for (name, value) in kws {
                args = args.kwarg(name.clone(), *value);
            }
            CacheKey::build(&args).unwrap()
        };

        let forward = build(keywords.as_slice());
        let mut reversed = keywords.clone();
        reversed.reverse();
        let backward = build(reversed.as_slice());

        prop_assert_eq!(forward.to_string(), backward.to_string());
        prop_assert_eq!(forward, backward);
    }
}
