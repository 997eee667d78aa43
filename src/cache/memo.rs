//! Memoizing Cache Module
//!
//! Public entry point: canonicalizes call arguments, answers hits from the
//! store and installs freshly computed results on misses.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheKey, CacheSnapshot, CacheStats, CacheStore, CallArgs};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Memo Cache ==
/// Thread-safe LFU memoization cache.
///
/// Lookups, evictions and inserts run under one lock. The computation itself
/// runs outside it, so two callers missing on the same key at once may both
/// compute; the later install replaces the earlier value.
///
/// Share across threads or tasks with `Arc<MemoCache<V>>`.
#[derive(Debug)]
pub struct MemoCache<V> {
    store: Mutex<CacheStore<V>>,
}

impl<V: Clone> MemoCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `max_limit` results.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if `max_limit` is zero.
    pub fn new(max_limit: usize) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(CacheStore::new(max_limit)?),
        })
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.max_limit)
    }

    // == Call ==
    /// Returns the memoized result for `args`, computing it on a miss.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidKey` before `compute` runs if `args` cannot
    /// be canonicalized.
    pub fn call<F>(&self, args: &CallArgs, compute: F) -> Result<V>
    where
        F: FnOnce(&CallArgs) -> V,
    {
        self.try_call(args, |args| Ok::<V, CacheError>(compute(args)))
    }

    // == Try Call ==
    /// Like [`call`](Self::call) for fallible computations.
    ///
    /// An error from `compute` is returned unchanged and nothing is cached.
    pub fn try_call<F, E>(&self, args: &CallArgs, compute: F) -> std::result::Result<V, E>
    where
        F: FnOnce(&CallArgs) -> std::result::Result<V, E>,
        E: From<CacheError>,
    {
        let key = CacheKey::build(args)?;
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }

        let value = compute(args)?;
        self.install(key, value.clone())?;
        Ok(value)
    }

    // == Try Call Async ==
    /// Like [`try_call`](Self::try_call) for asynchronous computations.
    ///
    /// The store lock is released before the computation is awaited.
    pub async fn try_call_async<F, Fut, E>(
        &self,
        args: &CallArgs,
        compute: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce(CallArgs) -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        E: From<CacheError>,
    {
        let key = CacheKey::build(args)?;
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }

        let value = compute(args.clone()).await?;
        self.install(key, value.clone())?;
        Ok(value)
    }

    fn lookup(&self, key: &CacheKey) -> Option<V> {
        let value = self.store.lock().get(key);
        if value.is_some() {
            debug!(key = %key, "cache hit");
        }
        value
    }

    fn install(&self, key: CacheKey, value: V) -> Result<()> {
        let mut store = self.store.lock();

        if store.contains(&key) {
            debug!(key = %key, "concurrent miss, replacing cached value");
            store.replace(&key, value);
            return Ok(());
        }

        if let Some(evicted) = store.evict_if_full() {
            debug!(key = %evicted, "evicted least frequently used entry");
        }
        debug!(key = %key, "cache miss, storing computed value");
        store.put(key, value)
    }

    // == Introspection ==
    /// Consistent copy of all entries and frequencies.
    pub fn snapshot(&self) -> CacheSnapshot<V> {
        self.store.lock().snapshot()
    }

    pub fn snapshot_entries(&self) -> HashMap<CacheKey, V> {
        self.snapshot().values()
    }

    pub fn snapshot_frequencies(&self) -> HashMap<CacheKey, u64> {
        self.snapshot().frequencies()
    }
}

impl<V> MemoCache<V> {
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn max_limit(&self) -> usize {
        self.store.lock().max_limit()
    }
}

// == Memoized ==
/// A cache bound to a single computation.
pub struct Memoized<F, V> {
    cache: MemoCache<V>,
    compute: F,
}

impl<F, V> Memoized<F, V>
where
    F: Fn(&CallArgs) -> V,
    V: Clone,
{
    /// Wraps `compute` in a cache holding at most `max_limit` results.
    pub fn new(max_limit: usize, compute: F) -> Result<Self> {
        Ok(Self {
            cache: MemoCache::new(max_limit)?,
            compute,
        })
    }

    pub fn call(&self, args: &CallArgs) -> Result<V> {
        self.cache.call(args, &self.compute)
    }
}

impl<F, V: Clone> Memoized<F, V> {
    /// Wraps a fallible `compute`; use [`try_call`](Self::try_call) to invoke it.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if `max_limit` is zero.
    pub fn fallible<E>(max_limit: usize, compute: F) -> Result<Self>
    where
        F: Fn(&CallArgs) -> std::result::Result<V, E>,
        E: From<CacheError>,
    {
        Ok(Self {
            cache: MemoCache::new(max_limit)?,
            compute,
        })
    }

    /// Calls the bound fallible computation through the cache.
    ///
    /// Errors from the computation are returned unchanged and nothing is
    /// cached; key errors are converted into `E`.
    pub fn try_call<E>(&self, args: &CallArgs) -> std::result::Result<V, E>
    where
        F: Fn(&CallArgs) -> std::result::Result<V, E>,
        E: From<CacheError>,
    {
        self.cache.try_call(args, &self.compute)
    }
}

impl<F, V> Memoized<F, V> {
    /// The underlying cache, for introspection.
    pub fn cache(&self) -> &MemoCache<V> {
        &self.cache
    }
}

impl<F, V: fmt::Debug> fmt::Debug for Memoized<F, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
