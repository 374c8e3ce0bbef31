//! Bounded memoization keyed by channel identity.
//!
//! [`MatchCache`] remembers the outcome of an expensive lookup per key and
//! forgets the least-recently-used key once more than `capacity` keys are
//! resident. Reads and inserts both count as use.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use crate::stats::CacheStats;

/// Bounded, recency-ordered memoization map from string keys to `V`.
///
/// The only way to populate the cache is [`MatchCache::get_or_compute`];
/// entries leave only through capacity eviction. A capacity of zero turns
/// the cache into a pass-through that recomputes on every call.
///
/// # Concurrency
///
/// All bookkeeping happens under one mutex. `compute` runs with the lock
/// released, so two threads missing the same key at once may both compute
/// it; the first insert wins and the later caller gets the resident value.
pub struct MatchCache<V> {
    capacity: usize,
    inner: Mutex<Inner<V>>,
}

struct Inner<V> {
    /// `None` when capacity is zero. Unbounded in `lru` terms: the bound is
    /// enforced on insert so nothing is allocated ahead of actual keys.
    entries: Option<LruCache<String, V>>,
    stats: CacheStats,
}

impl<V: Clone> MatchCache<V> {
    /// Create a cache holding at most `capacity` keys.
    ///
    /// Memory grows with resident keys, not with `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                entries: (capacity > 0).then(LruCache::unbounded),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Return the value memoized for `key`, computing and storing it on a miss.
    ///
    /// A hit promotes `key` to most-recently-used and does not call
    /// `compute`. A miss calls `compute` once, stores the result as
    /// most-recently-used and evicts the least-recently-used key if the
    /// cache is now over capacity.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.lookup(key) {
            return value;
        }

        let value = compute();
        self.insert(key, value)
    }

    fn lookup(&self, key: &str) -> Option<V> {
        let mut inner = self.lock();
        let Inner { entries, stats } = &mut *inner;

        match entries.as_mut().and_then(|entries| entries.get(key)) {
            Some(value) => {
                stats.hits += 1;
                tracing::trace!(key, "match cache hit");
                Some(value.clone())
            }
            None => {
                stats.misses += 1;
                None
            }
        }
    }

    fn insert(&self, key: &str, value: V) -> V {
        let mut inner = self.lock();
        let Inner { entries, stats } = &mut *inner;

        let Some(entries) = entries.as_mut() else {
            return value;
        };

        // Another caller computed the same key while the lock was released.
        if let Some(resident) = entries.get(key) {
            return resident.clone();
        }

        entries.push(key.to_owned(), value.clone());
        if entries.len() > self.capacity {
            let Some((evicted, _)) = entries.pop_lru() else {
                return value;
            };
            stats.evictions += 1;
            tracing::debug!(
                evicted = %evicted,
                inserted = key,
                capacity = self.capacity,
                "match cache evicted least recently used key"
            );
        }

        value
    }
}

impl<V> MatchCache<V> {
    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // Critical sections never leave the map half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Maximum number of resident keys.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident keys.
    pub fn len(&self) -> usize {
        let inner = self.lock();
        inner.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check residency without touching recency order or statistics.
    pub fn contains(&self, key: &str) -> bool {
        let inner = self.lock();
        inner
            .entries
            .as_ref()
            .is_some_and(|entries| entries.contains(key))
    }

    /// Snapshot of hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entry_count: inner.entries.as_ref().map_or(0, LruCache::len) as u64,
            ..inner.stats
        }
    }
}

impl<V> fmt::Debug for MatchCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_hit_does_not_recompute() {
        let cache = MatchCache::new(4);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            Some(7)
        };

        assert_eq!(cache.get_or_compute("a", compute), Some(7));
        assert_eq!(cache.get_or_compute("a", compute), Some(7));
        assert_eq!(cache.get_or_compute("a", compute), Some(7));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_lru_eviction_respects_promotion() {
        let cache = MatchCache::new(2);
        cache.get_or_compute("a", || 1);
        cache.get_or_compute("b", || 2);
        // Promote "a"; "b" becomes least recently used.
        assert_eq!(cache.get_or_compute("a", || unreachable!()), 1);
        cache.get_or_compute("c", || 3);

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_without_promotion_oldest_insert_is_evicted() {
        let cache = MatchCache::new(2);
        cache.get_or_compute("a", || 1);
        cache.get_or_compute("b", || 2);
        cache.get_or_compute("c", || 3);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_negative_results_are_cached() {
        let cache: MatchCache<Option<u32>> = MatchCache::new(2);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            None
        };

        assert_eq!(cache.get_or_compute("missing", compute), None);
        assert_eq!(cache.get_or_compute("missing", compute), None);
        assert_eq!(calls.get(), 1);
        assert!(cache.contains("missing"));
    }

    #[test]
    fn test_negative_results_are_evicted_like_any_other() {
        let cache: MatchCache<Option<u32>> = MatchCache::new(1);
        cache.get_or_compute("missing", || None);
        cache.get_or_compute("present", || Some(1));

        assert!(!cache.contains("missing"));
        assert!(cache.contains("present"));
    }

    #[test]
    fn test_zero_capacity_always_recomputes() {
        let cache = MatchCache::new(0);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            calls.get()
        };

        assert_eq!(cache.get_or_compute("a", compute), 1);
        assert_eq!(cache.get_or_compute("a", compute), 2);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert!(!cache.contains("a"));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_keys_are_exact() {
        let cache = MatchCache::new(4);
        cache.get_or_compute("CCTV-1", || 1);
        assert_eq!(cache.get_or_compute("cctv-1", || 2), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let cache = MatchCache::new(4);
        cache.get_or_compute("a", || 1);
        cache.get_or_compute("a", || 1);
        cache.get_or_compute("b", || 2);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_contains_does_not_promote() {
        let cache = MatchCache::new(2);
        cache.get_or_compute("a", || 1);
        cache.get_or_compute("b", || 2);
        assert!(cache.contains("a"));
        cache.get_or_compute("c", || 3);

        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_reentrant_compute_does_not_deadlock() {
        let cache = MatchCache::new(4);
        let outer = cache.get_or_compute("outer", || cache.get_or_compute("inner", || 1) + 1);
        assert_eq!(outer, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let cache = MatchCache::new(usize::MAX);
        assert_eq!(cache.capacity(), usize::MAX);

        for i in 0..16 {
            cache.get_or_compute(&format!("key-{i}"), || i);
        }
        assert_eq!(cache.len(), 16);
        assert_eq!(cache.get_or_compute("key-3", || unreachable!()), 3);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_poisoned_lock_is_recovered_by_observers() {
        let cache = MatchCache::new(2);
        cache.get_or_compute("a", || 1);

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = cache.inner.lock().unwrap();
            panic!("poison the cache lock");
        }));
        assert!(poisoned.is_err());

        assert_eq!(cache.len(), 1);
        assert!(cache.contains("a"));
        assert_eq!(cache.stats().entry_count, 1);
        assert_eq!(cache.get_or_compute("a", || unreachable!()), 1);
    }

    #[test]
    fn test_debug_shows_capacity() {
        let cache: MatchCache<u8> = MatchCache::new(3);
        let debug = format!("{:?}", cache);
        assert!(debug.contains("capacity: 3"));
        assert!(debug.contains("len: 0"));
    }
}
