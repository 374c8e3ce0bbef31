//! Counters describing how well a [`MatchCache`](crate::MatchCache) is
//! saving guide scans.

/// Point-in-time snapshot of a match cache.
///
/// Counters only grow for the lifetime of the cache; `entry_count` is the
/// number of identities resident when the snapshot was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from memory.
    pub hits: u64,
    /// Lookups that ran the scan, including every call on a zero-capacity cache.
    pub misses: u64,
    pub entry_count: u64,
    /// Identities dropped to stay within capacity.
    pub evictions: u64,
}

impl CacheStats {
    /// Total `get_or_compute` calls observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups that skipped the scan; `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }
}
