//! GuideSet - every channel's guide, in match-priority order.

use std::sync::Arc;

use tvguide_cache::{CacheStats, MatchCache};
use tvguide_core::{
    Channel, GuideConfig, GuideEntry, GuideResult, ProgrammeFallback, RecentProgramme, Timestamp,
    MAX_MATCH_CACHE_CAPACITY,
};

/// Ordered collection of guide entries with memoized channel matching.
///
/// Entry order is match priority: when several entries carry the same
/// alias, the earliest one wins. The set is immutable once built; fresh
/// guide data means building a new set, which starts with an empty cache.
#[derive(Debug)]
pub struct GuideSet {
    entries: Vec<Arc<GuideEntry>>,
    match_cache: MatchCache<Option<Arc<GuideEntry>>>,
    programme_fallback: ProgrammeFallback,
}

impl GuideSet {
    /// Build a set with the default configuration.
    pub fn new(entries: impl IntoIterator<Item = GuideEntry>) -> Self {
        Self::with_config(entries, &GuideConfig::default())
    }

    /// Build a set from `config`.
    ///
    /// A capacity above [`MAX_MATCH_CACHE_CAPACITY`] is clamped to it. Use
    /// [`GuideSet::try_with_config`] to reject such a config instead.
    pub fn with_config(entries: impl IntoIterator<Item = GuideEntry>, config: &GuideConfig) -> Self {
        let mut match_cache_capacity = config.match_cache_capacity;
        if let Err(err) = config.validate() {
            tracing::warn!(
                error = %err,
                requested = match_cache_capacity,
                clamped = MAX_MATCH_CACHE_CAPACITY,
                "clamping match cache capacity"
            );
            match_cache_capacity = match_cache_capacity.min(MAX_MATCH_CACHE_CAPACITY);
        }

        let entries: Vec<Arc<GuideEntry>> = entries.into_iter().map(Arc::new).collect();

        tracing::debug!(
            entries = entries.len(),
            match_cache_capacity,
            programme_fallback = %config.programme_fallback,
            "built guide set"
        );

        Self {
            entries,
            match_cache: MatchCache::new(match_cache_capacity),
            programme_fallback: config.programme_fallback,
        }
    }

    /// Like [`GuideSet::with_config`], but fails on an invalid config.
    pub fn try_with_config(
        entries: impl IntoIterator<Item = GuideEntry>,
        config: &GuideConfig,
    ) -> GuideResult<Self> {
        config.validate()?;
        Ok(Self::with_config(entries, config))
    }

    /// Resolve a channel identity to its guide entry.
    ///
    /// Aliases are compared case-insensitively; the cache is keyed by the
    /// identity exactly as given. `None` means no entry lists the identity
    /// and is memoized like a match.
    pub fn match_identity(&self, identity: &str) -> Option<Arc<GuideEntry>> {
        self.match_cache
            .get_or_compute(identity, || self.scan(identity))
    }

    /// Resolve a channel by its EPG name.
    pub fn match_channel(&self, channel: &Channel) -> Option<Arc<GuideEntry>> {
        self.match_identity(channel.identity())
    }

    /// The programme relevant to `channel` at `now`, using the set's fallback policy.
    pub fn recent_programme(&self, channel: &Channel, now: Timestamp) -> Option<RecentProgramme> {
        self.match_channel(channel)?
            .recent_programme(now, self.programme_fallback)
    }

    fn scan(&self, identity: &str) -> Option<Arc<GuideEntry>> {
        let found = self.entries.iter().find(|entry| entry.matches(identity)).cloned();
        tracing::debug!(identity, matched = found.is_some(), "scanned guide entries");
        found
    }

    pub fn entries(&self) -> &[Arc<GuideEntry>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuideEntry> {
        self.entries.iter().map(Arc::as_ref)
    }

    pub fn get(&self, index: usize) -> Option<&GuideEntry> {
        self.entries.get(index).map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Effective match cache capacity after clamping.
    pub fn match_cache_capacity(&self) -> usize {
        self.match_cache.capacity()
    }

    pub fn programme_fallback(&self) -> ProgrammeFallback {
        self.programme_fallback
    }

    /// Match cache counters; every miss corresponds to one full scan.
    pub fn cache_stats(&self) -> CacheStats {
        self.match_cache.stats()
    }
}

impl Default for GuideSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<GuideEntry> for GuideSet {
    fn from_iter<I: IntoIterator<Item = GuideEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}
