//! Match cache for guide lookups.
//!
//! Resolving a channel to its guide entry is a linear, case-insensitive
//! scan over every entry's aliases. A UI rendering hundreds of channels
//! repeats that lookup constantly, so results are memoized per channel
//! identity in a bounded LRU map. Negative results are memoized too.
//!
//! # Example
//!
//! ```
//! use tvguide_cache::MatchCache;
//!
//! let cache: MatchCache<Option<usize>> = MatchCache::new(1024);
//! let found = cache.get_or_compute("CCTV-1", || Some(0));
//! assert_eq!(found, Some(0));
//! assert_eq!(cache.get_or_compute("CCTV-1", || unreachable!()), Some(0));
//! ```

pub mod match_cache;
pub mod stats;

pub use match_cache::MatchCache;
pub use stats::CacheStats;
