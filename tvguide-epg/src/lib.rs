//! TVGUIDE EPG - Channel to Guide Matching
//!
//! [`GuideSet`] owns every channel's [`GuideEntry`] in priority order and a
//! bounded match cache, so resolving hundreds of channels per frame costs a
//! cache lookup rather than a scan of the whole guide.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use tvguide_epg::{Channel, GuideEntry, GuideSet, Programme};
//!
//! let at = |h| Utc.with_ymd_and_hms(2024, 5, 1, h, 0, 0).unwrap();
//! let set = GuideSet::new(vec![GuideEntry::new(
//!     ["CCTV-1"],
//!     vec![Programme::new("Morning News", at(9), at(10)).unwrap()],
//! )]);
//!
//! let recent = set.recent_programme(&Channel::new("cctv-1"), at(9)).unwrap();
//! assert_eq!(recent.current.title(), "Morning News");
//! ```

pub mod guide_set;

pub use guide_set::GuideSet;

pub use tvguide_cache::CacheStats;
pub use tvguide_core::{
    Airing, Channel, GuideConfig, GuideEntry, GuideError, GuideResult, Programme,
    ProgrammeFallback, RecentProgramme, Timestamp, MAX_MATCH_CACHE_CAPACITY,
};
