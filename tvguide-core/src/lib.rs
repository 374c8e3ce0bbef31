//! TVGUIDE Core - Guide Entity Types
//!
//! Immutable guide data: programmes, per-channel guide entries and channel
//! identities, plus the "recent programme" projection. All other crates
//! depend on this.

use chrono::{DateTime, Utc};

pub mod channel;
pub mod config;
pub mod entry;
pub mod error;
pub mod programme;
pub mod recent;

pub use channel::Channel;
pub use config::{GuideConfig, DEFAULT_MATCH_CACHE_CAPACITY, MAX_MATCH_CACHE_CAPACITY};
pub use entry::{eq_ignore_case, GuideEntry};
pub use error::{ConfigError, GuideError, GuideResult, ValidationError};
pub use programme::Programme;
pub use recent::{Airing, ProgrammeFallback, RecentProgramme};

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
