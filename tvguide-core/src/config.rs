//! Configuration types

use crate::{ConfigError, GuideError, GuideResult, ProgrammeFallback};
use serde::{Deserialize, Serialize};

/// Default number of channel identities a guide set remembers.
pub const DEFAULT_MATCH_CACHE_CAPACITY: usize = 1024;

/// Upper bound accepted by [`GuideConfig::validate`].
pub const MAX_MATCH_CACHE_CAPACITY: usize = 1 << 20;

/// Guide lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Maximum number of memoized channel matches. Zero disables memoization.
    pub match_cache_capacity: usize,
    /// Policy used when no programme airs at the queried instant.
    pub programme_fallback: ProgrammeFallback,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            match_cache_capacity: DEFAULT_MATCH_CACHE_CAPACITY,
            programme_fallback: ProgrammeFallback::default(),
        }
    }
}

impl GuideConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match cache capacity.
    pub fn with_match_cache_capacity(mut self, capacity: usize) -> Self {
        self.match_cache_capacity = capacity;
        self
    }

    /// Set the programme fallback policy.
    pub fn with_programme_fallback(mut self, fallback: ProgrammeFallback) -> Self {
        self.programme_fallback = fallback;
        self
    }

    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `TVGUIDE_MATCH_CACHE_CAPACITY`: Match cache capacity (default: 1024)
    /// - `TVGUIDE_PROGRAMME_FALLBACK`: `current_only` or `nearest` (default: `current_only`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            match_cache_capacity: lookup("TVGUIDE_MATCH_CACHE_CAPACITY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.match_cache_capacity),
            programme_fallback: lookup("TVGUIDE_PROGRAMME_FALLBACK")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.programme_fallback),
        }
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - match_cache_capacity <= MAX_MATCH_CACHE_CAPACITY
    pub fn validate(&self) -> GuideResult<()> {
        if self.match_cache_capacity > MAX_MATCH_CACHE_CAPACITY {
            return Err(GuideError::Config(ConfigError::InvalidValue {
                field: "match_cache_capacity".to_string(),
                value: self.match_cache_capacity.to_string(),
                reason: format!("match_cache_capacity must be at most {}", MAX_MATCH_CACHE_CAPACITY),
            }));
        }

        Ok(())
    }
}
