//! "On now / coming up" projection of a guide entry.

use crate::{ConfigError, Programme};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FALLBACK POLICY
// ============================================================================

/// What to return when no programme airs at the queried instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgrammeFallback {
    /// Only a programme whose airtime contains the instant is relevant.
    #[default]
    CurrentOnly,
    /// Fall back to the nearest upcoming programme, or to the last
    /// programme once the whole schedule has ended.
    Nearest,
}

impl ProgrammeFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgrammeFallback::CurrentOnly => "current_only",
            ProgrammeFallback::Nearest => "nearest",
        }
    }
}

impl fmt::Display for ProgrammeFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgrammeFallback {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "current_only" | "current" => Ok(ProgrammeFallback::CurrentOnly),
            "nearest" => Ok(ProgrammeFallback::Nearest),
            _ => Err(ConfigError::UnknownFallback {
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// RECENT PROGRAMME VIEW
// ============================================================================

/// How the selected programme relates to the queried instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Airing {
    /// The instant falls inside the programme's airtime.
    OnAir,
    /// The programme starts after the instant.
    Upcoming,
    /// The programme finished before the instant.
    Ended,
}

/// Read-only view of the programme relevant to an instant and the one after it.
///
/// Built fresh on every query; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentProgramme {
    pub current: Programme,
    pub next: Option<Programme>,
    pub airing: Airing,
}

impl RecentProgramme {
    pub fn is_on_air(&self) -> bool {
        self.airing == Airing::OnAir
    }
}
