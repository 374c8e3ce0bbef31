//! Channel identity as seen by the guide matcher.

use serde::{Deserialize, Serialize};

/// A live channel. Only the EPG name takes part in guide matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    /// Name the channel is listed under in guide data; defaults to `name`.
    pub epg_name: String,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            epg_name: name.clone(),
            name,
        }
    }

    pub fn with_epg_name(name: impl Into<String>, epg_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            epg_name: epg_name.into(),
        }
    }

    /// Key used to look this channel up in a guide set.
    pub fn identity(&self) -> &str {
        &self.epg_name
    }
}
