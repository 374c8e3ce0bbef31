//! Programme - one scheduled broadcast slot.

use crate::{GuideError, GuideResult, Timestamp, ValidationError};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// One scheduled broadcast slot on a channel.
///
/// The airtime is the half-open interval `[start_at, end_at)`, so a
/// programme ending at 10:00 and one starting at 10:00 never overlap.
///
/// Deserialization goes through [`Programme::new`], so stored data with an
/// empty title or a non-positive interval is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProgrammeRecord")]
pub struct Programme {
    title: String,
    start_at: Timestamp,
    end_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

/// Unchecked wire shape of a [`Programme`].
#[derive(Deserialize)]
struct ProgrammeRecord {
    title: String,
    start_at: Timestamp,
    end_at: Timestamp,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl TryFrom<ProgrammeRecord> for Programme {
    type Error = GuideError;

    fn try_from(record: ProgrammeRecord) -> GuideResult<Self> {
        let mut programme = Programme::new(record.title, record.start_at, record.end_at)?;
        programme.description = record.description;
        programme.category = record.category;
        Ok(programme)
    }
}

impl Programme {
    /// Create a programme, enforcing `start_at < end_at` and a non-empty title.
    pub fn new(
        title: impl Into<String>,
        start_at: Timestamp,
        end_at: Timestamp,
    ) -> GuideResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if start_at >= end_at {
            return Err(ValidationError::InvalidInterval {
                title,
                start_at,
                end_at,
            }
            .into());
        }

        Ok(Self {
            title,
            start_at,
            end_at,
            description: None,
            category: None,
        })
    }

    /// Attach a free-form description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a genre/category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_at(&self) -> Timestamp {
        self.start_at
    }

    pub fn end_at(&self) -> Timestamp {
        self.end_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn duration(&self) -> Duration {
        self.end_at - self.start_at
    }

    /// True when `at` falls inside `[start_at, end_at)`.
    pub fn is_live_at(&self, at: Timestamp) -> bool {
        self.start_at <= at && at < self.end_at
    }

    /// True when the programme has finished by `at`.
    pub fn has_ended_at(&self, at: Timestamp) -> bool {
        self.end_at <= at
    }

    /// True when the programme has not started yet at `at`.
    pub fn is_upcoming_at(&self, at: Timestamp) -> bool {
        at < self.start_at
    }

    /// True when the programme's airtime intersects `[from, to)`.
    pub fn overlaps(&self, from: Timestamp, to: Timestamp) -> bool {
        self.start_at < to && from < self.end_at
    }

    /// Fraction of the programme that has aired at `at`, clamped to `[0.0, 1.0]`.
    pub fn progress_at(&self, at: Timestamp) -> f32 {
        if at <= self.start_at {
            return 0.0;
        }
        if at >= self.end_at {
            return 1.0;
        }
        let elapsed = (at - self.start_at).num_milliseconds() as f64;
        let total = self.duration().num_milliseconds() as f64;
        (elapsed / total) as f32
    }
}
