//! TVGUIDE Test Utilities
//!
//! Centralized test infrastructure for the TVGUIDE workspace:
//! - Proptest generators for guide entity types
//! - Test fixtures for common scenarios
//! - Custom assertions for guide-specific validation
//! - Tracing setup for tests

// Re-export core types for convenience
pub use tvguide_core::{
    Airing, Channel, ConfigError, GuideConfig, GuideEntry, GuideError, GuideResult, Programme,
    ProgrammeFallback, RecentProgramme, Timestamp, ValidationError,
};
pub use tvguide_epg::GuideSet;

use chrono::{Duration, TimeZone, Utc};

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating guide entity types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a Timestamp (DateTime<Utc>).
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        // Generate timestamps within a reasonable range (2020-2030)
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    /// Generate a channel alias such as `CCTV-1` or `bbc1`.
    pub fn arb_alias() -> impl Strategy<Value = String> {
        "[A-Za-z]{2,5}-?[0-9]{0,2}".prop_map(|s| s)
    }

    pub fn arb_programme_fallback() -> impl Strategy<Value = ProgrammeFallback> {
        prop_oneof![
            Just(ProgrammeFallback::CurrentOnly),
            Just(ProgrammeFallback::Nearest),
        ]
    }

    /// Generate a schedule ordered by start time, with optional gaps
    /// between consecutive programmes.
    pub fn arb_schedule() -> impl Strategy<Value = Vec<Programme>> {
        (
            arb_timestamp(),
            prop::collection::vec((1i64..240, 0i64..60, "[a-zA-Z ]{0,20}"), 0..12),
        )
            .prop_map(|(start, slots)| {
                let mut cursor = start;
                slots
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, (minutes, gap, title))| {
                        let start_at = cursor + Duration::minutes(gap);
                        let end_at = start_at + Duration::minutes(minutes);
                        cursor = end_at;
                        Programme::new(format!("#{} {}", i, title), start_at, end_at).ok()
                    })
                    .collect()
            })
    }

    /// Generate a GuideEntry with up to three aliases.
    pub fn arb_guide_entry() -> impl Strategy<Value = GuideEntry> {
        (prop::collection::vec(arb_alias(), 0..4), arb_schedule())
            .prop_map(|(aliases, programmes)| GuideEntry::new(aliases, programmes))
    }

    pub fn arb_guide_entries() -> impl Strategy<Value = Vec<GuideEntry>> {
        prop::collection::vec(arb_guide_entry(), 0..16)
    }

    /// Generate a GuideConfig with a small cache so eviction is exercised.
    pub fn arb_guide_config() -> impl Strategy<Value = GuideConfig> {
        (0usize..8, arb_programme_fallback()).prop_map(|(capacity, fallback)| {
            GuideConfig::new()
                .with_match_cache_capacity(capacity)
                .with_programme_fallback(fallback)
        })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// Midnight UTC of the day all fixtures are scheduled on.
    pub fn fixture_day() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// `hour:minute` on [`fixture_day`].
    pub fn at(hour: u32, minute: u32) -> Timestamp {
        fixture_day() + Duration::hours(hour as i64) + Duration::minutes(minute as i64)
    }

    /// Programme airing between two whole hours on [`fixture_day`].
    pub fn slot(title: &str, from_hour: u32, to_hour: u32) -> Programme {
        Programme::new(title, at(from_hour, 0), at(to_hour, 0))
            .unwrap_or_else(|e| panic!("invalid fixture slot {}: {}", title, e))
    }

    /// `CCTV-1` with "A" at 09:00-10:00 and "B" at 10:00-11:00.
    pub fn morning_entry() -> GuideEntry {
        GuideEntry::new(["CCTV-1"], vec![slot("A", 9, 10), slot("B", 10, 11)])
    }

    /// A full day of hourly programmes for `channel`, starting at `day_start`.
    pub fn example_entry(channel: &Channel, day_start: Timestamp) -> GuideEntry {
        let programmes = (0..24)
            .filter_map(|hour| {
                let start_at = day_start + Duration::hours(hour);
                Programme::new(
                    format!("{} {:02}:00", channel.name, hour),
                    start_at,
                    start_at + Duration::hours(1),
                )
                .ok()
            })
            .collect();
        GuideEntry::new([channel.identity()], programmes)
    }

    /// A guide set holding [`example_entry`] for each channel, in order.
    pub fn example_guide_set(channels: &[Channel], day_start: Timestamp) -> GuideSet {
        channels
            .iter()
            .map(|channel| example_entry(channel, day_start))
            .collect()
    }

    /// `count` channels named `Channel-0`, `Channel-1`, ...
    pub fn numbered_channels(count: usize) -> Vec<Channel> {
        (0..count)
            .map(|i| Channel::new(format!("Channel-{}", i)))
            .collect()
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for guide-specific validation.

    use super::*;

    /// Assert that a GuideResult is a Validation error.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &GuideResult<T>) {
        match result {
            Err(GuideError::Validation(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    /// Assert that a GuideResult is a Config error.
    #[track_caller]
    pub fn assert_config_error<T: std::fmt::Debug>(result: &GuideResult<T>) {
        match result {
            Err(GuideError::Config(_)) => {}
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    /// Assert that the selected programme has `title` and `airing`.
    #[track_caller]
    pub fn assert_recent(recent: Option<&RecentProgramme>, title: &str, airing: Airing) {
        match recent {
            Some(recent) => {
                assert_eq!(recent.current.title(), title, "Wrong programme selected");
                assert_eq!(recent.airing, airing, "Wrong airing state for {}", title);
            }
            None => panic!("Expected programme {} ({:?}), got none", title, airing),
        }
    }

    /// Assert that programmes are ordered by start time.
    #[track_caller]
    pub fn assert_ordered(entry: &GuideEntry) {
        for pair in entry.programmes().windows(2) {
            assert!(
                pair[0].start_at() <= pair[1].start_at(),
                "Programme {} starts after {}",
                pair[0].title(),
                pair[1].title()
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
