//! GuideEntry - one channel's guide: name aliases plus ordered programmes.

use crate::{
    Airing, GuideResult, Programme, ProgrammeFallback, RecentProgramme, Timestamp,
    ValidationError,
};
use serde::{Deserialize, Serialize};

/// One channel's programme guide.
///
/// `programmes` must be ordered by start time; [`GuideEntry::new`] trusts
/// the producer, [`GuideEntry::checked`] verifies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideEntry {
    channel_aliases: Vec<String>,
    programmes: Vec<Programme>,
}

impl GuideEntry {
    pub fn new<A, S>(aliases: A, programmes: Vec<Programme>) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channel_aliases: aliases.into_iter().map(Into::into).collect(),
            programmes,
        }
    }

    /// Like [`GuideEntry::new`], but rejects programmes not ordered by start time.
    pub fn checked<A, S>(aliases: A, programmes: Vec<Programme>) -> GuideResult<Self>
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, pair) in programmes.windows(2).enumerate() {
            if pair[1].start_at() < pair[0].start_at() {
                return Err(ValidationError::UnorderedProgrammes {
                    index: index + 1,
                    start_at: pair[1].start_at(),
                    previous_start_at: pair[0].start_at(),
                }
                .into());
            }
        }
        Ok(Self::new(aliases, programmes))
    }

    pub fn aliases(&self) -> &[String] {
        &self.channel_aliases
    }

    pub fn programmes(&self) -> &[Programme] {
        &self.programmes
    }

    /// Iterate programmes in airtime order.
    pub fn iter(&self) -> std::slice::Iter<'_, Programme> {
        self.programmes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.programmes.is_empty()
    }

    /// True if any alias equals `identity`, ignoring case.
    pub fn matches(&self, identity: &str) -> bool {
        self.channel_aliases
            .iter()
            .any(|alias| eq_ignore_case(alias, identity))
    }

    /// Select the programme relevant at `now`.
    ///
    /// A programme whose airtime contains `now` always wins. Otherwise the
    /// result depends on `fallback`; see [`ProgrammeFallback`]. An entry
    /// without programmes yields `None` under every policy.
    pub fn recent_programme(
        &self,
        now: Timestamp,
        fallback: ProgrammeFallback,
    ) -> Option<RecentProgramme> {
        let last = self.programmes.len().checked_sub(1)?;

        let (index, airing) = match self.programmes.iter().position(|p| p.is_live_at(now)) {
            Some(index) => (index, Airing::OnAir),
            None => match fallback {
                ProgrammeFallback::CurrentOnly => return None,
                ProgrammeFallback::Nearest => {
                    match self.programmes.iter().position(|p| p.is_upcoming_at(now)) {
                        Some(index) => (index, Airing::Upcoming),
                        None => (last, Airing::Ended),
                    }
                }
            },
        };

        Some(RecentProgramme {
            current: self.programmes[index].clone(),
            next: self.programmes.get(index + 1).cloned(),
            airing,
        })
    }

    /// Programmes whose airtime overlaps `[from, to)`, in airtime order.
    pub fn programmes_between(&self, from: Timestamp, to: Timestamp) -> Vec<&Programme> {
        self.programmes
            .iter()
            .filter(|p| p.overlaps(from, to))
            .collect()
    }
}

impl<'a> IntoIterator for &'a GuideEntry {
    type Item = &'a Programme;
    type IntoIter = std::slice::Iter<'a, Programme>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Case-insensitive string equality without allocating.
///
/// Characters are compared one to one after folding each through its
/// uppercase and then lowercase form, so variants that only agree in
/// uppercase (final sigma `ς` and `σ`) are equal too.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars().map(fold_case).eq(b.chars().map(fold_case))
}

fn fold_case(c: char) -> char {
    let upper = single_char(c.to_uppercase()).unwrap_or(c);
    single_char(upper.to_lowercase()).unwrap_or(upper)
}

// Multi-char expansions (`ß` -> `SS`) leave the character unchanged.
fn single_char(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GuideError;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
    }

    fn slot(title: &str, from: u32, to: u32) -> Programme {
        Programme::new(title, at(from, 0), at(to, 0)).unwrap()
    }

    fn morning() -> GuideEntry {
        GuideEntry::new(["CCTV-1"], vec![slot("A", 9, 10), slot("B", 10, 11)])
    }

    #[test]
    fn test_matches_ignores_case() {
        let entry = morning();
        assert!(entry.matches("cctv-1"));
        assert!(entry.matches("Cctv-1"));
        assert!(entry.matches("CCTV-1"));
        assert!(!entry.matches("CCTV-2"));
    }

    #[test]
    fn test_matches_any_alias() {
        let entry = GuideEntry::new(["CCTV1", "CCTV-1 综合"], vec![]);
        assert!(entry.matches("cctv-1 综合"));
        assert!(entry.matches("cctv1"));
    }

    #[test]
    fn test_matches_non_ascii_case() {
        let entry = GuideEntry::new(["ÉTOILE"], vec![]);
        assert!(entry.matches("étoile"));
    }

    #[test]
    fn test_matches_case_variants_equal_only_in_uppercase() {
        let entry = GuideEntry::new(["ΚΑΝΑΛΙ Σ"], vec![]);
        assert!(entry.matches("καναλι σ"));
        assert!(entry.matches("καναλι ς"));
        assert!(eq_ignore_case("ς", "σ"));
        assert!(eq_ignore_case("ς", "Σ"));
        assert!(eq_ignore_case("Kanal ς", "KANAL σ"));
        assert!(!eq_ignore_case("ς", "s"));
        assert!(!eq_ignore_case("σ", "σσ"));
    }

    #[test]
    fn test_multi_char_expansions_compare_verbatim() {
        assert!(eq_ignore_case("Straße", "STRAßE"));
        assert!(!eq_ignore_case("Straße", "STRASSE"));
    }

    #[test]
    fn test_no_aliases_never_matches() {
        let entry = GuideEntry::new(Vec::<String>::new(), vec![slot("A", 9, 10)]);
        assert!(!entry.matches(""));
        assert!(!entry.matches("CCTV-1"));
    }

    #[test]
    fn test_recent_programme_on_air() {
        let entry = morning();

        let recent = entry
            .recent_programme(at(10, 30), ProgrammeFallback::CurrentOnly)
            .unwrap();
        assert_eq!(recent.current.title(), "B");
        assert_eq!(recent.airing, Airing::OnAir);
        assert!(recent.next.is_none());

        let recent = entry
            .recent_programme(at(9, 30), ProgrammeFallback::CurrentOnly)
            .unwrap();
        assert_eq!(recent.current.title(), "A");
        assert_eq!(recent.next.as_ref().map(|p| p.title()), Some("B"));
        assert!(recent.is_on_air());
    }

    #[test]
    fn test_recent_programme_boundary_belongs_to_later_slot() {
        let recent = morning()
            .recent_programme(at(10, 0), ProgrammeFallback::CurrentOnly)
            .unwrap();
        assert_eq!(recent.current.title(), "B");
    }

    #[test]
    fn test_before_all_slots_current_only() {
        assert!(morning()
            .recent_programme(at(8, 0), ProgrammeFallback::CurrentOnly)
            .is_none());
    }

    #[test]
    fn test_before_all_slots_nearest() {
        let recent = morning()
            .recent_programme(at(8, 0), ProgrammeFallback::Nearest)
            .unwrap();
        assert_eq!(recent.current.title(), "A");
        assert_eq!(recent.airing, Airing::Upcoming);
        assert_eq!(recent.next.as_ref().map(|p| p.title()), Some("B"));
    }

    #[test]
    fn test_after_all_slots() {
        let entry = morning();
        assert!(entry
            .recent_programme(at(12, 0), ProgrammeFallback::CurrentOnly)
            .is_none());

        let recent = entry
            .recent_programme(at(12, 0), ProgrammeFallback::Nearest)
            .unwrap();
        assert_eq!(recent.current.title(), "B");
        assert_eq!(recent.airing, Airing::Ended);
        assert!(recent.next.is_none());
    }

    #[test]
    fn test_gap_between_slots() {
        let entry = GuideEntry::new(["X"], vec![slot("A", 9, 10), slot("C", 12, 13)]);
        assert!(entry
            .recent_programme(at(11, 0), ProgrammeFallback::CurrentOnly)
            .is_none());

        let recent = entry
            .recent_programme(at(11, 0), ProgrammeFallback::Nearest)
            .unwrap();
        assert_eq!(recent.current.title(), "C");
        assert_eq!(recent.airing, Airing::Upcoming);
    }

    #[test]
    fn test_empty_programmes_yield_none() {
        let entry = GuideEntry::new(["X"], vec![]);
        for fallback in [ProgrammeFallback::CurrentOnly, ProgrammeFallback::Nearest] {
            assert!(entry.recent_programme(at(9, 0), fallback).is_none());
        }
    }

    #[test]
    fn test_checked_rejects_unordered() {
        let err = GuideEntry::checked(["X"], vec![slot("B", 10, 11), slot("A", 9, 10)]).unwrap_err();
        assert!(matches!(
            err,
            GuideError::Validation(ValidationError::UnorderedProgrammes { index: 1, .. })
        ));
        assert!(GuideEntry::checked(["X"], vec![slot("A", 9, 10), slot("B", 10, 11)]).is_ok());
    }

    #[test]
    fn test_programmes_between() {
        let entry = GuideEntry::new(
            ["X"],
            vec![slot("A", 9, 10), slot("B", 10, 11), slot("C", 11, 12)],
        );
        let titles: Vec<_> = entry
            .programmes_between(at(9, 30), at(11, 0))
            .into_iter()
            .map(Programme::title)
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
