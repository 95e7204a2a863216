//! Phase selection — a pure decision table over the season calendar.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::calendar::SeasonCalendar;

/// The five seasonal phases. Exactly one (or none) is active at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreSeason,
    /// Between the draft and the season opener. Shares its job collection
    /// with [`Phase::RegularSeason`].
    PostDraft,
    RegularSeason,
    PostSeason,
    OffSeason,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::PreSeason => "pre-season",
            Phase::PostDraft => "post-draft",
            Phase::RegularSeason => "regular-season",
            Phase::PostSeason => "post-season",
            Phase::OffSeason => "off-season",
        };
        write!(f, "{s}")
    }
}

/// Select the active phase for `now`.
///
/// Pure and total. Intervals are evaluated in calendar order with bounds
/// inclusive on both ends, first match wins — so an instant exactly on a
/// shared anchor belongs to the EARLIER phase (`now == draft_date` is
/// `PreSeason`, not `PostDraft`).
///
/// Returns `None` before `pre_season_start` and after
/// `pre_season_start + 365 days` (no new calendar resolved yet); such ticks
/// are silent no-ops, not errors.
pub fn select_phase(now: DateTime<Tz>, calendar: &SeasonCalendar) -> Option<Phase> {
    let c = calendar;
    let wraparound = c.pre_season_start + Duration::days(365);

    if c.pre_season_start <= now && now <= c.draft_date {
        Some(Phase::PreSeason)
    } else if c.draft_date <= now && now <= c.season_start {
        Some(Phase::PostDraft)
    } else if c.season_start <= now && now <= c.post_season_start {
        Some(Phase::RegularSeason)
    } else if c.post_season_start <= now && now <= c.off_season_start {
        Some(Phase::PostSeason)
    } else if c.off_season_start <= now && now <= wraparound {
        Some(Phase::OffSeason)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;
    use chrono_tz::Tz;

    fn calendar() -> SeasonCalendar {
        let at = |y, m, d, h| Chicago.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        SeasonCalendar::new(
            "2021".to_string(),
            at(2021, 8, 1, 0),
            at(2021, 8, 20, 19),
            at(2021, 9, 8, 19),
            at(2021, 12, 29, 12),
            at(2022, 2, 15, 0),
        )
        .unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Tz> {
        Chicago.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn each_interval_maps_to_its_phase() {
        let c = calendar();
        assert_eq!(select_phase(at(2021, 8, 10, 12), &c), Some(Phase::PreSeason));
        assert_eq!(select_phase(at(2021, 8, 25, 12), &c), Some(Phase::PostDraft));
        assert_eq!(select_phase(at(2021, 9, 10, 12), &c), Some(Phase::RegularSeason));
        assert_eq!(select_phase(at(2022, 1, 10, 12), &c), Some(Phase::PostSeason));
        assert_eq!(select_phase(at(2022, 3, 1, 12), &c), Some(Phase::OffSeason));
    }

    #[test]
    fn shared_boundary_belongs_to_earlier_phase() {
        let c = calendar();
        // Documented tie-break: first matching interval wins.
        assert_eq!(select_phase(c.draft_date, &c), Some(Phase::PreSeason));
        assert_eq!(select_phase(c.season_start, &c), Some(Phase::PostDraft));
        assert_eq!(select_phase(c.post_season_start, &c), Some(Phase::RegularSeason));
        assert_eq!(select_phase(c.off_season_start, &c), Some(Phase::PostSeason));
    }

    #[test]
    fn open_ends_have_no_phase() {
        let c = calendar();
        assert_eq!(select_phase(at(2021, 7, 15, 12), &c), None);
        // One year past the pre-season start, with no new calendar resolved.
        assert_eq!(select_phase(at(2022, 8, 15, 12), &c), None);
    }

    #[test]
    fn wraparound_end_is_inclusive() {
        let c = calendar();
        let wrap = c.pre_season_start + Duration::days(365);
        assert_eq!(select_phase(wrap, &c), Some(Phase::OffSeason));
        assert_eq!(select_phase(wrap + Duration::seconds(1), &c), None);
    }

    #[test]
    fn selection_is_idempotent() {
        let c = calendar();
        let now = at(2021, 9, 10, 18);
        assert_eq!(select_phase(now, &c), select_phase(now, &c));
    }
}
