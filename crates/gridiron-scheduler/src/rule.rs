//! Recurrence rules — daily or weekly at a local time of day.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;

/// Defines when a job recurs. Times are local to the configured zone and
/// DST-correct: a daily 18:00 rule fires at 18:00 wall-clock year round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceRule {
    /// Every day at the given time.
    Daily { at: NaiveTime },

    /// Every instance of the given weekday at the given time.
    Weekly { weekday: Weekday, at: NaiveTime },
}

impl RecurrenceRule {
    /// The first scheduled instant strictly after `after`.
    ///
    /// A local time that does not exist on a given day (spring-forward gap)
    /// is skipped to the rule's next day; an ambiguous time (fall-back fold)
    /// resolves to the earlier instant.
    pub fn next_occurrence(&self, after: DateTime<Tz>) -> DateTime<Tz> {
        let tz = after.timezone();
        match self {
            RecurrenceRule::Daily { at } => {
                let mut date = after.date_naive();
                loop {
                    if let Some(candidate) = local_instant(date, *at, tz) {
                        if candidate > after {
                            return candidate;
                        }
                    }
                    date += Duration::days(1);
                }
            }
            RecurrenceRule::Weekly { weekday, at } => {
                let days_ahead = (weekday.num_days_from_monday() as i64
                    - after.weekday().num_days_from_monday() as i64)
                    .rem_euclid(7);
                let mut date = after.date_naive() + Duration::days(days_ahead);
                loop {
                    if let Some(candidate) = local_instant(date, *at, tz) {
                        if candidate > after {
                            return candidate;
                        }
                    }
                    date += Duration::days(7);
                }
            }
        }
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrenceRule::Daily { at } => write!(f, "daily at {}", at.format("%H:%M")),
            RecurrenceRule::Weekly { weekday, at } => {
                write!(f, "{} at {}", weekday, at.format("%H:%M"))
            }
        }
    }
}

fn local_instant(date: NaiveDate, at: NaiveTime, tz: Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(at)).earliest()
}

/// Shorthand for `NaiveTime` literals in job tables.
pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time of day")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;

    fn now(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        Chicago.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn daily_rule_fires_later_today_then_tomorrow() {
        let rule = RecurrenceRule::Daily { at: at(18, 0) };

        let morning = now(2021, 9, 10, 9, 0);
        assert_eq!(rule.next_occurrence(morning), now(2021, 9, 10, 18, 0));

        let evening = now(2021, 9, 10, 18, 0);
        assert_eq!(rule.next_occurrence(evening), now(2021, 9, 11, 18, 0));
    }

    #[test]
    fn weekly_rule_wraps_to_next_week() {
        // 2021-09-09 is a Thursday.
        let rule = RecurrenceRule::Weekly {
            weekday: Weekday::Thu,
            at: at(19, 0),
        };

        let wednesday = now(2021, 9, 8, 12, 0);
        assert_eq!(rule.next_occurrence(wednesday), now(2021, 9, 9, 19, 0));

        let thursday_night = now(2021, 9, 9, 20, 0);
        assert_eq!(rule.next_occurrence(thursday_night), now(2021, 9, 16, 19, 0));

        let exactly_at = now(2021, 9, 9, 19, 0);
        assert_eq!(rule.next_occurrence(exactly_at), now(2021, 9, 16, 19, 0));
    }

    #[test]
    fn spring_forward_gap_skips_to_next_day() {
        // 2021-03-14 02:30 does not exist in Chicago (02:00 -> 03:00).
        let rule = RecurrenceRule::Daily { at: at(2, 30) };
        let before = now(2021, 3, 13, 12, 0);
        assert_eq!(rule.next_occurrence(before), now(2021, 3, 15, 2, 30));
    }

    #[test]
    fn occurrences_are_strictly_increasing() {
        let rule = RecurrenceRule::Daily { at: at(10, 0) };
        let mut t = now(2021, 9, 1, 0, 0);
        for _ in 0..14 {
            let next = rule.next_occurrence(t);
            assert!(next > t);
            t = next;
        }
        assert_eq!(t, now(2021, 9, 14, 10, 0));
    }
}
