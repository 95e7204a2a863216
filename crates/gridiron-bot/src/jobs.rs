//! The job table — which report fires when, in which phase.

use std::sync::Arc;

use chrono::{DateTime, Weekday};
use chrono_tz::Tz;

use gridiron_reports::actions::{
    BestAndWorstReport, CloseGamesReport, DraftReminderReport, MatchupsReport, ScoresReport,
    StandingsReport,
};
use gridiron_reports::ReportContext;
use gridiron_scheduler::rule::at;
use gridiron_scheduler::{Phase, RecurrenceRule, SchedulerState, SeasonCalendar};

/// Build the full job table. Times are local to the configured zone.
///
/// The pre-season collection holds the draft countdown; the season
/// collection (shared by the post-draft and regular-season phases) holds the
/// weekly report cycle. Post-season and off-season collections stay empty.
pub fn register_jobs(
    state: &mut SchedulerState,
    ctx: &Arc<ReportContext>,
    calendar: &SeasonCalendar,
    tz: Tz,
    now: DateTime<Tz>,
) {
    state.register(
        Phase::PreSeason,
        "draft-reminder",
        RecurrenceRule::Daily { at: at(18, 0) },
        Box::new(DraftReminderReport {
            draft_date: calendar.draft_date,
            tz,
        }),
        now,
    );

    let weekly = |weekday, h, m| RecurrenceRule::Weekly {
        weekday,
        at: at(h, m),
    };

    state.register(
        Phase::RegularSeason,
        "week-matchups",
        weekly(Weekday::Thu, 19, 0),
        Box::new(MatchupsReport(Arc::clone(ctx))),
        now,
    );
    state.register(
        Phase::RegularSeason,
        "thursday-night-scores",
        weekly(Weekday::Fri, 10, 0),
        Box::new(ScoresReport(Arc::clone(ctx))),
        now,
    );
    state.register(
        Phase::RegularSeason,
        "close-games",
        weekly(Weekday::Sun, 22, 0),
        Box::new(CloseGamesReport(Arc::clone(ctx))),
        now,
    );
    state.register(
        Phase::RegularSeason,
        "sunday-night-scores",
        weekly(Weekday::Mon, 10, 0),
        Box::new(ScoresReport(Arc::clone(ctx))),
        now,
    );
    state.register(
        Phase::RegularSeason,
        "standings",
        weekly(Weekday::Tue, 11, 0),
        Box::new(StandingsReport(Arc::clone(ctx))),
        now,
    );
    state.register(
        Phase::RegularSeason,
        "best-and-worst",
        weekly(Weekday::Tue, 11, 1),
        Box::new(BestAndWorstReport(Arc::clone(ctx))),
        now,
    );
}
