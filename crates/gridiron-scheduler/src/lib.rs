//! `gridiron-scheduler` — the season-phase scheduler.
//!
//! # Overview
//!
//! At startup the [`calendar`] resolver turns two upstream queries into a
//! [`SeasonCalendar`]: five strictly increasing anchors for the current
//! season. The [`engine::PollLoop`] then ticks on a fixed period; every tick
//! it selects the active [`Phase`] from `now` and the calendar, and fires any
//! job in that phase's collection whose recurrence has come due — exactly
//! once per occurrence.
//!
//! # Phases
//!
//! | Interval                              | Phase          |
//! |---------------------------------------|----------------|
//! | pre-season start … draft date         | `PreSeason`    |
//! | draft date … season start             | `PostDraft`    |
//! | season start … post-season start      | `RegularSeason`|
//! | post-season start … off-season start  | `PostSeason`   |
//! | off-season start … pre-season + 365 d | `OffSeason`    |
//!
//! Outside all five intervals no phase is active and a tick is a silent
//! no-op. `PostDraft` and `RegularSeason` share one job collection.

pub mod calendar;
pub mod engine;
pub mod error;
pub mod job;
pub mod phase;
pub mod rule;

pub use calendar::SeasonCalendar;
pub use engine::PollLoop;
pub use error::ActionError;
pub use job::{Job, JobCollection, ReportAction, SchedulerState};
pub use phase::{select_phase, Phase};
pub use rule::RecurrenceRule;
