//! Season calendar resolution — runs once per process, before the poll loop.
//!
//! Four anchors come from the schedule provider (pre-season opener, season
//! opener, and two fixed offsets into the regular-season game list that mark
//! the post-season and off-season starts); the draft anchor comes from the
//! league provider's draft metadata.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::info;

use gridiron_providers::models::{Draft, ScheduledGame};
use gridiron_providers::sportsdata::SeasonSegment;
use gridiron_providers::{ProviderError, SleeperClient, SportsDataClient};

/// Index of the pre-season opener in the `PRE` segment game list.
pub const PRE_SEASON_GAME_INDEX: usize = 0;
/// Index of the regular-season opener.
pub const SEASON_OPENER_GAME_INDEX: usize = 0;
/// First game after the regular season ends (week 18 complete).
pub const POST_SEASON_GAME_INDEX: usize = 240;
/// First game after the playoffs end.
pub const OFF_SEASON_GAME_INDEX: usize = 303;

/// Wire-level date format of the schedule provider (naive local timestamp).
const GAME_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The five calendar anchors for one season, all in the configured zone.
///
/// Resolved once at startup, immutable for the life of the process. The
/// strict ordering
/// `pre_season_start < draft_date < season_start < post_season_start < off_season_start`
/// is validated at construction.
#[derive(Debug, Clone)]
pub struct SeasonCalendar {
    /// Season identifier, e.g. `"2021"`.
    pub season: String,
    pub pre_season_start: DateTime<Tz>,
    pub draft_date: DateTime<Tz>,
    pub season_start: DateTime<Tz>,
    pub post_season_start: DateTime<Tz>,
    pub off_season_start: DateTime<Tz>,
}

impl SeasonCalendar {
    /// Build a calendar, rejecting anchors that are not strictly increasing.
    pub fn new(
        season: String,
        pre_season_start: DateTime<Tz>,
        draft_date: DateTime<Tz>,
        season_start: DateTime<Tz>,
        post_season_start: DateTime<Tz>,
        off_season_start: DateTime<Tz>,
    ) -> Result<Self, ProviderError> {
        let anchors = [
            ("pre_season_start", pre_season_start),
            ("draft_date", draft_date),
            ("season_start", season_start),
            ("post_season_start", post_season_start),
            ("off_season_start", off_season_start),
        ];
        for pair in anchors.windows(2) {
            let (earlier_name, earlier) = &pair[0];
            let (later_name, later) = &pair[1];
            if earlier >= later {
                return Err(ProviderError::MalformedSchedule(format!(
                    "calendar anchors out of order: {earlier_name} ({earlier}) >= {later_name} ({later})"
                )));
            }
        }
        Ok(Self {
            season,
            pre_season_start,
            draft_date,
            season_start,
            post_season_start,
            off_season_start,
        })
    }
}

/// The narrow slice of the schedule provider the resolver needs.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn current_season(&self) -> Result<String, ProviderError>;
    async fn schedule(
        &self,
        season: &str,
        segment: SeasonSegment,
    ) -> Result<Vec<ScheduledGame>, ProviderError>;
}

#[async_trait]
impl ScheduleSource for SportsDataClient {
    async fn current_season(&self) -> Result<String, ProviderError> {
        SportsDataClient::current_season(self).await
    }

    async fn schedule(
        &self,
        season: &str,
        segment: SeasonSegment,
    ) -> Result<Vec<ScheduledGame>, ProviderError> {
        SportsDataClient::schedule(self, season, segment).await
    }
}

/// The narrow slice of the league provider the resolver needs.
#[async_trait]
pub trait DraftSource: Send + Sync {
    async fn drafts(&self) -> Result<Vec<Draft>, ProviderError>;
}

#[async_trait]
impl DraftSource for SleeperClient {
    async fn drafts(&self) -> Result<Vec<Draft>, ProviderError> {
        SleeperClient::drafts(self).await
    }
}

/// Resolve the current season's calendar from the two providers.
///
/// Any non-success upstream status or malformed schedule is returned to the
/// caller — there is no valid phase without a calendar, so resolution
/// failures are startup-fatal (the binary wraps this in bounded retry).
pub async fn resolve_calendar<S, L>(
    schedule: &S,
    league: &L,
    tz: Tz,
) -> Result<SeasonCalendar, ProviderError>
where
    S: ScheduleSource,
    L: DraftSource,
{
    let season = schedule.current_season().await?;

    let pre = schedule.schedule(&season, SeasonSegment::Pre).await?;
    let pre_season_start = parse_game_date(&pre, PRE_SEASON_GAME_INDEX, tz)?;

    // One regular-season fetch serves all three offsets into it.
    let regular = schedule.schedule(&season, SeasonSegment::Regular).await?;
    let season_start = parse_game_date(&regular, SEASON_OPENER_GAME_INDEX, tz)?;
    let post_season_start = parse_game_date(&regular, POST_SEASON_GAME_INDEX, tz)?;
    let off_season_start = parse_game_date(&regular, OFF_SEASON_GAME_INDEX, tz)?;

    let drafts = league.drafts().await?;
    let draft_ms = drafts
        .first()
        .and_then(|d| d.start_time)
        .ok_or_else(|| ProviderError::MalformedSchedule("league has no scheduled draft".into()))?;
    let draft_date = Utc
        .timestamp_millis_opt(draft_ms)
        .single()
        .ok_or_else(|| {
            ProviderError::MalformedSchedule(format!("draft start_time {draft_ms} is out of range"))
        })?
        .with_timezone(&tz);

    let calendar = SeasonCalendar::new(
        season,
        pre_season_start,
        draft_date,
        season_start,
        post_season_start,
        off_season_start,
    )?;

    info!(
        season = %calendar.season,
        pre_season = %calendar.pre_season_start,
        draft = %calendar.draft_date,
        season_start = %calendar.season_start,
        post_season = %calendar.post_season_start,
        off_season = %calendar.off_season_start,
        "season calendar resolved"
    );
    Ok(calendar)
}

/// Extract and parse one game's date, interpreted in the configured zone.
fn parse_game_date(games: &[ScheduledGame], index: usize, tz: Tz) -> Result<DateTime<Tz>, ProviderError> {
    let game = games.get(index).ok_or_else(|| {
        ProviderError::MalformedSchedule(format!(
            "game index {index} out of range ({} games in segment)",
            games.len()
        ))
    })?;
    let raw = game.date.as_deref().ok_or_else(|| {
        ProviderError::MalformedSchedule(format!("game at index {index} has no date"))
    })?;
    let naive = NaiveDateTime::parse_from_str(raw, GAME_DATE_FORMAT).map_err(|e| {
        ProviderError::MalformedSchedule(format!("unparsable game date '{raw}': {e}"))
    })?;
    // earliest() picks the pre-transition instant on a DST fold and skips
    // forward over a spring gap.
    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        ProviderError::MalformedSchedule(format!("game date '{raw}' does not exist in zone {tz}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;

    fn game(date: &str) -> ScheduledGame {
        ScheduledGame {
            date: Some(date.to_string()),
            week: None,
        }
    }

    struct FakeSchedule {
        pre: Vec<ScheduledGame>,
        regular: Vec<ScheduledGame>,
    }

    #[async_trait]
    impl ScheduleSource for FakeSchedule {
        async fn current_season(&self) -> Result<String, ProviderError> {
            Ok("2021".to_string())
        }

        async fn schedule(
            &self,
            _season: &str,
            segment: SeasonSegment,
        ) -> Result<Vec<ScheduledGame>, ProviderError> {
            Ok(match segment {
                SeasonSegment::Pre => self.pre.clone(),
                _ => self.regular.clone(),
            })
        }
    }

    struct FakeLeague {
        start_time: Option<i64>,
    }

    #[async_trait]
    impl DraftSource for FakeLeague {
        async fn drafts(&self) -> Result<Vec<Draft>, ProviderError> {
            Ok(vec![Draft {
                draft_id: "d1".to_string(),
                status: Some("complete".to_string()),
                start_time: self.start_time,
            }])
        }
    }

    fn fake_regular() -> Vec<ScheduledGame> {
        let mut games = vec![game("2021-09-09T19:20:00")];
        games.extend(std::iter::repeat_with(|| game("2021-10-01T12:00:00")).take(239));
        games.push(game("2022-01-15T15:30:00")); // index 240
        games.extend(std::iter::repeat_with(|| game("2022-01-20T12:00:00")).take(62));
        games.push(game("2022-02-15T00:00:00")); // index 303
        games
    }

    #[tokio::test]
    async fn resolves_all_five_anchors() {
        let schedule = FakeSchedule {
            pre: vec![game("2021-08-12T19:00:00")],
            regular: fake_regular(),
        };
        // 2021-08-28 00:00:00 UTC
        let league = FakeLeague {
            start_time: Some(1_630_108_800_000),
        };

        let cal = resolve_calendar(&schedule, &league, Chicago).await.unwrap();
        assert_eq!(cal.season, "2021");
        assert_eq!(
            cal.pre_season_start,
            Chicago.with_ymd_and_hms(2021, 8, 12, 19, 0, 0).unwrap()
        );
        assert_eq!(
            cal.season_start,
            Chicago.with_ymd_and_hms(2021, 9, 9, 19, 20, 0).unwrap()
        );
        assert!(cal.pre_season_start < cal.draft_date);
        assert!(cal.draft_date < cal.season_start);
        assert!(cal.post_season_start < cal.off_season_start);
    }

    #[tokio::test]
    async fn short_segment_is_malformed() {
        let schedule = FakeSchedule {
            pre: vec![game("2021-08-12T19:00:00")],
            regular: vec![game("2021-09-09T19:20:00")], // nowhere near index 240
        };
        let league = FakeLeague {
            start_time: Some(1_630_108_800_000),
        };

        let err = resolve_calendar(&schedule, &league, Chicago).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedSchedule(_)), "{err}");
        assert!(err.to_string().contains("out of range"));
    }

    #[tokio::test]
    async fn missing_draft_time_is_malformed() {
        let schedule = FakeSchedule {
            pre: vec![game("2021-08-12T19:00:00")],
            regular: fake_regular(),
        };
        let league = FakeLeague { start_time: None };

        let err = resolve_calendar(&schedule, &league, Chicago).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedSchedule(_)), "{err}");
    }

    #[test]
    fn out_of_order_anchors_rejected() {
        let at = |y, m, d| Chicago.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        let err = SeasonCalendar::new(
            "2021".to_string(),
            at(2021, 8, 1),
            at(2021, 8, 20),
            at(2021, 8, 15), // season start before the draft
            at(2021, 12, 29),
            at(2022, 2, 15),
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn unparsable_date_is_malformed() {
        let games = vec![game("12 Aug 2021")];
        let err = parse_game_date(&games, 0, Chicago).unwrap_err();
        assert!(err.to_string().contains("unparsable"));
    }
}
