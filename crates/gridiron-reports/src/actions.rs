//! `ReportAction` implementations — the glue between provider clients, view
//! computations and formatters. Each action fetches what it needs, computes,
//! and returns a payload; delivery is the poll loop's job.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use gridiron_core::payload::ReportPayload;
use gridiron_providers::models::{LeagueUser, Matchup, Roster, WeekStats};
use gridiron_providers::{SleeperClient, SportsDataClient};
use gridiron_scheduler::{ActionError, ReportAction};

use crate::format;
use crate::view;

/// Everything the week-report actions share: the two clients and the league
/// tuning knobs. One context is built at startup and cloned into each job.
pub struct ReportContext {
    pub sleeper: Arc<SleeperClient>,
    pub sportsdata: Arc<SportsDataClient>,
    /// Season identifier the stats endpoint is keyed by.
    pub season: String,
    pub scoring_key: String,
    pub close_num: f64,
    pub playoff_teams: usize,
}

/// The week's league data in one bundle, fetched once per action run.
struct WeekData {
    week: u32,
    users: Vec<LeagueUser>,
    rosters: Vec<Roster>,
    matchups: Vec<Matchup>,
    stats: WeekStats,
}

impl ReportContext {
    async fn fetch_week(&self) -> Result<WeekData, ActionError> {
        let week = self.sportsdata.current_week().await?;
        let users = self.sleeper.users().await?;
        let rosters = self.sleeper.rosters().await?;
        let matchups = self.sleeper.matchups(week).await?;
        let stats = self.sleeper.week_stats(&self.season, week).await?;
        debug!(week, matchups = matchups.len(), "week data fetched");
        Ok(WeekData {
            week,
            users,
            rosters,
            matchups,
            stats,
        })
    }

    fn scoreboards(&self, data: &WeekData) -> Vec<view::ScoreboardEntry> {
        view::scoreboards(
            &data.users,
            &data.rosters,
            &data.matchups,
            &data.stats,
            &self.scoring_key,
        )
    }
}

/// Thursday pairings preview.
pub struct MatchupsReport(pub Arc<ReportContext>);

#[async_trait]
impl ReportAction for MatchupsReport {
    async fn produce(&self) -> Result<ReportPayload, ActionError> {
        let data = self.0.fetch_week().await?;
        let boards = self.0.scoreboards(&data);
        Ok(ReportPayload::text(format::matchups_message(
            data.week, &boards,
        )))
    }
}

/// Current scores (Friday and Monday mornings).
pub struct ScoresReport(pub Arc<ReportContext>);

#[async_trait]
impl ReportAction for ScoresReport {
    async fn produce(&self) -> Result<ReportPayload, ActionError> {
        let data = self.0.fetch_week().await?;
        let boards = self.0.scoreboards(&data);
        Ok(ReportPayload::text(format::scores_message(&boards)))
    }
}

/// Sunday-night nail-biters.
pub struct CloseGamesReport(pub Arc<ReportContext>);

#[async_trait]
impl ReportAction for CloseGamesReport {
    async fn produce(&self) -> Result<ReportPayload, ActionError> {
        let data = self.0.fetch_week().await?;
        let boards = self.0.scoreboards(&data);
        let close = view::close_games(&boards, self.0.close_num);
        Ok(ReportPayload::text(format::close_games_message(&close)))
    }
}

/// Tuesday standings table.
pub struct StandingsReport(pub Arc<ReportContext>);

#[async_trait]
impl ReportAction for StandingsReport {
    async fn produce(&self) -> Result<ReportPayload, ActionError> {
        let users = self.0.sleeper.users().await?;
        let rosters = self.0.sleeper.rosters().await?;
        let rows = view::standings(&users, &rosters);
        Ok(ReportPayload::text(format::standings_message(
            &rows,
            self.0.playoff_teams,
        )))
    }
}

/// Highest/lowest scorer, biggest bench, negative starters.
pub struct BestAndWorstReport(pub Arc<ReportContext>);

#[async_trait]
impl ReportAction for BestAndWorstReport {
    async fn produce(&self) -> Result<ReportPayload, ActionError> {
        let data = self.0.fetch_week().await?;
        if data.matchups.is_empty() {
            return Err(ActionError::MissingData(format!(
                "no matchups for week {}",
                data.week
            )));
        }
        let boards = self.0.scoreboards(&data);
        let bench = view::bench_points(&data.users, &data.rosters, &data.matchups, &data.stats);
        // The player map is only needed here, and it is big — fetch last.
        let players = self.0.sleeper.players().await?;
        let negatives = view::negative_starters(
            &data.users,
            &data.rosters,
            &data.matchups,
            &data.stats,
            &players,
        );

        Ok(ReportPayload::text(format::best_and_worst_message(
            view::highest_score(&boards).as_ref(),
            view::lowest_score(&boards).as_ref(),
            view::highest_bench(&bench).as_ref(),
            &negatives,
        )))
    }
}

/// Daily pre-season countdown to the draft. The draft instant comes from the
/// resolved season calendar, so this action needs no fetch at all.
pub struct DraftReminderReport {
    pub draft_date: DateTime<Tz>,
    pub tz: Tz,
}

#[async_trait]
impl ReportAction for DraftReminderReport {
    async fn produce(&self) -> Result<ReportPayload, ActionError> {
        let now = Utc::now().with_timezone(&self.tz);
        Ok(ReportPayload::text(format::draft_reminder_message(
            self.draft_date,
            now,
        )))
    }
}
