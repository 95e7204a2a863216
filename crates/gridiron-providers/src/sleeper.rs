//! Sleeper league API client. No credential required — the whole read API
//! is public, keyed only by league ID.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::models::{BracketMatch, Draft, LeagueUser, Matchup, PlayerMap, Roster, WeekStats};
use crate::sportsdata::check_status;

const BASE_URL: &str = "https://api.sleeper.app/v1";

/// Client for one Sleeper league.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
    league_id: String,
}

impl SleeperClient {
    pub fn new(league_id: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(league_id, timeout, BASE_URL)
    }

    /// Same as [`new`](Self::new) with an overridable base URL (tests).
    pub fn with_base_url(league_id: &str, timeout: Duration, base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            league_id: league_id.to_string(),
        })
    }

    pub fn league_id(&self) -> &str {
        &self.league_id
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.get(&url).send().await?;
        check_status(&url, &resp)?;
        let value: T = resp.json().await?;
        debug!(%url, "sleeper fetch ok");
        Ok(value)
    }

    /// League members.
    pub async fn users(&self) -> Result<Vec<LeagueUser>> {
        self.get_json(&format!("/league/{}/users", self.league_id)).await
    }

    /// Roster records with win/loss settings.
    pub async fn rosters(&self) -> Result<Vec<Roster>> {
        self.get_json(&format!("/league/{}/rosters", self.league_id)).await
    }

    /// Both sides of every matchup for one week.
    pub async fn matchups(&self, week: u32) -> Result<Vec<Matchup>> {
        self.get_json(&format!("/league/{}/matchups/{}", self.league_id, week))
            .await
    }

    /// Playoff winners bracket.
    pub async fn winners_bracket(&self) -> Result<Vec<BracketMatch>> {
        self.get_json(&format!("/league/{}/winners_bracket", self.league_id))
            .await
    }

    /// All drafts for the league, most recent first.
    pub async fn drafts(&self) -> Result<Vec<Draft>> {
        self.get_json(&format!("/league/{}/drafts", self.league_id)).await
    }

    /// The full NFL player map. Large (~5 MB); fetch once per report, not per player.
    pub async fn players(&self) -> Result<PlayerMap> {
        self.get_json("/players/nfl").await
    }

    /// Per-player stat lines for one regular-season week.
    pub async fn week_stats(&self, season: &str, week: u32) -> Result<WeekStats> {
        self.get_json(&format!("/stats/nfl/regular/{}/{}", season, week))
            .await
    }
}
