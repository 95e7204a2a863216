//! Wire models for the upstream APIs. Only the fields the reports consume
//! are declared; everything else in the responses is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sleeper league API
// ---------------------------------------------------------------------------

/// A member of the league (`GET /v1/league/{id}/users`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueUser {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

impl LeagueUser {
    /// Custom team name when the user set one, display name otherwise.
    pub fn team_name(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.team_name.as_deref())
            .unwrap_or(&self.display_name)
    }
}

/// A roster slot (`GET /v1/league/{id}/rosters`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: u64,
    /// `None` for orphaned rosters with no owner.
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub settings: RosterSettings,
}

/// Win/loss record and fantasy points. Sleeper splits points into an integer
/// part (`fpts`) and a hundredths part (`fpts_decimal`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub fpts: f64,
    #[serde(default)]
    pub fpts_decimal: Option<f64>,
}

impl RosterSettings {
    pub fn points(&self) -> f64 {
        self.fpts + self.fpts_decimal.unwrap_or(0.0) / 100.0
    }
}

/// One side of a weekly matchup (`GET /v1/league/{id}/matchups/{week}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    /// Pairs the two rosters playing each other. `None` during byes.
    #[serde(default)]
    pub matchup_id: Option<u64>,
    pub roster_id: u64,
    #[serde(default)]
    pub starters: Vec<String>,
    #[serde(default)]
    pub players: Vec<String>,
}

impl Matchup {
    /// Player IDs on the bench this week (players minus starters).
    pub fn bench(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| !self.starters.contains(p))
            .map(|p| p.as_str())
            .collect()
    }
}

/// One playoff pairing (`GET /v1/league/{id}/winners_bracket`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketMatch {
    /// Playoff round, 1-based.
    pub r: u32,
    /// Match number within the bracket.
    pub m: u32,
    #[serde(default)]
    pub t1: Option<u64>,
    #[serde(default)]
    pub t2: Option<u64>,
    /// Winning roster ID, set once the match is decided.
    #[serde(default)]
    pub w: Option<u64>,
    #[serde(default)]
    pub l: Option<u64>,
}

/// Draft metadata (`GET /v1/league/{id}/drafts`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Scheduled start as epoch milliseconds.
    #[serde(default)]
    pub start_time: Option<i64>,
}

/// An NFL player record from the full player map (`GET /v1/players/nfl`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub type PlayerMap = HashMap<String, Player>;

/// Per-player stat lines for one week (`GET /v1/stats/nfl/regular/{season}/{week}`).
///
/// Values are kept as raw JSON because the stat map mixes numbers with the
/// occasional null; [`WeekStats::stat`] does the lenient extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekStats(pub HashMap<String, HashMap<String, serde_json::Value>>);

impl WeekStats {
    /// Look up one stat for one player. `None` when the player has no line
    /// this week or the stat is missing/non-numeric.
    pub fn stat(&self, player_id: &str, key: &str) -> Option<f64> {
        self.0.get(player_id)?.get(key)?.as_f64()
    }
}

// ---------------------------------------------------------------------------
// sportsdata.io schedule API
// ---------------------------------------------------------------------------

/// One scheduled game (`GET /v3/nfl/scores/json/Schedules/{season}{segment}`).
///
/// `Date` is a naive local timestamp (no offset); callers interpret it in the
/// configured time zone. It is `null` for games not yet scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGame {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Week", default)]
    pub week: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_name_falls_back_to_display_name() {
        let user: LeagueUser = serde_json::from_str(
            r#"{"user_id":"1","display_name":"alice","metadata":{}}"#,
        )
        .unwrap();
        assert_eq!(user.team_name(), "alice");

        let named: LeagueUser = serde_json::from_str(
            r#"{"user_id":"2","display_name":"bob","metadata":{"team_name":"The Bobcats"}}"#,
        )
        .unwrap();
        assert_eq!(named.team_name(), "The Bobcats");
    }

    #[test]
    fn bench_is_players_minus_starters() {
        let matchup: Matchup = serde_json::from_str(
            r#"{"matchup_id":1,"roster_id":3,"starters":["10","11"],"players":["10","11","12","13"]}"#,
        )
        .unwrap();
        let mut bench = matchup.bench();
        bench.sort();
        assert_eq!(bench, vec!["12", "13"]);
    }

    #[test]
    fn week_stats_tolerates_nulls_and_missing_players() {
        let stats: WeekStats = serde_json::from_str(
            r#"{"10":{"pts_std":12.5,"pts_half_ppr":null},"11":{"pts_std":-1.2}}"#,
        )
        .unwrap();
        assert_eq!(stats.stat("10", "pts_std"), Some(12.5));
        assert_eq!(stats.stat("10", "pts_half_ppr"), None);
        assert_eq!(stats.stat("11", "pts_std"), Some(-1.2));
        assert_eq!(stats.stat("99", "pts_std"), None);
    }

    #[test]
    fn roster_points_combines_decimal_part() {
        let settings = RosterSettings {
            wins: 8,
            losses: 5,
            ties: 0,
            fpts: 1523.0,
            fpts_decimal: Some(44.0),
        };
        assert!((settings.points() - 1523.44).abs() < 1e-9);
    }

    #[test]
    fn scheduled_game_reads_pascal_case_date() {
        let game: ScheduledGame =
            serde_json::from_str(r#"{"Date":"2021-08-12T19:00:00","Week":0}"#).unwrap();
        assert_eq!(game.date.as_deref(), Some("2021-08-12T19:00:00"));
    }
}
