//! Pure view computations over provider models. No IO — everything here
//! takes already-fetched data, which keeps it trivially testable.

use std::collections::HashMap;

use gridiron_providers::models::{LeagueUser, Matchup, PlayerMap, Roster, WeekStats};

/// Bench points are always scored standard, whatever the league scoring is.
pub const BENCH_SCORING_KEY: &str = "pts_std";

/// Placeholder for rosters whose owner left or never set a name.
const UNKNOWN_TEAM: &str = "Team name not available";

/// One team's side of a matchup with its computed score.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamScore {
    pub team_name: String,
    pub points: f64,
}

/// Both sides of one matchup.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardEntry {
    pub matchup_id: u64,
    pub home: TeamScore,
    pub away: TeamScore,
}

impl ScoreboardEntry {
    pub fn margin(&self) -> f64 {
        (self.home.points - self.away.points).abs()
    }
}

/// League standings row.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub points: f64,
}

/// Map user_id to team name (custom name, else display name).
pub fn team_names(users: &[LeagueUser]) -> HashMap<&str, &str> {
    users
        .iter()
        .map(|u| (u.user_id.as_str(), u.team_name()))
        .collect()
}

/// Resolve a roster to its team name through its owner.
pub fn roster_team_name<'a>(
    roster_id: u64,
    rosters: &'a [Roster],
    names: &HashMap<&str, &'a str>,
) -> &'a str {
    rosters
        .iter()
        .find(|r| r.roster_id == roster_id)
        .and_then(|r| r.owner_id.as_deref())
        .and_then(|owner| names.get(owner).copied())
        .unwrap_or(UNKNOWN_TEAM)
}

/// Build the week's scoreboards: matchups paired by `matchup_id`, each side
/// scored by summing `scoring_key` over its starters. Sides with no stat
/// line yet contribute zero. Unpaired sides (byes) are dropped.
pub fn scoreboards(
    users: &[LeagueUser],
    rosters: &[Roster],
    matchups: &[Matchup],
    stats: &WeekStats,
    scoring_key: &str,
) -> Vec<ScoreboardEntry> {
    let names = team_names(users);

    let mut by_id: HashMap<u64, Vec<&Matchup>> = HashMap::new();
    for m in matchups {
        if let Some(id) = m.matchup_id {
            by_id.entry(id).or_default().push(m);
        }
    }

    let mut entries: Vec<ScoreboardEntry> = by_id
        .into_iter()
        .filter_map(|(matchup_id, sides)| {
            if sides.len() != 2 {
                return None;
            }
            let side = |m: &Matchup| TeamScore {
                team_name: roster_team_name(m.roster_id, rosters, &names).to_string(),
                points: starter_points(m, stats, scoring_key),
            };
            Some(ScoreboardEntry {
                matchup_id,
                home: side(sides[0]),
                away: side(sides[1]),
            })
        })
        .collect();

    entries.sort_by_key(|e| e.matchup_id);
    entries
}

fn starter_points(matchup: &Matchup, stats: &WeekStats, scoring_key: &str) -> f64 {
    matchup
        .starters
        .iter()
        .filter_map(|pid| stats.stat(pid, scoring_key))
        .sum()
}

/// Matchups whose margin is under `close_num` points.
pub fn close_games(entries: &[ScoreboardEntry], close_num: f64) -> Vec<ScoreboardEntry> {
    entries
        .iter()
        .filter(|e| e.margin() < close_num)
        .cloned()
        .collect()
}

/// Highest-scoring team of the week across all matchups.
pub fn highest_score(entries: &[ScoreboardEntry]) -> Option<TeamScore> {
    entries
        .iter()
        .flat_map(|e| [&e.home, &e.away])
        .max_by(|a, b| a.points.total_cmp(&b.points))
        .cloned()
}

/// Lowest-scoring team of the week across all matchups.
pub fn lowest_score(entries: &[ScoreboardEntry]) -> Option<TeamScore> {
    entries
        .iter()
        .flat_map(|e| [&e.home, &e.away])
        .min_by(|a, b| a.points.total_cmp(&b.points))
        .cloned()
}

/// Standings from roster records, best first: wins, then points.
pub fn standings(users: &[LeagueUser], rosters: &[Roster]) -> Vec<Standing> {
    let names = team_names(users);
    let mut rows: Vec<Standing> = rosters
        .iter()
        .map(|r| Standing {
            team_name: roster_team_name(r.roster_id, rosters, &names).to_string(),
            wins: r.settings.wins,
            losses: r.settings.losses,
            points: r.settings.points(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.points.total_cmp(&a.points))
    });
    rows
}

/// Standard points each team left on its bench this week.
pub fn bench_points(
    users: &[LeagueUser],
    rosters: &[Roster],
    matchups: &[Matchup],
    stats: &WeekStats,
) -> Vec<(String, f64)> {
    let names = team_names(users);
    matchups
        .iter()
        .map(|m| {
            let pts: f64 = m
                .bench()
                .iter()
                .filter_map(|pid| stats.stat(pid, BENCH_SCORING_KEY))
                .sum();
            (
                roster_team_name(m.roster_id, rosters, &names).to_string(),
                pts,
            )
        })
        .collect()
}

/// The team with the most points left on the bench.
pub fn highest_bench(bench: &[(String, f64)]) -> Option<(String, f64)> {
    bench
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .cloned()
}

/// Starters that scored negative standard points, grouped per team.
/// Teams with no negative starters are omitted.
pub fn negative_starters(
    users: &[LeagueUser],
    rosters: &[Roster],
    matchups: &[Matchup],
    stats: &WeekStats,
    players: &PlayerMap,
) -> Vec<(String, Vec<(String, f64)>)> {
    let names = team_names(users);
    matchups
        .iter()
        .filter_map(|m| {
            let negatives: Vec<(String, f64)> = m
                .starters
                .iter()
                .filter_map(|pid| {
                    let pts = stats.stat(pid, BENCH_SCORING_KEY)?;
                    if pts < 0.0 {
                        let name = players
                            .get(pid)
                            .map(|p| p.full_name())
                            .unwrap_or_else(|| pid.clone());
                        Some((name, pts))
                    } else {
                        None
                    }
                })
                .collect();
            if negatives.is_empty() {
                None
            } else {
                Some((
                    roster_team_name(m.roster_id, rosters, &names).to_string(),
                    negatives,
                ))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_providers::models::Player;

    fn users() -> Vec<LeagueUser> {
        serde_json::from_str(
            r#"[
                {"user_id":"u1","display_name":"alice","metadata":{"team_name":"Hawks"}},
                {"user_id":"u2","display_name":"bob","metadata":{}},
                {"user_id":"u3","display_name":"carol","metadata":{"team_name":"Llamas"}},
                {"user_id":"u4","display_name":"dan","metadata":{}}
            ]"#,
        )
        .unwrap()
    }

    fn rosters() -> Vec<Roster> {
        serde_json::from_str(
            r#"[
                {"roster_id":1,"owner_id":"u1","settings":{"wins":3,"losses":1,"fpts":410,"fpts_decimal":50}},
                {"roster_id":2,"owner_id":"u2","settings":{"wins":2,"losses":2,"fpts":395,"fpts_decimal":10}},
                {"roster_id":3,"owner_id":"u3","settings":{"wins":3,"losses":1,"fpts":402,"fpts_decimal":0}},
                {"roster_id":4,"owner_id":null,"settings":{"wins":0,"losses":4,"fpts":250,"fpts_decimal":0}}
            ]"#,
        )
        .unwrap()
    }

    fn matchups() -> Vec<Matchup> {
        serde_json::from_str(
            r#"[
                {"matchup_id":1,"roster_id":1,"starters":["p1","p2"],"players":["p1","p2","p5"]},
                {"matchup_id":1,"roster_id":2,"starters":["p3"],"players":["p3","p6"]},
                {"matchup_id":2,"roster_id":3,"starters":["p4"],"players":["p4"]},
                {"matchup_id":2,"roster_id":4,"starters":["p7"],"players":["p7"]}
            ]"#,
        )
        .unwrap()
    }

    fn stats() -> WeekStats {
        serde_json::from_str(
            r#"{
                "p1":{"pts_half_ppr":20.5,"pts_std":18.0},
                "p2":{"pts_half_ppr":10.0,"pts_std":9.0},
                "p3":{"pts_half_ppr":25.2,"pts_std":22.0},
                "p4":{"pts_half_ppr":8.0,"pts_std":-2.5},
                "p5":{"pts_half_ppr":14.0,"pts_std":12.5},
                "p6":{"pts_half_ppr":3.0,"pts_std":2.0}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn scoreboards_sum_starters_with_configured_key() {
        let boards = scoreboards(&users(), &rosters(), &matchups(), &stats(), "pts_half_ppr");
        assert_eq!(boards.len(), 2);

        let first = &boards[0];
        assert_eq!(first.matchup_id, 1);
        assert_eq!(first.home.team_name, "Hawks");
        assert!((first.home.points - 30.5).abs() < 1e-9);
        assert_eq!(first.away.team_name, "bob");
        assert!((first.away.points - 25.2).abs() < 1e-9);

        // Roster 4 has no owner; p7 has no stat line.
        let second = &boards[1];
        assert_eq!(second.away.team_name, "Team name not available");
        assert_eq!(second.away.points, 0.0);
    }

    #[test]
    fn close_games_filter_by_margin() {
        let boards = scoreboards(&users(), &rosters(), &matchups(), &stats(), "pts_half_ppr");
        // Margins: matchup 1 -> 5.3, matchup 2 -> 8.0
        assert_eq!(close_games(&boards, 10.0).len(), 2);
        assert_eq!(close_games(&boards, 6.0).len(), 1);
        assert_eq!(close_games(&boards, 2.0).len(), 0);
    }

    #[test]
    fn highest_and_lowest_scorers() {
        let boards = scoreboards(&users(), &rosters(), &matchups(), &stats(), "pts_half_ppr");
        assert_eq!(highest_score(&boards).unwrap().team_name, "Hawks");
        assert_eq!(
            lowest_score(&boards).unwrap().team_name,
            "Team name not available"
        );
    }

    #[test]
    fn standings_sort_by_wins_then_points() {
        let rows = standings(&users(), &rosters());
        let order: Vec<&str> = rows.iter().map(|s| s.team_name.as_str()).collect();
        // Hawks and Llamas both 3-1; Hawks has more points.
        assert_eq!(order, vec!["Hawks", "Llamas", "bob", "Team name not available"]);
        assert!((rows[0].points - 410.5).abs() < 1e-9);
    }

    #[test]
    fn bench_points_use_standard_scoring() {
        let bench = bench_points(&users(), &rosters(), &matchups(), &stats());
        let hawks = bench.iter().find(|(t, _)| t == "Hawks").unwrap();
        assert!((hawks.1 - 12.5).abs() < 1e-9); // p5 pts_std

        let top = highest_bench(&bench).unwrap();
        assert_eq!(top.0, "Hawks");
    }

    #[test]
    fn negative_starters_grouped_by_team() {
        let mut players = PlayerMap::new();
        players.insert(
            "p4".to_string(),
            Player {
                first_name: "Nick".to_string(),
                last_name: "Folk".to_string(),
                position: Some("K".to_string()),
            },
        );

        let negatives = negative_starters(&users(), &rosters(), &matchups(), &stats(), &players);
        assert_eq!(negatives.len(), 1);
        assert_eq!(negatives[0].0, "Llamas");
        assert_eq!(negatives[0].1, vec![("Nick Folk".to_string(), -2.5)]);
    }
}
