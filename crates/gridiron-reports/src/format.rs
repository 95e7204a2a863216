//! Message formatting. Everything returns plain fixed-width text; the
//! delivery backends decide how to wrap it for their platform.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::view::{ScoreboardEntry, Standing, TeamScore};

const RULE_WIDE: &str = "________________________________\n";
const RULE_NARROW: &str = "___________________\n";

/// Longest team name the standings table will print before truncating.
const TEAM_NAME_MAX: usize = 50;

/// Weekly matchup pairings, no scores.
pub fn matchups_message(week: u32, entries: &[ScoreboardEntry]) -> String {
    let mut out = String::new();
    out.push_str(RULE_WIDE);
    out.push_str(&format!("Matchups for Week {week}:\n"));
    out.push_str(RULE_WIDE);
    out.push('\n');
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "Matchup {}:\n{} VS. {}\n\n",
            i + 1,
            entry.home.team_name,
            entry.away.team_name
        ));
    }
    out
}

/// Current scores for every matchup.
pub fn scores_message(entries: &[ScoreboardEntry]) -> String {
    let mut out = String::from("Scores\n____________________\n\n");
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&matchup_scores_block(i + 1, entry));
    }
    out
}

/// Matchups within the close-game threshold.
pub fn close_games_message(entries: &[ScoreboardEntry]) -> String {
    let mut out = String::new();
    out.push_str(RULE_NARROW);
    out.push_str("Close games😰😰\n");
    out.push_str(RULE_NARROW);
    out.push('\n');
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&matchup_scores_block(i + 1, entry));
    }
    out
}

fn matchup_scores_block(number: usize, entry: &ScoreboardEntry) -> String {
    format!(
        "Matchup {}\n{:<8} {:<8.2}\n{:<8} {:<8.2}\n\n",
        number,
        entry.home.team_name,
        entry.home.points,
        entry.away.team_name,
        entry.away.points
    )
}

/// Standings table with a cut line under the last playoff spot.
pub fn standings_message(rows: &[Standing], playoff_teams: usize) -> String {
    let mut out = String::new();
    out.push_str(RULE_WIDE);
    out.push_str(&format!(
        "Standings\n|{:^7}|{:^7}|{:^7}|{:^7}\n",
        "rank", "team", "wins", "points"
    ));
    out.push_str(RULE_WIDE);
    out.push('\n');
    for (i, row) in rows.iter().enumerate() {
        let team: String = row.team_name.chars().take(TEAM_NAME_MAX).collect();
        out.push_str(&format!(
            "{:^7} | {:^10} | {:>7} | {:>7.2}\n",
            i + 1,
            team,
            row.wins,
            row.points
        ));
        if i + 1 == playoff_teams {
            out.push_str(RULE_WIDE);
            out.push('\n');
        }
    }
    out
}

/// Highest scorer, lowest scorer, most points left on the bench, and the
/// "Why bother?" section of negative-point starters.
pub fn best_and_worst_message(
    highest: Option<&TeamScore>,
    lowest: Option<&TeamScore>,
    top_bench: Option<&(String, f64)>,
    negatives: &[(String, Vec<(String, f64)>)],
) -> String {
    let mut out = String::new();
    if let Some(best) = highest {
        out.push_str(&format!(
            "🏆🏆 Highest Scorer:\n{}\n{:.2}\n\n",
            best.team_name, best.points
        ));
    }
    if let Some(worst) = lowest {
        out.push_str(&format!(
            "😢😢 Lowest Scorer:\n{}\n{:.2}\n\n",
            worst.team_name, worst.points
        ));
    }
    if let Some((team, points)) = top_bench {
        out.push_str(&format!(
            "😂😂 Most points left on the bench:\n{team}\n{points:.2}\n\n"
        ));
    }
    if !negatives.is_empty() {
        out.push_str("🤔🤔 Why bother?\n");
        for (team, starters) in negatives {
            out.push_str(&format!("{team} Started:\n"));
            for (player, points) in starters {
                out.push_str(&format!("{player} who sucks, and had {points} points\n"));
            }
            out.push('\n');
        }
    }
    out
}

/// Draft countdown, sent daily through the pre-season.
pub fn draft_reminder_message(draft_date: DateTime<Tz>, now: DateTime<Tz>) -> String {
    let mut out = String::new();
    out.push_str(RULE_WIDE);
    out.push_str("Draft Reminder\n");
    out.push_str(RULE_WIDE);
    out.push('\n');

    let remaining = draft_date.signed_duration_since(now);
    let days = remaining.num_days();
    if remaining.num_seconds() < 0 {
        out.push_str("The draft has already taken place.\n");
    } else if days >= 1 {
        out.push_str(&format!(
            "{} day{} until draft day.  [ {} ]\n",
            days,
            if days == 1 { "" } else { "s" },
            draft_date.format("%A %e %B %Y %H:%M")
        ));
    } else {
        out.push_str(&format!(
            "Draft day is today! [ {} ]\n",
            draft_date.format("%H:%M")
        ));
    }
    out
}

/// The fixed message schedule, rendered as a fixed-width table for the
/// welcome message.
pub fn schedule_table() -> String {
    let rows: [(&str, &str, &str); 7] = [
        ("Thursday", "19:00", "Week Matchups"),
        ("Friday", "10:00", "Thursday Night Scores"),
        ("Sunday", "22:00", "Close Games"),
        ("Monday", "10:00", "Sunday Night Scores"),
        ("Tuesday", "11:00", "League Standings"),
        ("Tuesday", "11:01", "Best and Worst"),
        ("Daily", "18:00", "Draft Reminder"),
    ];

    let mut out = String::new();
    out.push_str(&format!("| {:<8} | {:<5} | {:<21} |\n", "Day", "Hour", "Message"));
    out.push_str(&format!("|{:-<10}|{:-<7}|{:-<23}|\n", "", "", ""));
    for (day, hour, message) in rows {
        out.push_str(&format!("| {day:<8} | {hour:<5} | {message:<21} |\n"));
    }
    out
}

/// One-time startup greeting.
pub fn welcome_message(league_name: &str, season: &str) -> String {
    let mut out = format!("👋 Hello, I am the {league_name} Stats Bot!\n\n");
    out.push_str("I am going to send you some stats about the league according to this schedule:\n");
    out.push_str(&schedule_table());
    out.push_str(&format!("\nWelcome to the {season} season!\n"));
    out
}
