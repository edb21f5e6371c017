use serde::{Deserialize, Serialize};

use super::players::{top_scorers, PlayerStats};
use crate::league::Fixture;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub fixtures_total: usize,
    pub fixtures_played: usize,
    pub goals_scored: u64,
    pub goal_events_recorded: usize,
    pub average_goals_per_match: f64,
    pub top_scorer: Option<PlayerStats>,
}

/// Season-wide totals over played fixtures; the scorer list is expected from
/// `compute_player_stats` on the same snapshot.
pub fn summarize_season(fixtures: &[Fixture], player_stats: &[PlayerStats]) -> SeasonSummary {
    let results: Vec<(u32, u32)> = fixtures.iter().filter_map(Fixture::result).collect();
    let goals_scored: u64 = results
        .iter()
        .map(|&(home, away)| u64::from(home) + u64::from(away))
        .sum();

    let average_goals_per_match = if results.is_empty() {
        0.0
    } else {
        goals_scored as f64 / results.len() as f64
    };

    SeasonSummary {
        fixtures_total: fixtures.len(),
        fixtures_played: results.len(),
        goals_scored,
        goal_events_recorded: fixtures.iter().map(|f| f.goals.len()).sum(),
        average_goals_per_match,
        top_scorer: top_scorers(player_stats).into_iter().next(),
    }
}
