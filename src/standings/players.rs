use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::league::{Fixture, Player, Team};

pub const TOP_SCORER_LIMIT: usize = 10;

const UNKNOWN_TEAM: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: String,
    pub player_name: String,
    pub team_name: String,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub appearances: u32,
}

/// One row per player, in roster order.
///
/// Goals come from goal events across every fixture. Assists, clean sheets and
/// appearances are copied from the hand-maintained counters.
pub fn compute_player_stats(
    players: &[Player],
    fixtures: &[Fixture],
    teams: &[Team],
) -> Vec<PlayerStats> {
    let team_names: HashMap<&str, &str> = teams
        .iter()
        .map(|team| (team.id.as_str(), team.name.as_str()))
        .collect();

    let mut goals: HashMap<&str, u32> = HashMap::new();
    for event in fixtures.iter().flat_map(|fixture| &fixture.goals) {
        if let Some(player_id) = event.player_id.as_deref() {
            *goals.entry(player_id).or_default() += 1;
        }
    }

    players
        .iter()
        .map(|player| PlayerStats {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            team_name: team_names
                .get(player.team_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_TEAM)
                .to_string(),
            goals: goals.get(player.id.as_str()).copied().unwrap_or_default(),
            assists: player.counters.assists,
            clean_sheets: player.counters.clean_sheets,
            appearances: player.counters.appearances,
        })
        .collect()
}

/// Scorers with at least one goal, most goals first, capped at ten
pub fn top_scorers(stats: &[PlayerStats]) -> Vec<PlayerStats> {
    let mut scorers: Vec<PlayerStats> = stats.iter().filter(|s| s.goals > 0).cloned().collect();
    scorers.sort_by(|a, b| b.goals.cmp(&a.goals));
    scorers.truncate(TOP_SCORER_LIMIT);
    scorers
}
