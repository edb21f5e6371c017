use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::league::{Fixture, Team};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: String,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    pub position: usize,
}

impl TeamStanding {
    fn new(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            position: 0,
        }
    }

    /// Counters saturate rather than wrap on stored scores of any size
    fn record(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won = self.won.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_FOR_WIN);
            }
            Ordering::Equal => {
                self.drawn = self.drawn.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_FOR_DRAW);
            }
            Ordering::Less => self.lost = self.lost.saturating_add(1),
        }

        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
    }
}

/// Points, then goal difference, then goals scored; best first
pub fn compare_standings(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Builds the league table from scratch.
///
/// Only fixtures that are played and carry both scores count; everything else is
/// treated as unplayed. Fixtures naming a team outside `teams` are skipped. Teams
/// level on every tie-break keep their roster order.
pub fn compute_standings(teams: &[Team], fixtures: &[Fixture]) -> Vec<TeamStanding> {
    let mut rows: Vec<TeamStanding> = teams.iter().map(TeamStanding::new).collect();
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| (team.id.as_str(), i))
        .collect();

    for fixture in fixtures {
        let Some((home_score, away_score)) = fixture.result() else {
            continue;
        };
        let (Some(&home), Some(&away)) = (
            index.get(fixture.home_team_id.as_str()),
            index.get(fixture.away_team_id.as_str()),
        ) else {
            continue;
        };

        rows[home].record(home_score, away_score);
        rows[away].record(away_score, home_score);
    }

    // sort_by is stable, so full ties stay in roster order
    rows.sort_by(compare_standings);
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i + 1;
    }

    rows
}

/// Colour band of a table position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableBand {
    Promotion,
    Playoff,
    Relegation,
    None,
}

impl TableBand {
    /// Top four promote, the next two go to the playoff, the bottom three are relegated.
    /// Earlier bands win when a small league makes them overlap.
    pub fn for_position(position: usize, team_count: usize) -> Self {
        if position <= 4 {
            TableBand::Promotion
        } else if position <= 6 {
            TableBand::Playoff
        } else if position + 2 >= team_count {
            TableBand::Relegation
        } else {
            TableBand::None
        }
    }
}
