use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::errors::ResultError;
use crate::league::{Fixture, GoalEvent};

/// Highest score either side may be given
pub const MAX_SCORE: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    pub player_id: Option<String>,
    pub team_id: String,
    pub minute: Option<u16>,
}

/// Final score of a fixture plus the goals behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub goals: Vec<GoalEntry>,
}

impl ResultEntry {
    pub fn new(home_score: u32, away_score: u32) -> Self {
        Self {
            home_score,
            away_score,
            goals: Vec::new(),
        }
    }

    pub fn total_goals(&self) -> u32 {
        self.home_score.saturating_add(self.away_score)
    }

    /// Goals with a scorer assigned; the rest are placeholders from an unfinished form
    pub fn assigned_goals(&self) -> impl Iterator<Item = &GoalEntry> {
        self.goals.iter().filter(|goal| goal.player_id.is_some())
    }
}

/// Returns `fixture` with the entry applied and marked as played.
///
/// Goals without a scorer are dropped. When any goals remain, their number has
/// to match the score line, in total and for each side.
pub fn record_result(fixture: &Fixture, entry: &ResultEntry) -> Result<Fixture, ResultError> {
    if entry.home_score > MAX_SCORE || entry.away_score > MAX_SCORE {
        return Err(ResultError::ScoreTooHigh { max: MAX_SCORE });
    }

    let goals: Vec<&GoalEntry> = entry.assigned_goals().collect();

    for goal in &goals {
        if !fixture.involves(&goal.team_id) {
            return Err(ResultError::GoalTeamNotInFixture(goal.team_id.clone()));
        }
        if goal.minute == Some(0) {
            return Err(ResultError::InvalidMinute);
        }
    }

    if !goals.is_empty() && goals.len() != entry.total_goals() as usize {
        return Err(ResultError::GoalCountMismatch {
            recorded: goals.len(),
            expected: entry.total_goals(),
        });
    }

    if !goals.is_empty() {
        for (team_id, expected) in [
            (&fixture.home_team_id, entry.home_score),
            (&fixture.away_team_id, entry.away_score),
        ] {
            let recorded = goals.iter().filter(|g| &g.team_id == team_id).count();
            if recorded != expected as usize {
                return Err(ResultError::TeamGoalMismatch {
                    team_id: team_id.clone(),
                    recorded,
                    expected,
                });
            }
        }
    }

    debug!(
        fixture_id = %fixture.id,
        home_score = entry.home_score,
        away_score = entry.away_score,
        goal_events = goals.len(),
        "Recording result"
    );

    let mut updated = fixture.clone();
    updated.home_score = Some(entry.home_score);
    updated.away_score = Some(entry.away_score);
    updated.played = true;
    updated.goals = goals
        .into_iter()
        .map(|goal| GoalEvent {
            id: Uuid::new_v4().to_string(),
            fixture_id: fixture.id.clone(),
            player_id: goal.player_id.clone(),
            team_id: goal.team_id.clone(),
            minute: goal.minute,
        })
        .collect();

    Ok(updated)
}

/// Returns `fixture` back in its unplayed state
pub fn clear_result(fixture: &Fixture) -> Fixture {
    Fixture {
        home_score: None,
        away_score: None,
        played: false,
        goals: Vec::new(),
        ..fixture.clone()
    }
}
