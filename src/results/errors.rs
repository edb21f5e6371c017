use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultError {
    #[error("Scores above {max} goals are not accepted")]
    ScoreTooHigh { max: u32 },

    #[error("Recorded {recorded} goals but the score adds up to {expected}")]
    GoalCountMismatch { recorded: usize, expected: u32 },

    #[error("Recorded {recorded} goals for team {team_id} but the score gives it {expected}")]
    TeamGoalMismatch {
        team_id: String,
        recorded: usize,
        expected: u32,
    },

    #[error("Goal credited to team {0}, which is not playing in this fixture")]
    GoalTeamNotInFixture(String),

    #[error("Goal minute must be positive")]
    InvalidMinute,
}
