// Public API
pub use models::{
    Fixture, GoalEvent, Player, PlayerCounters, Position, Team, Zone, ZoneSnapshot, ZONES,
};

pub mod models;
