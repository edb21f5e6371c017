// Library crate for the regional league manager
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod league;
pub mod results;
pub mod routes;
pub mod schedule;
pub mod shared;
pub mod standings;
pub mod zone;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use league::{Fixture, GoalEvent, Player, PlayerCounters, Position, Team, Zone, ZONES};
pub use results::{GoalEntry, ResultEntry, ResultError};
pub use routes::app;
pub use schedule::{generate_fixtures, PolicyKind};
pub use shared::{AppError, AppState};
pub use standings::{
    compute_player_stats, compute_standings, top_scorers, PlayerStats, TeamStanding,
};
pub use zone::{InMemoryZoneRepository, PostgresZoneRepository, ZoneRepository, ZoneService};
