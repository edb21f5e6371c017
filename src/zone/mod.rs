// Public API - what other modules can use
pub use handlers::{
    calendar, clear_result, create_player, create_team, delete_player, delete_team, generate_fixtures,
    get_zone, list_fixtures, list_zones, overview, player_stats, record_result, reset_fixtures,
    standings, top_scorers, update_player_counters, update_team,
};
pub use repository::{InMemoryZoneRepository, PostgresZoneRepository, ZoneRepository};
pub use service::ZoneService;

// Internal modules
pub mod handlers;
pub mod repository;
pub mod service;
pub mod types;
