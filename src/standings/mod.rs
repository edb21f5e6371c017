// Public API - what other modules can use
pub use players::{compute_player_stats, top_scorers, PlayerStats, TOP_SCORER_LIMIT};
pub use summary::{summarize_season, SeasonSummary};
pub use table::{compare_standings, compute_standings, TableBand, TeamStanding};

// Internal modules
pub mod players;
pub mod summary;
pub mod table;
