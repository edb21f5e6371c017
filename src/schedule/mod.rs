// Public API - what other modules can use
pub use generator::{fixture_id, generate_fixtures};
pub use overview::{fixtures_by_matchweek, matches_per_week, SeasonOverview};
pub use policy::{
    BalancedVenuePolicy, HomeAwayPolicy, Orientation, PolicyKind, SlotOrderPolicy, Venue,
    VenueTracker,
};

// Internal modules
mod generator;
pub mod overview;
pub mod policy;
