pub mod actions;
pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{assert_double_round_robin, assert_row};
#[allow(unused_imports)]
pub use setup::{date, LeagueSetup, LeagueSetupBuilder};
