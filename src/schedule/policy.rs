use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

/// Which side of a pairing plays at home
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The lower slot hosts
    FirstHome,
    /// The higher slot hosts
    SecondHome,
}

/// Most recent venue of every team, threaded through the round loop
#[derive(Debug, Clone, Default)]
pub struct VenueTracker {
    last: HashMap<String, Venue>,
}

impl VenueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_venue(&self, team_id: &str) -> Option<Venue> {
        self.last.get(team_id).copied()
    }

    pub fn record(&mut self, home_team_id: &str, away_team_id: &str) {
        self.last.insert(home_team_id.to_string(), Venue::Home);
        self.last.insert(away_team_id.to_string(), Venue::Away);
    }
}

/// Decides home and away for a pairing produced by the circle method.
///
/// `first` is the team in slot `i`, `second` the team in slot `n - 1 - i`.
pub trait HomeAwayPolicy: Send + Sync {
    fn orient(
        &self,
        first: &str,
        second: &str,
        round: usize,
        venues: &VenueTracker,
    ) -> Orientation;
}

/// Alternates venues using each team's previous fixture, falling back to round parity
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedVenuePolicy;

impl HomeAwayPolicy for BalancedVenuePolicy {
    fn orient(
        &self,
        first: &str,
        second: &str,
        round: usize,
        venues: &VenueTracker,
    ) -> Orientation {
        let first_last = venues.last_venue(first);
        let second_last = venues.last_venue(second);

        if first_last == Some(Venue::Home) && second_last != Some(Venue::Home) {
            Orientation::SecondHome
        } else if first_last != Some(Venue::Away) && second_last == Some(Venue::Away) {
            Orientation::FirstHome
        } else if round % 2 == 1 {
            Orientation::SecondHome
        } else {
            Orientation::FirstHome
        }
    }
}

/// Always gives home to the lower slot. Does not rebalance around byes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotOrderPolicy;

impl HomeAwayPolicy for SlotOrderPolicy {
    fn orient(
        &self,
        _first: &str,
        _second: &str,
        _round: usize,
        _venues: &VenueTracker,
    ) -> Orientation {
        Orientation::FirstHome
    }
}

/// Serializable selector for the available policies
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Balanced,
    SlotOrder,
}

impl PolicyKind {
    pub fn policy(self) -> Box<dyn HomeAwayPolicy> {
        match self {
            PolicyKind::Balanced => Box::new(BalancedVenuePolicy),
            PolicyKind::SlotOrder => Box::new(SlotOrderPolicy),
        }
    }
}
