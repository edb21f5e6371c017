use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Administrative grouping of teams that forms an independent season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub id: &'static str,
    pub name: &'static str,
    pub letter: char,
}

pub const ZONES: [Zone; 5] = [
    Zone {
        id: "11111111-1111-1111-1111-111111111111",
        name: "Zone A",
        letter: 'A',
    },
    Zone {
        id: "22222222-2222-2222-2222-222222222222",
        name: "Zone B",
        letter: 'B',
    },
    Zone {
        id: "33333333-3333-3333-3333-333333333333",
        name: "Zone C",
        letter: 'C',
    },
    Zone {
        id: "44444444-4444-4444-4444-444444444444",
        name: "Zone D",
        letter: 'D',
    },
    Zone {
        id: "55555555-5555-5555-5555-555555555555",
        name: "Zone E",
        letter: 'E',
    },
];

impl Zone {
    /// Looks a zone up by its identifier
    pub fn find(zone_id: &str) -> Option<Zone> {
        ZONES.iter().copied().find(|zone| zone.id == zone_id)
    }
}

/// Database model for teams table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub zone_id: String,
    pub name: String,
    pub home_ground: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new team with a generated ID
    pub fn new(zone_id: &str, name: String, home_ground: String, logo_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            zone_id: zone_id.to_string(),
            name,
            home_ground,
            logo_url,
            created_at: Utc::now(),
        }
    }
}

/// A single scheduled match between two teams of a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub zone_id: String,
    pub matchweek: u32,
    pub home_team_id: String,
    pub away_team_id: String,
    pub date: NaiveDate,
    pub venue: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub played: bool,
    #[serde(default)]
    pub goals: Vec<GoalEvent>,
}

impl Fixture {
    /// Final score, only for fixtures that are played and carry both scores
    pub fn result(&self) -> Option<(u32, u32)> {
        if !self.played {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub id: String,
    pub fixture_id: String,
    pub player_id: Option<String>, // Unassigned while the result is being entered
    pub team_id: String,
    pub minute: Option<u16>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// Counters the league administrator maintains by hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCounters {
    pub assists: u32,
    pub clean_sheets: u32,
    pub appearances: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub zone_id: String,
    pub name: String,
    pub team_id: String,
    pub position: Position,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub counters: PlayerCounters,
}

impl Player {
    /// Creates a new player with a generated ID and zeroed counters
    pub fn new(zone_id: &str, name: String, team_id: String, position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            zone_id: zone_id.to_string(),
            name,
            team_id,
            position,
            created_at: Utc::now(),
            counters: PlayerCounters::default(),
        }
    }
}

/// Everything stored for one zone, loaded and saved as a unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub teams: Vec<Team>,
    pub fixtures: Vec<Fixture>,
    pub players: Vec<Player>,
}

impl ZoneSnapshot {
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == player_id)
    }

    pub fn has_schedule(&self) -> bool {
        !self.fixtures.is_empty()
    }

    pub fn has_played_fixtures(&self) -> bool {
        self.fixtures.iter().any(|fixture| fixture.played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn fixture(played: bool, home_score: Option<u32>, away_score: Option<u32>) -> Fixture {
        Fixture {
            id: "1-a-b".to_string(),
            zone_id: ZONES[0].id.to_string(),
            matchweek: 1,
            home_team_id: "a".to_string(),
            away_team_id: "b".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            venue: "Ground A".to_string(),
            home_score,
            away_score,
            played,
            goals: vec![],
        }
    }

    #[test]
    fn result_requires_played_flag_and_both_scores() {
        assert_eq!(fixture(true, Some(2), Some(1)).result(), Some((2, 1)));
        assert_eq!(fixture(false, Some(2), Some(1)).result(), None);
        assert_eq!(fixture(true, Some(2), None).result(), None);
        assert_eq!(fixture(true, None, None).result(), None);
    }

    #[test]
    fn finds_known_zones_only() {
        let zone = Zone::find("33333333-3333-3333-3333-333333333333").unwrap();
        assert_eq!(zone.letter, 'C');
        assert!(Zone::find("zone-z").is_none());
    }

    #[test]
    fn positions_round_trip_through_strings() {
        for position in Position::iter() {
            let parsed = Position::from_str(&position.to_string()).unwrap();
            assert_eq!(parsed, position);
        }
        assert!(Position::from_str("Winger").is_err());
    }

    #[test]
    fn new_player_starts_with_zero_counters() {
        let player = Player::new(
            ZONES[0].id,
            "Ada".to_string(),
            "team-1".to_string(),
            Position::Forward,
        );

        assert!(!player.id.is_empty());
        assert_eq!(player.counters, PlayerCounters::default());
    }
}
