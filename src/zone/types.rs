use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::league::{Fixture, Position, Zone, ZoneSnapshot};
use crate::schedule::{PolicyKind, SeasonOverview};
use crate::standings::{SeasonSummary, TableBand, TeamStanding};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCreateRequest {
    pub name: String,
    pub home_ground: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Fields left out keep their current value; an empty logo URL removes the logo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamUpdateRequest {
    pub name: Option<String>,
    pub home_ground: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCreateRequest {
    pub name: String,
    pub team_id: String,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateFixturesRequest {
    pub start_date: NaiveDate,
    /// Falls back to the configured policy
    #[serde(default)]
    pub policy: Option<PolicyKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureQuery {
    pub matchweek: Option<u32>,
}

/// One matchweek of the calendar, dated by its first fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchweekFixtures {
    pub matchweek: u32,
    pub date: NaiveDate,
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneResponse {
    pub id: String,
    pub name: String,
    pub letter: char,
}

impl From<Zone> for ZoneResponse {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.id.to_string(),
            name: zone.name.to_string(),
            letter: zone.letter,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSnapshotResponse {
    pub zone: ZoneResponse,
    #[serde(flatten)]
    pub snapshot: ZoneSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandedStanding {
    #[serde(flatten)]
    pub standing: TeamStanding,
    pub band: TableBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub zone: ZoneResponse,
    pub season: SeasonOverview,
    pub summary: SeasonSummary,
    pub table: Vec<BandedStanding>,
}
