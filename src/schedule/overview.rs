use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::league::Fixture;

/// Headline numbers of a season, always derived rather than stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonOverview {
    pub teams: usize,
    pub total_matches: usize,
    pub total_matchweeks: u32,
    pub matches_per_week: u32,
}

impl SeasonOverview {
    /// Projection for a roster that has not been scheduled yet
    pub fn for_team_count(teams: usize) -> Self {
        if teams < 2 {
            return Self::empty(teams);
        }

        let padded = teams + teams % 2;
        let total_matchweeks = (2 * (padded - 1)) as u32;
        let total_matches = teams * (teams - 1);

        Self {
            teams,
            total_matches,
            total_matchweeks,
            matches_per_week: matches_per_week(total_matches, total_matchweeks),
        }
    }

    /// Overview of an existing schedule
    pub fn from_fixtures(teams: usize, fixtures: &[Fixture]) -> Self {
        let total_matchweeks = fixtures.iter().map(|f| f.matchweek).max().unwrap_or(0);

        Self {
            teams,
            total_matches: fixtures.len(),
            total_matchweeks,
            matches_per_week: matches_per_week(fixtures.len(), total_matchweeks),
        }
    }

    fn empty(teams: usize) -> Self {
        Self {
            teams,
            total_matches: 0,
            total_matchweeks: 0,
            matches_per_week: 0,
        }
    }
}

/// Average fixtures per matchweek, rounded to the nearest whole match
pub fn matches_per_week(total_matches: usize, total_matchweeks: u32) -> u32 {
    if total_matchweeks == 0 {
        return 0;
    }
    (total_matches as f64 / f64::from(total_matchweeks)).round() as u32
}

/// Groups fixtures by matchweek, keeping their original order inside each week
pub fn fixtures_by_matchweek(fixtures: &[Fixture]) -> BTreeMap<u32, Vec<&Fixture>> {
    let mut weeks: BTreeMap<u32, Vec<&Fixture>> = BTreeMap::new();
    for fixture in fixtures {
        weeks.entry(fixture.matchweek).or_default().push(fixture);
    }
    weeks
}
