use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::policy::{HomeAwayPolicy, Orientation, VenueTracker};
use crate::league::{Fixture, Team};

/// Days between consecutive matchweeks
pub const MATCHWEEK_INTERVAL_DAYS: i64 = 7;

/// Extra days between the last first-half matchweek and the return fixtures
pub const MID_SEASON_BREAK_DAYS: i64 = 14;

/// Deterministic identifier, unique per season since each ordered pairing occurs once
pub fn fixture_id(matchweek: u32, home_team_id: &str, away_team_id: &str) -> String {
    format!("{}-{}-{}", matchweek, home_team_id, away_team_id)
}

struct Pairing<'a> {
    matchweek: u32,
    home: &'a Team,
    away: &'a Team,
}

/// Builds a double round-robin season using the circle method.
///
/// Returns no fixtures for fewer than two teams. An odd roster is padded with a
/// bye slot; whoever is drawn against it sits that matchweek out. The second half
/// mirrors the first with venues swapped, starting after a two-week break.
pub fn generate_fixtures(
    teams: &[Team],
    start_date: NaiveDate,
    policy: &dyn HomeAwayPolicy,
) -> Vec<Fixture> {
    if teams.len() < 2 {
        debug!(team_count = teams.len(), "Not enough teams to build a schedule");
        return Vec::new();
    }

    // None is the bye slot
    let mut slots: Vec<Option<&Team>> = teams.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let slot_count = slots.len();
    let rounds = slot_count - 1;
    let mut venues = VenueTracker::new();
    let mut pairings: Vec<Pairing> = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);

    for round in 0..rounds {
        let matchweek = round as u32 + 1;

        for i in 0..slot_count / 2 {
            let (Some(first), Some(second)) = (slots[i], slots[slot_count - 1 - i]) else {
                continue;
            };

            let (home, away) = match policy.orient(&first.id, &second.id, round, &venues) {
                Orientation::FirstHome => (first, second),
                Orientation::SecondHome => (second, first),
            };

            venues.record(&home.id, &away.id);
            pairings.push(Pairing {
                matchweek,
                home,
                away,
            });
        }

        // Slot 0 stays fixed, the last slot moves into position 1
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    let rounds = rounds as u32;
    let second_half_start =
        start_date + matchweek_offset(rounds + 1) + Duration::days(MID_SEASON_BREAK_DAYS);

    let first_half = pairings.iter().map(|pairing| {
        scheduled_fixture(
            pairing.matchweek,
            pairing.home,
            pairing.away,
            start_date + matchweek_offset(pairing.matchweek),
        )
    });

    let second_half = pairings.iter().map(|pairing| {
        scheduled_fixture(
            pairing.matchweek + rounds,
            pairing.away,
            pairing.home,
            second_half_start + matchweek_offset(pairing.matchweek),
        )
    });

    let fixtures: Vec<Fixture> = first_half.chain(second_half).collect();

    debug!(
        team_count = teams.len(),
        fixture_count = fixtures.len(),
        matchweeks = rounds * 2,
        "Generated double round-robin schedule"
    );

    fixtures
}

/// Offset of a 1-based matchweek from the first matchweek of its half
fn matchweek_offset(matchweek: u32) -> Duration {
    Duration::days(MATCHWEEK_INTERVAL_DAYS * (i64::from(matchweek) - 1))
}

fn scheduled_fixture(matchweek: u32, home: &Team, away: &Team, date: NaiveDate) -> Fixture {
    Fixture {
        id: fixture_id(matchweek, &home.id, &away.id),
        zone_id: home.zone_id.clone(),
        matchweek,
        home_team_id: home.id.clone(),
        away_team_id: away.id.clone(),
        date,
        venue: home.home_ground.clone(),
        home_score: None,
        away_score: None,
        played: false,
        goals: Vec::new(),
    }
}
