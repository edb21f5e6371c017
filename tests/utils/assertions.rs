use league_manager::{Fixture, TeamStanding};
use std::collections::{HashMap, HashSet};

/// Expected table row: played, won, drawn, lost, points, goal difference
pub type Row = (u32, u32, u32, u32, u32, i64);

pub fn assert_row(table: &[TeamStanding], team_id: &str, expected: Row) {
    let row = table
        .iter()
        .find(|r| r.team_id == team_id)
        .unwrap_or_else(|| panic!("team {} missing from table", team_id));
    assert_eq!(
        (
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.points,
            row.goal_difference
        ),
        expected,
        "row for {}",
        row.team_name
    );
}

/// Every ordered pair exactly once and nobody plays twice in a matchweek
pub fn assert_double_round_robin(fixtures: &[Fixture], team_count: usize) {
    assert_eq!(fixtures.len(), team_count * (team_count - 1));

    let pairs: HashSet<(&str, &str)> = fixtures
        .iter()
        .map(|f| (f.home_team_id.as_str(), f.away_team_id.as_str()))
        .collect();
    assert_eq!(pairs.len(), fixtures.len());
    assert!(fixtures.iter().all(|f| f.home_team_id != f.away_team_id));

    let mut seen: HashMap<u32, HashSet<&str>> = HashMap::new();
    for fixture in fixtures {
        let week = seen.entry(fixture.matchweek).or_default();
        assert!(week.insert(fixture.home_team_id.as_str()));
        assert!(week.insert(fixture.away_team_id.as_str()));
    }
}
