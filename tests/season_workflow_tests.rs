use axum::http::StatusCode;
use league_manager::{
    schedule::SeasonOverview, zone::types::OverviewResponse, AppError, Fixture, PlayerStats,
    PolicyKind, ResultEntry, TeamStanding, ZONES,
};
use serde_json::json;

mod utils;

use utils::*;

#[tokio::test]
async fn test_first_results_produce_expected_table() {
    let setup = LeagueSetupBuilder::new()
        .with_four_teams()
        .scheduled_from(date(2025, 8, 2))
        .build()
        .await;

    setup.record("W", "X", (2, 1), &[]).await;
    setup.record("Y", "Z", (0, 0), &[]).await;

    let table = setup.service.standings(&setup.zone_id).await.unwrap();
    assert_row(&table, &setup.team("W").id, (1, 1, 0, 0, 3, 1));
    assert_row(&table, &setup.team("X").id, (1, 0, 0, 1, 0, -1));
    assert_row(&table, &setup.team("Y").id, (1, 0, 1, 0, 1, 0));
    assert_row(&table, &setup.team("Z").id, (1, 0, 1, 0, 1, 0));

    let order: Vec<&str> = table.iter().map(|r| r.team_name.as_str()).collect();
    assert_eq!(order, vec!["W", "Y", "Z", "X"]);
}

#[tokio::test]
async fn test_four_team_season_shape() {
    let setup = LeagueSetupBuilder::new()
        .with_four_teams()
        .scheduled_from(date(2025, 8, 2))
        .build()
        .await;

    assert_double_round_robin(&setup.fixtures, 4);
    assert_eq!(setup.fixtures.iter().map(|f| f.matchweek).max(), Some(6));

    let week_dates: Vec<_> = (1..=6)
        .map(|mw| {
            setup
                .fixtures
                .iter()
                .find(|f| f.matchweek == mw)
                .unwrap()
                .date
        })
        .collect();
    assert_eq!(
        week_dates,
        vec![
            date(2025, 8, 2),
            date(2025, 8, 9),
            date(2025, 8, 16),
            date(2025, 9, 6),
            date(2025, 9, 13),
            date(2025, 9, 20),
        ]
    );

    for fixture in &setup.fixtures {
        let home = setup
            .teams
            .iter()
            .find(|t| t.id == fixture.home_team_id)
            .unwrap();
        assert_eq!(fixture.venue, home.home_ground);
    }
}

#[tokio::test]
async fn test_odd_roster_gets_a_bye_each_week() {
    let setup = LeagueSetupBuilder::new()
        .with_teams(vec!["A", "B", "C", "D", "E"])
        .scheduled_from(date(2025, 1, 4))
        .build()
        .await;

    assert_double_round_robin(&setup.fixtures, 5);

    let overview = setup.service.overview(&setup.zone_id).await.unwrap();
    assert_eq!(overview.season, SeasonOverview::for_team_count(5));
    assert_eq!(overview.season.total_matchweeks, 10);

    for mw in 1..=10 {
        let playing = setup
            .fixtures
            .iter()
            .filter(|f| f.matchweek == mw)
            .count();
        assert_eq!(playing, 2, "matchweek {}", mw);
    }
}

#[tokio::test]
async fn test_goals_aggregate_across_fixtures() {
    let setup = LeagueSetupBuilder::new()
        .with_four_teams()
        .with_player("Nine", "W")
        .with_player("Ten", "X")
        .with_player("Keeper", "Y")
        .scheduled_from(date(2025, 8, 2))
        .build()
        .await;

    setup.record("W", "X", (2, 1), &["Nine", "Nine", "Ten"]).await;
    setup.record("Z", "W", (0, 1), &["Nine"]).await;
    setup.record("X", "Y", (1, 1), &[]).await;

    let stats = setup.service.player_stats(&setup.zone_id).await.unwrap();
    let goals_of = |name: &str| -> u32 {
        stats
            .iter()
            .find(|s| s.player_name == name)
            .map(|s| s.goals)
            .unwrap()
    };
    assert_eq!(goals_of("Nine"), 3);
    assert_eq!(goals_of("Ten"), 1);
    assert_eq!(goals_of("Keeper"), 0);

    let top = setup.service.top_scorers(&setup.zone_id).await.unwrap();
    let names: Vec<&str> = top.iter().map(|s| s.player_name.as_str()).collect();
    assert_eq!(names, vec!["Nine", "Ten"]);

    let overview = setup.service.overview(&setup.zone_id).await.unwrap();
    assert_eq!(overview.summary.fixtures_played, 3);
    assert_eq!(overview.summary.goals_scored, 6);
    assert_eq!(overview.summary.goal_events_recorded, 4);
    assert_eq!(overview.summary.top_scorer.unwrap().player_name, "Nine");
}

#[tokio::test]
async fn test_correcting_and_clearing_results() {
    let setup = LeagueSetupBuilder::new()
        .with_teams(vec!["Home", "Away"])
        .with_player("Scorer", "Home")
        .scheduled_from(date(2025, 8, 2))
        .build()
        .await;

    setup.record("Home", "Away", (1, 0), &["Scorer"]).await;
    let corrected = setup.record("Home", "Away", (3, 0), &[]).await;
    assert_eq!(corrected.result(), Some((3, 0)));
    assert!(corrected.goals.is_empty());

    let table = setup.service.standings(&setup.zone_id).await.unwrap();
    assert_row(&table, &setup.team("Home").id, (1, 1, 0, 0, 3, 3));

    setup
        .service
        .clear_result(&setup.zone_id, &corrected.id)
        .await
        .unwrap();
    let table = setup.service.standings(&setup.zone_id).await.unwrap();
    assert!(table.iter().all(|r| r.played == 0 && r.points == 0));
}

#[tokio::test]
async fn test_schedule_lifecycle() {
    let setup = LeagueSetupBuilder::new()
        .with_four_teams()
        .scheduled_from(date(2025, 8, 2))
        .build()
        .await;
    setup.record("W", "X", (1, 0), &[]).await;

    let blocked = setup
        .service
        .generate_schedule(&setup.zone_id, date(2025, 9, 1), None)
        .await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    setup.service.reset_schedule(&setup.zone_id).await.unwrap();
    assert!(setup
        .service
        .fixtures(&setup.zone_id, None)
        .await
        .unwrap()
        .is_empty());

    let regenerated = setup
        .service
        .generate_schedule(&setup.zone_id, date(2025, 9, 6), Some(PolicyKind::SlotOrder))
        .await
        .unwrap();
    assert_double_round_robin(&regenerated, 4);
    assert!(regenerated.iter().all(|f| !f.played));
    assert_eq!(regenerated[0].date, date(2025, 9, 6));
}

#[tokio::test]
async fn test_zones_are_independent() {
    let zone_a = LeagueSetupBuilder::new()
        .with_four_teams()
        .scheduled_from(date(2025, 8, 2))
        .build()
        .await;

    // Same service instance, different zone
    let zone_b = ZONES[1].id;
    let service = &zone_a.service;
    assert!(service.fixtures(zone_b, None).await.unwrap().is_empty());
    assert!(service.standings(zone_b).await.unwrap().is_empty());

    let err = service.fixtures("66666666-6666-6666-6666-666666666666", None).await;
    assert!(matches!(err, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_http_season_workflow() {
    let setup = LeagueSetupBuilder::new()
        .in_zone(ZONES[2].id)
        .with_teams(vec!["North", "South", "East"])
        .with_player("Ace", "North")
        .build()
        .await;

    let (status, fixtures): (_, Vec<Fixture>) = setup
        .send_json(
            "POST",
            "/fixtures/generate",
            json!({ "start_date": "2025-03-01", "policy": "slot_order" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fixtures.len(), 6);

    let north = setup.team("North");
    let south = setup.team("South");
    let fixture = fixtures
        .iter()
        .find(|f| f.home_team_id == north.id && f.away_team_id == south.id)
        .unwrap();
    let ace = setup.player("Ace");

    let entry = ResultEntry {
        home_score: 1,
        away_score: 0,
        goals: vec![league_manager::GoalEntry {
            player_id: Some(ace.id.clone()),
            team_id: north.id.clone(),
            minute: Some(88),
        }],
    };
    let (status, recorded): (_, Fixture) = setup
        .send_json(
            "PUT",
            &format!("/fixtures/{}/result", fixture.id),
            serde_json::to_value(&entry).unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recorded.goals[0].minute, Some(88));

    let (status, table): (_, Vec<TeamStanding>) = setup.get_json("/standings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table[0].team_id, north.id);

    let (_, scorers): (_, Vec<PlayerStats>) = setup.get_json("/stats/top-scorers").await;
    assert_eq!(scorers.len(), 1);
    assert_eq!(scorers[0].goals, 1);

    let (_, overview): (_, OverviewResponse) = setup.get_json("/overview").await;
    assert_eq!(overview.zone.letter, 'C');
    assert_eq!(overview.summary.fixtures_played, 1);
    assert_eq!(overview.season.total_matchweeks, 6);

    let (status, error): (_, serde_json::Value) = setup
        .send_json("POST", "/teams", json!({ "name": "West", "home_ground": "West Park" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["error"].is_string());
}
