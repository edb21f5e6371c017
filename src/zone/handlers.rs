use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::types::{
    FixtureQuery, GenerateFixturesRequest, MatchweekFixtures, OverviewResponse,
    PlayerCreateRequest, TeamCreateRequest, TeamUpdateRequest, ZoneResponse,
    ZoneSnapshotResponse,
};
use crate::league::{Fixture, Player, PlayerCounters, Team};
use crate::results::ResultEntry;
use crate::shared::{AppError, AppState};
use crate::standings::{PlayerStats, TeamStanding};

/// GET /zones
#[instrument(name = "list_zones", skip(state))]
pub async fn list_zones(State(state): State<AppState>) -> Json<Vec<ZoneResponse>> {
    Json(state.zone_service.list_zones())
}

/// GET /zones/:zone_id
#[instrument(name = "get_zone", skip(state))]
pub async fn get_zone(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<Json<ZoneSnapshotResponse>, AppError> {
    let snapshot = state.zone_service.snapshot(&zone_id).await?;
    Ok(Json(snapshot))
}

/// HTTP handler for registering a team
///
/// POST /zones/:zone_id/teams
#[instrument(name = "create_team", skip(state, request))]
pub async fn create_team(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
    Json(request): Json<TeamCreateRequest>,
) -> Result<(StatusCode, Json<Team>), AppError> {
    info!(team_name = %request.name, "Creating team");

    let team = state.zone_service.add_team(&zone_id, request).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// PUT /zones/:zone_id/teams/:team_id
#[instrument(name = "update_team", skip(state, request))]
pub async fn update_team(
    State(state): State<AppState>,
    Path((zone_id, team_id)): Path<(String, String)>,
    Json(request): Json<TeamUpdateRequest>,
) -> Result<Json<Team>, AppError> {
    let team = state
        .zone_service
        .update_team(&zone_id, &team_id, request)
        .await?;
    Ok(Json(team))
}

/// DELETE /zones/:zone_id/teams/:team_id
#[instrument(name = "delete_team", skip(state))]
pub async fn delete_team(
    State(state): State<AppState>,
    Path((zone_id, team_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state.zone_service.delete_team(&zone_id, &team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /zones/:zone_id/players
#[instrument(name = "create_player", skip(state, request))]
pub async fn create_player(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
    Json(request): Json<PlayerCreateRequest>,
) -> Result<(StatusCode, Json<Player>), AppError> {
    let player = state.zone_service.add_player(&zone_id, request).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// DELETE /zones/:zone_id/players/:player_id
#[instrument(name = "delete_player", skip(state))]
pub async fn delete_player(
    State(state): State<AppState>,
    Path((zone_id, player_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state.zone_service.delete_player(&zone_id, &player_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /zones/:zone_id/players/:player_id/counters
#[instrument(name = "update_player_counters", skip(state))]
pub async fn update_player_counters(
    State(state): State<AppState>,
    Path((zone_id, player_id)): Path<(String, String)>,
    Json(counters): Json<PlayerCounters>,
) -> Result<Json<Player>, AppError> {
    let player = state
        .zone_service
        .update_player_counters(&zone_id, &player_id, counters)
        .await?;
    Ok(Json(player))
}

/// HTTP handler for generating the season schedule
///
/// POST /zones/:zone_id/fixtures/generate
/// Returns every fixture of the new schedule
#[instrument(name = "generate_fixtures", skip(state))]
pub async fn generate_fixtures(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
    Json(request): Json<GenerateFixturesRequest>,
) -> Result<(StatusCode, Json<Vec<Fixture>>), AppError> {
    let fixtures = state
        .zone_service
        .generate_schedule(&zone_id, request.start_date, request.policy)
        .await?;

    info!(fixture_count = fixtures.len(), "Fixtures generated");
    Ok((StatusCode::CREATED, Json(fixtures)))
}

/// DELETE /zones/:zone_id/fixtures
#[instrument(name = "reset_fixtures", skip(state))]
pub async fn reset_fixtures(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.zone_service.reset_schedule(&zone_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /zones/:zone_id/fixtures?matchweek=N
#[instrument(name = "list_fixtures", skip(state))]
pub async fn list_fixtures(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
    Query(query): Query<FixtureQuery>,
) -> Result<Json<Vec<Fixture>>, AppError> {
    let fixtures = state
        .zone_service
        .fixtures(&zone_id, query.matchweek)
        .await?;
    Ok(Json(fixtures))
}

/// GET /zones/:zone_id/fixtures/matchweeks
#[instrument(name = "fixture_calendar", skip(state))]
pub async fn calendar(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<Json<Vec<MatchweekFixtures>>, AppError> {
    let calendar = state.zone_service.calendar(&zone_id).await?;
    Ok(Json(calendar))
}

/// PUT /zones/:zone_id/fixtures/:fixture_id/result
#[instrument(name = "record_result", skip(state, entry))]
pub async fn record_result(
    State(state): State<AppState>,
    Path((zone_id, fixture_id)): Path<(String, String)>,
    Json(entry): Json<ResultEntry>,
) -> Result<Json<Fixture>, AppError> {
    let fixture = state
        .zone_service
        .record_result(&zone_id, &fixture_id, entry)
        .await?;
    Ok(Json(fixture))
}

/// DELETE /zones/:zone_id/fixtures/:fixture_id/result
#[instrument(name = "clear_result", skip(state))]
pub async fn clear_result(
    State(state): State<AppState>,
    Path((zone_id, fixture_id)): Path<(String, String)>,
) -> Result<Json<Fixture>, AppError> {
    let fixture = state
        .zone_service
        .clear_result(&zone_id, &fixture_id)
        .await?;
    Ok(Json(fixture))
}

/// GET /zones/:zone_id/standings
#[instrument(name = "standings", skip(state))]
pub async fn standings(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<Json<Vec<TeamStanding>>, AppError> {
    Ok(Json(state.zone_service.standings(&zone_id).await?))
}

/// GET /zones/:zone_id/stats/players
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<Json<Vec<PlayerStats>>, AppError> {
    Ok(Json(state.zone_service.player_stats(&zone_id).await?))
}

/// GET /zones/:zone_id/stats/top-scorers
#[instrument(name = "top_scorers", skip(state))]
pub async fn top_scorers(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<Json<Vec<PlayerStats>>, AppError> {
    Ok(Json(state.zone_service.top_scorers(&zone_id).await?))
}

/// GET /zones/:zone_id/overview
#[instrument(name = "overview", skip(state))]
pub async fn overview(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> Result<Json<OverviewResponse>, AppError> {
    Ok(Json(state.zone_service.overview(&zone_id).await?))
}
