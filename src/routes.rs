use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::AppState;
use crate::zone;

/// Builds the HTTP API around the given state
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/zones", get(zone::list_zones))
        .route("/zones/:zone_id", get(zone::get_zone))
        .route("/zones/:zone_id/teams", post(zone::create_team))
        .route(
            "/zones/:zone_id/teams/:team_id",
            put(zone::update_team).delete(zone::delete_team),
        )
        .route("/zones/:zone_id/players", post(zone::create_player))
        .route(
            "/zones/:zone_id/players/:player_id",
            axum::routing::delete(zone::delete_player),
        )
        .route(
            "/zones/:zone_id/players/:player_id/counters",
            put(zone::update_player_counters),
        )
        .route(
            "/zones/:zone_id/fixtures",
            get(zone::list_fixtures).delete(zone::reset_fixtures),
        )
        .route(
            "/zones/:zone_id/fixtures/matchweeks",
            get(zone::calendar),
        )
        .route(
            "/zones/:zone_id/fixtures/generate",
            post(zone::generate_fixtures),
        )
        .route(
            "/zones/:zone_id/fixtures/:fixture_id/result",
            put(zone::record_result).delete(zone::clear_result),
        )
        .route("/zones/:zone_id/standings", get(zone::standings))
        .route("/zones/:zone_id/stats/players", get(zone::player_stats))
        .route("/zones/:zone_id/stats/top-scorers", get(zone::top_scorers))
        .route("/zones/:zone_id/overview", get(zone::overview))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
