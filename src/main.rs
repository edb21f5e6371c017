use league_manager::{
    app, AppConfig, AppState, InMemoryZoneRepository, PostgresZoneRepository, ZoneRepository,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "league_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting league manager");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let zone_repository: Arc<dyn ZoneRepository + Send + Sync> = match &config.database_url {
        Some(database_url) => match sqlx::PgPool::connect(database_url).await {
            Ok(pool) => {
                info!("Using PostgreSQL zone repository");
                Arc::new(PostgresZoneRepository::new(pool))
            }
            Err(e) => {
                error!(error = %e, "Failed to connect to database");
                std::process::exit(1);
            }
        },
        None => {
            info!("DATABASE_URL not set, keeping league data in memory");
            Arc::new(InMemoryZoneRepository::new())
        }
    };

    let app_state = AppState::new(zone_repository, config.home_away_policy);
    let router = app(app_state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!(
        addr = %config.bind_addr,
        policy = %config.home_away_policy,
        "Server running"
    );

    if let Err(e) = axum::serve(listener, router).await {
        error!(error = %e, "Server stopped");
    }
}
