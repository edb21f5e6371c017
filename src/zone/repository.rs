use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgConnection, PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use crate::league::{Fixture, GoalEvent, Player, PlayerCounters, Position, Team, ZoneSnapshot};
use crate::shared::AppError;

/// Storage for everything belonging to a zone.
///
/// Each `save_*` call replaces the zone's full collection of that kind.
#[async_trait]
pub trait ZoneRepository {
    async fn load_snapshot(&self, zone_id: &str) -> Result<ZoneSnapshot, AppError>;
    async fn save_teams(&self, zone_id: &str, teams: &[Team]) -> Result<(), AppError>;
    async fn save_fixtures(&self, zone_id: &str, fixtures: &[Fixture]) -> Result<(), AppError>;
    /// Writes teams and fixtures together; either both land or neither does
    async fn save_season(
        &self,
        zone_id: &str,
        teams: &[Team],
        fixtures: &[Fixture],
    ) -> Result<(), AppError>;
    async fn save_players(&self, zone_id: &str, players: &[Player]) -> Result<(), AppError>;
}

/// In-memory implementation of ZoneRepository for development and testing
///
/// Data is lost when the application restarts.
pub struct InMemoryZoneRepository {
    zones: Mutex<HashMap<String, ZoneSnapshot>>,
}

impl Default for InMemoryZoneRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryZoneRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            zones: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated zones
    pub fn with_snapshot(zone_id: &str, snapshot: ZoneSnapshot) -> Self {
        let mut zones = HashMap::new();
        zones.insert(zone_id.to_string(), snapshot);

        Self {
            zones: Mutex::new(zones),
        }
    }

    fn zones(&self) -> Result<MutexGuard<'_, HashMap<String, ZoneSnapshot>>, AppError> {
        self.zones.lock().map_err(|_| {
            warn!("Zone store mutex poisoned");
            AppError::Internal
        })
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneRepository {
    #[instrument(skip(self))]
    async fn load_snapshot(&self, zone_id: &str) -> Result<ZoneSnapshot, AppError> {
        let snapshot = self.zones()?.get(zone_id).cloned().unwrap_or_default();

        debug!(
            zone_id = %zone_id,
            teams = snapshot.teams.len(),
            fixtures = snapshot.fixtures.len(),
            players = snapshot.players.len(),
            "Loaded zone from memory"
        );
        Ok(snapshot)
    }

    #[instrument(skip(self, teams))]
    async fn save_teams(&self, zone_id: &str, teams: &[Team]) -> Result<(), AppError> {
        debug!(zone_id = %zone_id, teams = teams.len(), "Saving teams in memory");
        self.zones()?.entry(zone_id.to_string()).or_default().teams = teams.to_vec();
        Ok(())
    }

    #[instrument(skip(self, fixtures))]
    async fn save_fixtures(&self, zone_id: &str, fixtures: &[Fixture]) -> Result<(), AppError> {
        debug!(zone_id = %zone_id, fixtures = fixtures.len(), "Saving fixtures in memory");
        self.zones()?.entry(zone_id.to_string()).or_default().fixtures = fixtures.to_vec();
        Ok(())
    }

    #[instrument(skip(self, teams, fixtures))]
    async fn save_season(
        &self,
        zone_id: &str,
        teams: &[Team],
        fixtures: &[Fixture],
    ) -> Result<(), AppError> {
        debug!(
            zone_id = %zone_id,
            teams = teams.len(),
            fixtures = fixtures.len(),
            "Saving teams and fixtures in memory"
        );
        let mut zones = self.zones()?;
        let snapshot = zones.entry(zone_id.to_string()).or_default();
        snapshot.teams = teams.to_vec();
        snapshot.fixtures = fixtures.to_vec();
        Ok(())
    }

    #[instrument(skip(self, players))]
    async fn save_players(&self, zone_id: &str, players: &[Player]) -> Result<(), AppError> {
        debug!(zone_id = %zone_id, players = players.len(), "Saving players in memory");
        self.zones()?.entry(zone_id.to_string()).or_default().players = players.to_vec();
        Ok(())
    }
}

/// PostgreSQL implementation of zone repository
///
/// Schema lives in `migrations/0001_init.sql`.
pub struct PostgresZoneRepository {
    pool: PgPool,
}

impl PostgresZoneRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        self.pool.begin().await.map_err(database_error)
    }
}

#[async_trait]
impl ZoneRepository for PostgresZoneRepository {
    /// All three collections come from one snapshot of the database
    #[instrument(skip(self))]
    async fn load_snapshot(&self, zone_id: &str) -> Result<ZoneSnapshot, AppError> {
        debug!(zone_id = %zone_id, "Loading zone from database");

        let mut tx = self.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        let snapshot = ZoneSnapshot {
            teams: read_teams(&mut tx, zone_id).await?,
            fixtures: read_fixtures(&mut tx, zone_id).await?,
            players: read_players(&mut tx, zone_id).await?,
        };
        tx.commit().await.map_err(database_error)?;

        debug!(
            zone_id = %zone_id,
            teams = snapshot.teams.len(),
            fixtures = snapshot.fixtures.len(),
            players = snapshot.players.len(),
            "Loaded zone from database"
        );
        Ok(snapshot)
    }

    #[instrument(skip(self, teams))]
    async fn save_teams(&self, zone_id: &str, teams: &[Team]) -> Result<(), AppError> {
        debug!(zone_id = %zone_id, teams = teams.len(), "Saving teams in database");

        let mut tx = self.begin().await?;
        write_teams(&mut tx, zone_id, teams).await?;
        tx.commit().await.map_err(database_error)?;

        debug!(zone_id = %zone_id, "Teams saved in database");
        Ok(())
    }

    #[instrument(skip(self, fixtures))]
    async fn save_fixtures(&self, zone_id: &str, fixtures: &[Fixture]) -> Result<(), AppError> {
        debug!(zone_id = %zone_id, fixtures = fixtures.len(), "Saving fixtures in database");

        let mut tx = self.begin().await?;
        write_fixtures(&mut tx, zone_id, fixtures).await?;
        tx.commit().await.map_err(database_error)?;

        debug!(zone_id = %zone_id, "Fixtures saved in database");
        Ok(())
    }

    #[instrument(skip(self, teams, fixtures))]
    async fn save_season(
        &self,
        zone_id: &str,
        teams: &[Team],
        fixtures: &[Fixture],
    ) -> Result<(), AppError> {
        debug!(
            zone_id = %zone_id,
            teams = teams.len(),
            fixtures = fixtures.len(),
            "Saving teams and fixtures in database"
        );

        let mut tx = self.begin().await?;
        write_teams(&mut tx, zone_id, teams).await?;
        write_fixtures(&mut tx, zone_id, fixtures).await?;
        tx.commit().await.map_err(database_error)?;

        debug!(zone_id = %zone_id, "Teams and fixtures saved in database");
        Ok(())
    }

    #[instrument(skip(self, players))]
    async fn save_players(&self, zone_id: &str, players: &[Player]) -> Result<(), AppError> {
        debug!(zone_id = %zone_id, players = players.len(), "Saving players in database");

        let mut tx = self.begin().await?;
        write_players(&mut tx, zone_id, players).await?;
        tx.commit().await.map_err(database_error)?;

        debug!(zone_id = %zone_id, "Players saved in database");
        Ok(())
    }
}

async fn read_teams(conn: &mut PgConnection, zone_id: &str) -> Result<Vec<Team>, AppError> {
    sqlx::query_as::<_, Team>(
        "SELECT id, zone_id, name, home_ground, logo_url, created_at FROM teams WHERE zone_id = $1 ORDER BY created_at, id",
    )
    .bind(zone_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(database_error)
}

async fn read_fixtures(conn: &mut PgConnection, zone_id: &str) -> Result<Vec<Fixture>, AppError> {
    let rows = sqlx::query(
        "SELECT id, zone_id, matchweek, home_team_id, away_team_id, match_date, venue, home_score, away_score, played FROM fixtures WHERE zone_id = $1 ORDER BY seq",
    )
    .bind(zone_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(database_error)?;

    let goal_rows = sqlx::query(
        "SELECT g.id, g.fixture_id, g.player_id, g.team_id, g.minute FROM goal_events g JOIN fixtures f ON f.id = g.fixture_id WHERE f.zone_id = $1 ORDER BY g.seq",
    )
    .bind(zone_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(database_error)?;

    let mut goals: HashMap<String, Vec<GoalEvent>> = HashMap::new();
    for row in goal_rows {
        let goal = goal_from_row(&row)?;
        goals.entry(goal.fixture_id.clone()).or_default().push(goal);
    }

    rows.iter()
        .map(|row| {
            let mut fixture = fixture_from_row(row)?;
            fixture.goals = goals.remove(&fixture.id).unwrap_or_default();
            Ok(fixture)
        })
        .collect()
}

async fn read_players(conn: &mut PgConnection, zone_id: &str) -> Result<Vec<Player>, AppError> {
    let rows = sqlx::query(
        "SELECT id, zone_id, name, team_id, position, assists, clean_sheets, appearances, created_at FROM players WHERE zone_id = $1 ORDER BY created_at, id",
    )
    .bind(zone_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(database_error)?;

    rows.iter().map(player_from_row).collect()
}

async fn write_teams(
    conn: &mut PgConnection,
    zone_id: &str,
    teams: &[Team],
) -> Result<(), AppError> {
    let keep: Vec<String> = teams.iter().map(|team| team.id.clone()).collect();

    sqlx::query("DELETE FROM teams WHERE zone_id = $1 AND NOT (id = ANY($2))")
        .bind(zone_id)
        .bind(&keep)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;

    for team in teams {
        sqlx::query(
            "INSERT INTO teams (id, zone_id, name, home_ground, logo_url, created_at) VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, home_ground = EXCLUDED.home_ground, logo_url = EXCLUDED.logo_url",
        )
        .bind(&team.id)
        .bind(zone_id)
        .bind(&team.name)
        .bind(&team.home_ground)
        .bind(&team.logo_url)
        .bind(team.created_at)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;
    }
    Ok(())
}

async fn write_fixtures(
    conn: &mut PgConnection,
    zone_id: &str,
    fixtures: &[Fixture],
) -> Result<(), AppError> {
    // goal_events go with their fixture via ON DELETE CASCADE
    sqlx::query("DELETE FROM fixtures WHERE zone_id = $1")
        .bind(zone_id)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;

    for (seq, fixture) in fixtures.iter().enumerate() {
        sqlx::query(
            "INSERT INTO fixtures (id, zone_id, seq, matchweek, home_team_id, away_team_id, match_date, venue, home_score, away_score, played) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&fixture.id)
        .bind(zone_id)
        .bind(to_db_int(seq)?)
        .bind(to_db_int(fixture.matchweek)?)
        .bind(&fixture.home_team_id)
        .bind(&fixture.away_team_id)
        .bind(fixture.date)
        .bind(&fixture.venue)
        .bind(fixture.home_score.map(to_db_int).transpose()?)
        .bind(fixture.away_score.map(to_db_int).transpose()?)
        .bind(fixture.played)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;

        for goal in &fixture.goals {
            sqlx::query(
                "INSERT INTO goal_events (id, fixture_id, player_id, team_id, minute) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&goal.id)
            .bind(&fixture.id)
            .bind(&goal.player_id)
            .bind(&goal.team_id)
            .bind(goal.minute.map(i32::from))
            .execute(&mut *conn)
            .await
            .map_err(database_error)?;
        }
    }
    Ok(())
}

async fn write_players(
    conn: &mut PgConnection,
    zone_id: &str,
    players: &[Player],
) -> Result<(), AppError> {
    let keep: Vec<String> = players.iter().map(|player| player.id.clone()).collect();

    sqlx::query("DELETE FROM players WHERE zone_id = $1 AND NOT (id = ANY($2))")
        .bind(zone_id)
        .bind(&keep)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;

    for player in players {
        sqlx::query(
            "INSERT INTO players (id, zone_id, name, team_id, position, assists, clean_sheets, appearances, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, team_id = EXCLUDED.team_id, position = EXCLUDED.position, \
             assists = EXCLUDED.assists, clean_sheets = EXCLUDED.clean_sheets, appearances = EXCLUDED.appearances",
        )
        .bind(&player.id)
        .bind(zone_id)
        .bind(&player.name)
        .bind(&player.team_id)
        .bind(player.position.to_string())
        .bind(to_db_int(player.counters.assists)?)
        .bind(to_db_int(player.counters.clean_sheets)?)
        .bind(to_db_int(player.counters.appearances)?)
        .bind(player.created_at)
        .execute(&mut *conn)
        .await
        .map_err(database_error)?;
    }
    Ok(())
}

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "Zone database operation failed");
    AppError::DatabaseError(e.to_string())
}

fn to_db_int<T>(value: T) -> Result<i32, AppError>
where
    T: TryInto<i32> + Copy + std::fmt::Display,
{
    value
        .try_into()
        .map_err(|_| AppError::DatabaseError(format!("Value {} does not fit in INTEGER", value)))
}

fn from_db_int<T>(value: i32, column: &str) -> Result<T, AppError>
where
    T: TryFrom<i32>,
{
    T::try_from(value)
        .map_err(|_| AppError::DatabaseError(format!("Column {} holds out-of-range {}", column, value)))
}

fn fixture_from_row(row: &PgRow) -> Result<Fixture, AppError> {
    let home_score: Option<i32> = row.get("home_score");
    let away_score: Option<i32> = row.get("away_score");

    Ok(Fixture {
        id: row.get("id"),
        zone_id: row.get("zone_id"),
        matchweek: from_db_int(row.get("matchweek"), "matchweek")?,
        home_team_id: row.get("home_team_id"),
        away_team_id: row.get("away_team_id"),
        date: row.get("match_date"),
        venue: row.get("venue"),
        home_score: home_score
            .map(|score| from_db_int(score, "home_score"))
            .transpose()?,
        away_score: away_score
            .map(|score| from_db_int(score, "away_score"))
            .transpose()?,
        played: row.get("played"),
        goals: Vec::new(),
    })
}

fn goal_from_row(row: &PgRow) -> Result<GoalEvent, AppError> {
    let minute: Option<i32> = row.get("minute");

    Ok(GoalEvent {
        id: row.get("id"),
        fixture_id: row.get("fixture_id"),
        player_id: row.get("player_id"),
        team_id: row.get("team_id"),
        minute: minute
            .map(|minute| from_db_int(minute, "minute"))
            .transpose()?,
    })
}

fn player_from_row(row: &PgRow) -> Result<Player, AppError> {
    let position: String = row.get("position");
    let position = Position::from_str(&position)
        .map_err(|_| AppError::DatabaseError(format!("Unknown position '{}'", position)))?;

    Ok(Player {
        id: row.get("id"),
        zone_id: row.get("zone_id"),
        name: row.get("name"),
        team_id: row.get("team_id"),
        position,
        created_at: row.get("created_at"),
        counters: PlayerCounters {
            assists: from_db_int(row.get("assists"), "assists")?,
            clean_sheets: from_db_int(row.get("clean_sheets"), "clean_sheets")?,
            appearances: from_db_int(row.get("appearances"), "appearances")?,
        },
    })
}
