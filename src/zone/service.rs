use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{info, instrument, warn};

use super::{
    repository::ZoneRepository,
    types::{
        BandedStanding, MatchweekFixtures, OverviewResponse, PlayerCreateRequest,
        TeamCreateRequest, TeamUpdateRequest, ZoneResponse, ZoneSnapshotResponse,
    },
};
use crate::league::{Fixture, Player, PlayerCounters, Team, Zone, ZoneSnapshot, ZONES};
use crate::results::{self, ResultEntry};
use crate::schedule::{fixtures_by_matchweek, generate_fixtures, PolicyKind, SeasonOverview};
use crate::shared::AppError;
use crate::standings::{
    compute_player_stats, compute_standings, summarize_season, top_scorers, PlayerStats,
    TableBand, TeamStanding,
};

/// Zone-scoped league operations.
///
/// Every mutation loads the zone, changes it and saves it back while holding the
/// zone's lock, so two writers in the same zone never interleave.
pub struct ZoneService {
    repository: Arc<dyn ZoneRepository + Send + Sync>,
    default_policy: PolicyKind,
    zone_mutexes: Arc<RwLock<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl ZoneService {
    pub fn new(
        repository: Arc<dyn ZoneRepository + Send + Sync>,
        default_policy: PolicyKind,
    ) -> Self {
        Self {
            repository,
            default_policy,
            zone_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn list_zones(&self) -> Vec<ZoneResponse> {
        ZONES.iter().copied().map(ZoneResponse::from).collect()
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self, zone_id: &str) -> Result<ZoneSnapshotResponse, AppError> {
        let zone = find_zone(zone_id)?;
        let snapshot = self.repository.load_snapshot(zone_id).await?;

        Ok(ZoneSnapshotResponse {
            zone: zone.into(),
            snapshot,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn add_team(
        &self,
        zone_id: &str,
        request: TeamCreateRequest,
    ) -> Result<Team, AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        if snapshot.has_schedule() {
            return Err(AppError::Conflict(
                "Reset the schedule before adding teams".to_string(),
            ));
        }

        let name = required("Team name", &request.name)?;
        let home_ground = required("Home ground", &request.home_ground)?;
        ensure_unique_team_name(&snapshot, &name, None)?;

        let team = Team::new(zone_id, name, home_ground, normalize_logo(request.logo_url));
        snapshot.teams.push(team.clone());
        self.repository.save_teams(zone_id, &snapshot.teams).await?;

        info!(zone_id = %zone_id, team_id = %team.id, team_name = %team.name, "Team added");
        Ok(team)
    }

    /// Renaming or moving a team also moves its unplayed home fixtures
    #[instrument(skip(self, request))]
    pub async fn update_team(
        &self,
        zone_id: &str,
        team_id: &str,
        request: TeamUpdateRequest,
    ) -> Result<Team, AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        let index = snapshot
            .teams
            .iter()
            .position(|team| team.id == team_id)
            .ok_or_else(|| team_not_found(team_id))?;

        let mut team = snapshot.teams[index].clone();
        if let Some(name) = &request.name {
            let name = required("Team name", name)?;
            ensure_unique_team_name(&snapshot, &name, Some(team_id))?;
            team.name = name;
        }

        let mut ground_changed = false;
        if let Some(home_ground) = &request.home_ground {
            let home_ground = required("Home ground", home_ground)?;
            ground_changed = home_ground != team.home_ground;
            team.home_ground = home_ground;
        }

        if request.logo_url.is_some() {
            team.logo_url = normalize_logo(request.logo_url);
        }

        snapshot.teams[index] = team.clone();

        if ground_changed && snapshot.has_schedule() {
            for fixture in snapshot
                .fixtures
                .iter_mut()
                .filter(|f| f.home_team_id == team_id && !f.played)
            {
                fixture.venue = team.home_ground.clone();
            }
            self.repository
                .save_season(zone_id, &snapshot.teams, &snapshot.fixtures)
                .await?;
        } else {
            self.repository.save_teams(zone_id, &snapshot.teams).await?;
        }

        info!(zone_id = %zone_id, team_id = %team_id, "Team updated");
        Ok(team)
    }

    #[instrument(skip(self))]
    pub async fn delete_team(&self, zone_id: &str, team_id: &str) -> Result<(), AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        if snapshot.team(team_id).is_none() {
            return Err(team_not_found(team_id));
        }
        if snapshot.has_schedule() {
            return Err(AppError::Conflict(
                "Reset the schedule before removing teams".to_string(),
            ));
        }
        if snapshot.players.iter().any(|p| p.team_id == team_id) {
            return Err(AppError::Conflict(
                "Team still has registered players".to_string(),
            ));
        }

        snapshot.teams.retain(|team| team.id != team_id);
        self.repository.save_teams(zone_id, &snapshot.teams).await?;

        info!(zone_id = %zone_id, team_id = %team_id, "Team deleted");
        Ok(())
    }

    #[instrument(skip(self, request))]
    pub async fn add_player(
        &self,
        zone_id: &str,
        request: PlayerCreateRequest,
    ) -> Result<Player, AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        let name = required("Player name", &request.name)?;
        if snapshot.team(&request.team_id).is_none() {
            return Err(AppError::Validation(format!(
                "Team {} is not part of this zone",
                request.team_id
            )));
        }

        let player = Player::new(zone_id, name, request.team_id, request.position);
        snapshot.players.push(player.clone());
        self.repository
            .save_players(zone_id, &snapshot.players)
            .await?;

        info!(zone_id = %zone_id, player_id = %player.id, team_id = %player.team_id, "Player added");
        Ok(player)
    }

    /// Recorded goals keep pointing at the removed player
    #[instrument(skip(self))]
    pub async fn delete_player(&self, zone_id: &str, player_id: &str) -> Result<(), AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        if snapshot.player(player_id).is_none() {
            return Err(player_not_found(player_id));
        }

        snapshot.players.retain(|player| player.id != player_id);
        self.repository
            .save_players(zone_id, &snapshot.players)
            .await?;

        info!(zone_id = %zone_id, player_id = %player_id, "Player deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_player_counters(
        &self,
        zone_id: &str,
        player_id: &str,
        counters: PlayerCounters,
    ) -> Result<Player, AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        let player = snapshot
            .players
            .iter_mut()
            .find(|player| player.id == player_id)
            .ok_or_else(|| player_not_found(player_id))?;
        player.counters = counters;
        let updated = player.clone();

        self.repository
            .save_players(zone_id, &snapshot.players)
            .await?;
        Ok(updated)
    }

    /// Replaces the zone's schedule with a fresh double round robin
    #[instrument(skip(self))]
    pub async fn generate_schedule(
        &self,
        zone_id: &str,
        start_date: NaiveDate,
        policy: Option<PolicyKind>,
    ) -> Result<Vec<Fixture>, AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let snapshot = self.repository.load_snapshot(zone_id).await?;
        if snapshot.teams.len() < 2 {
            return Err(AppError::Validation(
                "At least two teams are needed to generate fixtures".to_string(),
            ));
        }
        if snapshot.has_played_fixtures() {
            warn!(zone_id = %zone_id, "Refusing to regenerate a schedule with results");
            return Err(AppError::Conflict(
                "Schedule already has results; reset it first".to_string(),
            ));
        }

        let policy = policy.unwrap_or(self.default_policy);
        let fixtures = generate_fixtures(&snapshot.teams, start_date, policy.policy().as_ref());
        self.repository.save_fixtures(zone_id, &fixtures).await?;

        info!(
            zone_id = %zone_id,
            fixtures = fixtures.len(),
            policy = %policy,
            start_date = %start_date,
            "Schedule generated"
        );
        Ok(fixtures)
    }

    #[instrument(skip(self))]
    pub async fn reset_schedule(&self, zone_id: &str) -> Result<(), AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        self.repository.save_fixtures(zone_id, &[]).await?;
        info!(zone_id = %zone_id, "Schedule reset");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn fixtures(
        &self,
        zone_id: &str,
        matchweek: Option<u32>,
    ) -> Result<Vec<Fixture>, AppError> {
        let snapshot = self.load(zone_id).await?;

        Ok(snapshot
            .fixtures
            .into_iter()
            .filter(|fixture| matchweek.map_or(true, |mw| fixture.matchweek == mw))
            .collect())
    }

    /// Fixtures grouped into matchweeks, earliest first
    #[instrument(skip(self))]
    pub async fn calendar(&self, zone_id: &str) -> Result<Vec<MatchweekFixtures>, AppError> {
        let snapshot = self.load(zone_id).await?;

        Ok(fixtures_by_matchweek(&snapshot.fixtures)
            .into_iter()
            .filter_map(|(matchweek, fixtures)| {
                let date = fixtures.first()?.date;
                Some(MatchweekFixtures {
                    matchweek,
                    date,
                    fixtures: fixtures.into_iter().cloned().collect(),
                })
            })
            .collect())
    }

    /// Goal scorers must be registered players of the team they are credited to
    #[instrument(skip(self, entry))]
    pub async fn record_result(
        &self,
        zone_id: &str,
        fixture_id: &str,
        entry: ResultEntry,
    ) -> Result<Fixture, AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        let index = fixture_index(&snapshot, fixture_id)?;

        let updated = results::record_result(&snapshot.fixtures[index], &entry)?;
        for goal in &updated.goals {
            let Some(player_id) = goal.player_id.as_deref() else {
                continue;
            };
            match snapshot.player(player_id) {
                Some(player) if player.team_id == goal.team_id => {}
                Some(_) => {
                    return Err(AppError::Validation(format!(
                        "Player {} does not play for team {}",
                        player_id, goal.team_id
                    )))
                }
                None => {
                    return Err(AppError::Validation(format!(
                        "Unknown goal scorer {}",
                        player_id
                    )))
                }
            }
        }

        snapshot.fixtures[index] = updated.clone();
        self.repository
            .save_fixtures(zone_id, &snapshot.fixtures)
            .await?;

        info!(
            zone_id = %zone_id,
            fixture_id = %fixture_id,
            home_score = entry.home_score,
            away_score = entry.away_score,
            "Result recorded"
        );
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn clear_result(&self, zone_id: &str, fixture_id: &str) -> Result<Fixture, AppError> {
        find_zone(zone_id)?;
        let zone_lock = self.zone_lock(zone_id).await;
        let _guard = zone_lock.lock().await;

        let mut snapshot = self.repository.load_snapshot(zone_id).await?;
        let index = fixture_index(&snapshot, fixture_id)?;

        let cleared = results::clear_result(&snapshot.fixtures[index]);
        snapshot.fixtures[index] = cleared.clone();
        self.repository
            .save_fixtures(zone_id, &snapshot.fixtures)
            .await?;

        info!(zone_id = %zone_id, fixture_id = %fixture_id, "Result cleared");
        Ok(cleared)
    }

    #[instrument(skip(self))]
    pub async fn standings(&self, zone_id: &str) -> Result<Vec<TeamStanding>, AppError> {
        let snapshot = self.load(zone_id).await?;
        Ok(compute_standings(&snapshot.teams, &snapshot.fixtures))
    }

    #[instrument(skip(self))]
    pub async fn player_stats(&self, zone_id: &str) -> Result<Vec<PlayerStats>, AppError> {
        let snapshot = self.load(zone_id).await?;
        Ok(compute_player_stats(
            &snapshot.players,
            &snapshot.fixtures,
            &snapshot.teams,
        ))
    }

    #[instrument(skip(self))]
    pub async fn top_scorers(&self, zone_id: &str) -> Result<Vec<PlayerStats>, AppError> {
        let stats = self.player_stats(zone_id).await?;
        Ok(top_scorers(&stats))
    }

    #[instrument(skip(self))]
    pub async fn overview(&self, zone_id: &str) -> Result<OverviewResponse, AppError> {
        let zone = find_zone(zone_id)?;
        let snapshot = self.repository.load_snapshot(zone_id).await?;

        let season = if snapshot.has_schedule() {
            SeasonOverview::from_fixtures(snapshot.teams.len(), &snapshot.fixtures)
        } else {
            SeasonOverview::for_team_count(snapshot.teams.len())
        };
        let stats = compute_player_stats(&snapshot.players, &snapshot.fixtures, &snapshot.teams);
        let summary = summarize_season(&snapshot.fixtures, &stats);

        let team_count = snapshot.teams.len();
        let table = compute_standings(&snapshot.teams, &snapshot.fixtures)
            .into_iter()
            .map(|standing| BandedStanding {
                band: TableBand::for_position(standing.position, team_count),
                standing,
            })
            .collect();

        Ok(OverviewResponse {
            zone: zone.into(),
            season,
            summary,
            table,
        })
    }

    async fn load(&self, zone_id: &str) -> Result<ZoneSnapshot, AppError> {
        find_zone(zone_id)?;
        self.repository.load_snapshot(zone_id).await
    }

    async fn zone_lock(&self, zone_id: &str) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.zone_mutexes.read().await;
            if let Some(lock) = guard.get(zone_id) {
                return lock.clone();
            }
        }

        let mut guard = self.zone_mutexes.write().await;
        guard
            .entry(zone_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

fn find_zone(zone_id: &str) -> Result<Zone, AppError> {
    Zone::find(zone_id).ok_or_else(|| AppError::NotFound(format!("Zone {} not found", zone_id)))
}

fn team_not_found(team_id: &str) -> AppError {
    AppError::NotFound(format!("Team {} not found", team_id))
}

fn player_not_found(player_id: &str) -> AppError {
    AppError::NotFound(format!("Player {} not found", player_id))
}

fn fixture_index(snapshot: &ZoneSnapshot, fixture_id: &str) -> Result<usize, AppError> {
    snapshot
        .fixtures
        .iter()
        .position(|fixture| fixture.id == fixture_id)
        .ok_or_else(|| AppError::NotFound(format!("Fixture {} not found", fixture_id)))
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn ensure_unique_team_name(
    snapshot: &ZoneSnapshot,
    name: &str,
    except_team_id: Option<&str>,
) -> Result<(), AppError> {
    let taken = snapshot.teams.iter().any(|team| {
        Some(team.id.as_str()) != except_team_id && team.name.eq_ignore_ascii_case(name)
    });
    if taken {
        return Err(AppError::Conflict(format!(
            "A team named {} already exists",
            name
        )));
    }
    Ok(())
}

fn normalize_logo(logo_url: Option<String>) -> Option<String> {
    logo_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}
