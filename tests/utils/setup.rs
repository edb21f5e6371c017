use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;

use league_manager::{
    app,
    zone::types::{PlayerCreateRequest, TeamCreateRequest},
    AppState, Fixture, InMemoryZoneRepository, Player, PolicyKind, Position, Team, ZoneService,
    ZONES,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct LeagueSetup {
    pub zone_id: String,
    pub service: Arc<ZoneService>,
    pub router: Router,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub fixtures: Vec<Fixture>,
}

pub struct LeagueSetupBuilder {
    zone_id: String,
    teams: Vec<String>,
    players: Vec<(String, String)>,
    policy: PolicyKind,
    start_date: Option<NaiveDate>,
}

impl LeagueSetupBuilder {
    pub fn new() -> Self {
        Self {
            zone_id: ZONES[0].id.to_string(),
            teams: vec![],
            players: vec![],
            policy: PolicyKind::Balanced,
            start_date: None,
        }
    }

    pub fn in_zone(mut self, zone_id: &str) -> Self {
        self.zone_id = zone_id.to_string();
        self
    }

    pub fn with_teams(mut self, teams: Vec<&str>) -> Self {
        self.teams = teams.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_four_teams(self) -> Self {
        self.with_teams(vec!["W", "X", "Y", "Z"])
    }

    /// Registers a forward for the named team
    pub fn with_player(mut self, name: &str, team: &str) -> Self {
        self.players.push((name.to_string(), team.to_string()));
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn scheduled_from(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub async fn build(self) -> LeagueSetup {
        let repository = Arc::new(InMemoryZoneRepository::new());
        let state = AppState::new(repository, self.policy);
        let service = Arc::clone(&state.zone_service);

        let mut teams = Vec::new();
        for name in &self.teams {
            let team = service
                .add_team(
                    &self.zone_id,
                    TeamCreateRequest {
                        name: name.clone(),
                        home_ground: format!("{} Ground", name),
                        logo_url: None,
                    },
                )
                .await
                .unwrap();
            teams.push(team);
        }

        let mut players = Vec::new();
        for (name, team_name) in &self.players {
            let team = teams.iter().find(|t| &t.name == team_name).unwrap();
            let player = service
                .add_player(
                    &self.zone_id,
                    PlayerCreateRequest {
                        name: name.clone(),
                        team_id: team.id.clone(),
                        position: Position::Forward,
                    },
                )
                .await
                .unwrap();
            players.push(player);
        }

        let fixtures = match self.start_date {
            Some(start_date) => service
                .generate_schedule(&self.zone_id, start_date, None)
                .await
                .unwrap(),
            None => vec![],
        };

        LeagueSetup {
            zone_id: self.zone_id,
            router: app(state),
            service,
            teams,
            players,
            fixtures,
        }
    }
}

impl Default for LeagueSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
