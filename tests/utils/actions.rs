use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use league_manager::{Fixture, GoalEntry, Player, ResultEntry, Team};

use super::setup::LeagueSetup;

impl LeagueSetup {
    pub fn team(&self, name: &str) -> &Team {
        self.teams
            .iter()
            .find(|team| team.name == name)
            .unwrap_or_else(|| panic!("no team named {}", name))
    }

    pub fn player(&self, name: &str) -> &Player {
        self.players
            .iter()
            .find(|player| player.name == name)
            .unwrap_or_else(|| panic!("no player named {}", name))
    }

    pub fn fixture(&self, home: &str, away: &str) -> &Fixture {
        let (home, away) = (self.team(home), self.team(away));
        self.fixtures
            .iter()
            .find(|f| f.home_team_id == home.id && f.away_team_id == away.id)
            .unwrap_or_else(|| panic!("no fixture {} v {}", home.name, away.name))
    }

    /// Records a score with one goal event per named scorer
    pub async fn record(
        &self,
        home: &str,
        away: &str,
        score: (u32, u32),
        scorers: &[&str],
    ) -> Fixture {
        let goals = scorers
            .iter()
            .map(|name| {
                let player = self.player(name);
                GoalEntry {
                    player_id: Some(player.id.clone()),
                    team_id: player.team_id.clone(),
                    minute: None,
                }
            })
            .collect();

        let fixture_id = self.fixture(home, away).id.clone();
        self.service
            .record_result(
                &self.zone_id,
                &fixture_id,
                ResultEntry {
                    home_score: score.0,
                    away_score: score.1,
                    goals,
                },
            )
            .await
            .unwrap()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> (StatusCode, T) {
        let request = Request::builder()
            .method("GET")
            .uri(format!("/zones/{}{}", self.zone_id, path))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, T) {
        let request = Request::builder()
            .method(method)
            .uri(format!("/zones/{}{}", self.zone_id, path))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: Request<Body>) -> (StatusCode, T) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }
}
