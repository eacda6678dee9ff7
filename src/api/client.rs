use std::collections::BTreeSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, info};

use super::transport::ConvocationApi;
use crate::domain::{Game, GameId, MatchState, NewPlayer, Player, PlayerId, UserScope};
use crate::filter::{filter_by_scope, ScopeFilter};

/// Client for the Team Tracker REST backend.
///
/// Attaches the configured bearer token to every request; unauthenticated
/// use is allowed, the backend decides per endpoint.
#[derive(Clone)]
pub struct TeamTrackerApi {
    http: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct IdBatch<'a> {
    ids: &'a BTreeSet<PlayerId>,
}

impl TeamTrackerApi {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(TeamTrackerApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let mut req = self.http.request(method, &url);
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn check(resp: Response, what: &str) -> Result<Response> {
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Team Tracker API error on {} ({}): {}", what, status, body);
        }
        Ok(resp)
    }

    /// The authenticated user's scope (club/age-group, possibly "Todos").
    pub async fn fetch_user_scope(&self) -> Result<UserScope> {
        let resp = self
            .request(Method::GET, "/api/auth/me")
            .send()
            .await
            .context("User info request failed")?;
        Self::check(resp, "user info")
            .await?
            .json()
            .await
            .context("Failed to parse user info")
    }

    /// The full player roster, unscoped.
    pub async fn list_players(&self) -> Result<Vec<Player>> {
        let resp = self
            .request(Method::GET, "/api/jogadores")
            .send()
            .await
            .context("Player list request failed")?;
        Self::check(resp, "player list")
            .await?
            .json()
            .await
            .context("Failed to parse player list")
    }

    /// Register a new player; the backend assigns the id.
    pub async fn create_player(&self, new_player: &NewPlayer) -> Result<Player> {
        let resp = self
            .request(Method::POST, "/api/jogadores")
            .json(new_player)
            .send()
            .await
            .context("Player creation request failed")?;
        let player: Player = Self::check(resp, "player creation")
            .await?
            .json()
            .await
            .context("Failed to parse created player")?;
        info!("Player created: {} {} (id {})", player.number, player.name, player.id);
        Ok(player)
    }

    pub async fn delete_player(&self, id: PlayerId) -> Result<()> {
        let resp = self
            .request(Method::DELETE, &format!("/api/jogadores/{}", id))
            .send()
            .await
            .context("Player removal request failed")?;
        Self::check(resp, "player removal").await?;
        info!("Player {} removed", id);
        Ok(())
    }

    /// All scheduled matches, unscoped.
    pub async fn list_games(&self) -> Result<Vec<Game>> {
        let resp = self
            .request(Method::GET, "/api/jogos")
            .send()
            .await
            .context("Match list request failed")?;
        Self::check(resp, "match list")
            .await?
            .json()
            .await
            .context("Failed to parse match list")
    }

    pub async fn fetch_game(&self, id: GameId) -> Result<Game> {
        let resp = self
            .request(Method::GET, &format!("/api/jogos/{}", id))
            .send()
            .await
            .context("Match request failed")?;
        Self::check(resp, "match")
            .await?
            .json()
            .await
            .context("Failed to parse match")
    }
}

#[async_trait]
impl ConvocationApi for TeamTrackerApi {
    /// The backend's roster listing is unscoped; eligibility is derived by
    /// scoping the full roster client-side.
    async fn fetch_eligible_players(&self, age_group: &str, club: &str) -> Result<Vec<Player>> {
        let players = self.list_players().await?;
        let total = players.len();
        let eligible = filter_by_scope(&players, &ScopeFilter::new(age_group, club));
        debug!(
            "{} of {} players eligible for {}/{}",
            eligible.len(),
            total,
            age_group,
            club
        );
        Ok(eligible)
    }

    async fn fetch_convoked(&self, game_id: GameId) -> Result<Vec<Player>> {
        let resp = self
            .request(Method::GET, &format!("/api/jogos/{}/convocados", game_id))
            .send()
            .await
            .context("Convocation fetch failed")?;
        Self::check(resp, "convocation")
            .await?
            .json()
            .await
            .context("Failed to parse convocation")
    }

    async fn remove_convoked(&self, game_id: GameId, ids: &BTreeSet<PlayerId>) -> Result<()> {
        let resp = self
            .request(Method::DELETE, &format!("/api/jogos/{}/convocados", game_id))
            .json(&IdBatch { ids })
            .send()
            .await
            .context("Convocation removal batch failed")?;
        Self::check(resp, "convocation removal").await?;
        Ok(())
    }

    async fn add_convoked(&self, game_id: GameId, ids: &BTreeSet<PlayerId>) -> Result<()> {
        let resp = self
            .request(Method::POST, &format!("/api/jogos/{}/convocados", game_id))
            .json(&IdBatch { ids })
            .send()
            .await
            .context("Convocation addition batch failed")?;
        Self::check(resp, "convocation addition").await?;
        Ok(())
    }

    async fn set_match_state(&self, game_id: GameId, state: MatchState) -> Result<()> {
        let resp = self
            .request(Method::PUT, &format!("/api/jogos/{}/estado", game_id))
            .json(&state)
            .send()
            .await
            .context("Match state request failed")?;
        Self::check(resp, "match state").await?;
        info!("Game {} state set to {}", game_id, state);
        Ok(())
    }
}
