//! HTTP transport for the game server
//!
//! Every endpoint is a GET with the token and arguments packed into the
//! path. Bodies are JSON; decoding failures surface as protocol errors so
//! the driver can tell them apart from network trouble.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::api::transport::Transport;
use crate::core::config::BotConfig;
use crate::core::error::{BotError, Result};
use crate::core::types::{GameTime, Location, UnitIndex};
use crate::game::state::{GameState, MoveResponse, ResourcesResponse};

/// reqwest-backed [`Transport`]
pub struct HttpTransport {
    client: Client,
    game_server: String,
    token: String,
}

impl HttpTransport {
    /// Create a transport from the bot configuration
    pub fn new(config: &BotConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BotError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            game_server: config.game_server.clone(),
            token: config.token.clone(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.game_server, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Transport(format!("HTTP {} from {}", status, path_kind(path))));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;

        decode(&body)
    }
}

impl Transport for HttpTransport {
    async fn fetch_state(&self) -> Result<GameState> {
        self.call(&game_path(&self.token)).await
    }

    async fn move_unit(&self, unit: UnitIndex, to: Location) -> Result<MoveResponse> {
        self.call(&move_path(&self.token, unit, to)).await
    }

    async fn will_move(&self, unit: UnitIndex, to: Location, at: GameTime) -> Result<MoveResponse> {
        self.call(&will_move_path(&self.token, unit, to, at)).await
    }

    async fn fetch_resources(&self, ids: &[u32]) -> Result<ResourcesResponse> {
        self.call(&resources_path(&self.token, ids)).await
    }
}

/// Decode a response body, mapping failures to [`BotError::Protocol`]
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| BotError::Protocol(e.to_string()))
}

pub fn game_path(token: &str) -> String {
    format!("/api/game/{}", token)
}

pub fn move_path(token: &str, unit: UnitIndex, to: Location) -> String {
    format!("/api/move/{}/{}-{}-{}", token, unit.0, to.x, to.y)
}

pub fn will_move_path(token: &str, unit: UnitIndex, to: Location, at: GameTime) -> String {
    format!("/api/will_move/{}/{}-{}-{}-{}", token, unit.0, to.x, to.y, at)
}

pub fn resources_path(token: &str, ids: &[u32]) -> String {
    let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("/api/resources/{}/{}", token, joined.join("-"))
}

// Keeps the token out of error messages
fn path_kind(path: &str) -> &str {
    path.trim_start_matches("/api/")
        .split('/')
        .next()
        .unwrap_or("api")
}
