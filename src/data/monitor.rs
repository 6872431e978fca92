//! Game-monitor service API client
//!
//! This module fetches the XML status document for a single game server from
//! the monitoring service and reshapes it into our `ServerRecord` structure.
//! The raw document nests the player list inside the player-count block and
//! reports server variables as a list of name/value pairs; both are flattened
//! here so cached records are directly usable.

use std::collections::BTreeMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{GameInfo, Player, PlayerCount, ServerRecord};

/// Query endpoint of the monitoring service
const GAME_MONITOR_BASE_URL: &str = "http://www.game-monitor.com/client/server-xml.php";

/// Errors that can occur when fetching server status
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Host or port missing at fetch time
    #[error("host and port are required")]
    MissingTarget,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Response body was empty
    #[error("empty response body")]
    EmptyBody,

    /// Response body was not valid status XML
    #[error("failed to parse XML response: {0}")]
    ParseError(#[from] quick_xml::DeError),
}

/// Raw `<server>` document as returned by the service, before reshaping
#[derive(Debug, Clone, Deserialize)]
pub struct RawServer {
    /// Server name
    pub name: Option<String>,
    /// Current map
    pub map: Option<String>,
    /// Game identification block
    pub game: Option<GameInfo>,
    /// Player-count block, with the player list nested inside it
    pub players: Option<RawPlayers>,
    /// Variable list, present when the request asked for rules
    pub variables: Option<RawVariables>,
}

/// Raw player-count block: counts plus the nested player list
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayers {
    /// Players currently connected
    pub current: Option<u32>,
    /// Server slot capacity
    pub max: Option<u32>,
    /// Nested player entries; one XML element per player, so a single player
    /// yields a one-element list and no players an empty one
    #[serde(rename = "player", default)]
    pub player: Vec<RawPlayer>,
}

/// One raw player entry
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    /// Player name
    pub name: Option<String>,
    /// Score, if reported
    pub score: Option<i64>,
    /// Connection time, if reported
    pub time: Option<String>,
}

/// Raw variable list wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct RawVariables {
    /// Name/value pairs, one element per variable
    #[serde(rename = "variable", default)]
    pub variable: Vec<RawVariable>,
}

/// One raw name/value variable pair
#[derive(Debug, Clone, Deserialize)]
pub struct RawVariable {
    /// Variable name
    pub name: Option<String>,
    /// Variable value
    pub value: Option<String>,
}

/// Capability of fetching the raw status document for one server
///
/// Implemented by [`MonitorClient`] for real HTTP access; tests supply stub
/// implementations to exercise the caching client without a network.
pub trait FetchStatus {
    /// Fetches and parses the raw status document for `host:port`.
    fn fetch_raw(
        &self,
        host: &str,
        port: u16,
    ) -> impl Future<Output = Result<RawServer, MonitorError>> + Send;
}

/// HTTP client for the monitoring service's XML endpoint
#[derive(Debug, Clone)]
pub struct MonitorClient {
    client: Client,
    base_url: String,
}

impl Default for MonitorClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorClient {
    /// Create a new MonitorClient against the public service endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: GAME_MONITOR_BASE_URL.to_string(),
        }
    }

    /// Create a new MonitorClient with a custom endpoint URL
    ///
    /// Useful for testing against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the request URL for the given target.
    ///
    /// `rules=1` asks the service to include server variables in the response.
    fn request_url(&self, host: &str, port: u16) -> String {
        format!("{}?rules=1&ip={}:{}", self.base_url, host, port)
    }
}

impl FetchStatus for MonitorClient {
    async fn fetch_raw(&self, host: &str, port: u16) -> Result<RawServer, MonitorError> {
        if host.is_empty() {
            return Err(MonitorError::MissingTarget);
        }

        let url = self.request_url(host, port);
        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;

        parse_body(&text)
    }
}

/// Parses a response body into the raw document structure.
///
/// An empty (or whitespace-only) body is reported as [`MonitorError::EmptyBody`];
/// a non-empty body that is not valid XML is a [`MonitorError::ParseError`]. The
/// caching client treats both the same way as a transport failure.
pub fn parse_body(body: &str) -> Result<RawServer, MonitorError> {
    if body.trim().is_empty() {
        return Err(MonitorError::EmptyBody);
    }

    let raw: RawServer = quick_xml::de::from_str(body)?;
    Ok(raw)
}

/// Reshapes a raw document into a normalized [`ServerRecord`].
///
/// Extraction rules:
/// - `count` takes the counts from the raw player-count block; the player list
///   nested inside that block is pulled out into `players` and not retained in
///   the count.
/// - `variables` flattens the raw name/value pairs into a direct lookup map;
///   pairs without a name are dropped.
/// - `updated` and `schema_version` are stamped from the caller.
pub fn reshape(
    raw: RawServer,
    host: &str,
    port: u16,
    now: DateTime<Utc>,
    schema_version: &str,
) -> ServerRecord {
    let (count, players) = match raw.players {
        Some(block) => {
            let count = PlayerCount {
                current: block.current.unwrap_or(block.player.len() as u32),
                max: block.max.unwrap_or(0),
            };
            let players = block
                .player
                .into_iter()
                .map(|p| Player {
                    name: p.name.unwrap_or_default(),
                    score: p.score,
                    time: p.time,
                })
                .collect();
            (count, players)
        }
        None => (PlayerCount::default(), Vec::new()),
    };

    let mut variables = BTreeMap::new();
    if let Some(block) = raw.variables {
        for var in block.variable {
            if let Some(name) = var.name {
                variables.insert(name, var.value.unwrap_or_default());
            }
        }
    }

    ServerRecord {
        ip: host.to_string(),
        port,
        name: raw.name,
        map: raw.map,
        game: raw.game,
        count,
        players,
        variables,
        updated: now,
        schema_version: schema_version.to_string(),
    }
}
