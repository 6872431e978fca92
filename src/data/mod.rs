//! Core data models for the gamemon client
//!
//! This module contains the normalized server-status types stored in the cache
//! and returned to callers, plus the cache-key derivation shared by the cache
//! store and the client facade.

pub mod monitor;

pub use monitor::{MonitorClient, MonitorError};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized status snapshot for one game server
///
/// One record exists per (ip, port) pair. Records are created only by a
/// successful fetch from the monitoring service and are never evicted;
/// staleness is decided at read time from `updated` and `schema_version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Server address as queried
    pub ip: String,
    /// Server port as queried
    pub port: u16,
    /// Server name reported by the service, if any
    pub name: Option<String>,
    /// Current map, if reported
    pub map: Option<String>,
    /// Game identification, if reported
    pub game: Option<GameInfo>,
    /// Current and maximum player counts
    pub count: PlayerCount,
    /// Connected players, always a sequence (possibly empty)
    pub players: Vec<Player>,
    /// Server variables flattened into a name -> value lookup
    pub variables: BTreeMap<String, String>,
    /// When this record was last successfully fetched
    pub updated: DateTime<Utc>,
    /// Version tag of the client that wrote this record
    pub schema_version: String,
}

/// Game identification block passed through from the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Short game identifier (e.g. "cstrike")
    pub name: Option<String>,
    /// Game or protocol version string
    pub version: Option<String>,
}

/// Current and maximum player counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerCount {
    /// Players currently connected
    pub current: u32,
    /// Server slot capacity
    pub max: u32,
}

/// One connected player as reported by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Player name
    pub name: String,
    /// Score, if the game reports one
    pub score: Option<i64>,
    /// Connection time, if the game reports one
    pub time: Option<String>,
}

/// Derives the cache key for a (host, port) pair.
///
/// The key is `ip_<host>_<port>` with dots replaced by underscores so it is
/// safe as a serialization token. Well-formed IPv4 addresses cannot collide
/// after substitution; arbitrary hostnames containing underscores could, so
/// hosts should be validated upstream if hostnames are ever accepted.
pub fn cache_key(host: &str, port: u16) -> String {
    format!("ip_{}_{}", host.replace('.', "_"), port)
}
