//! Client facade and cache-freshness policy
//!
//! `GameMonitor` is the public entry point: construct it with options, then
//! call `query`. Each query consults the cache first, fetches from the
//! monitoring service only when the cached record is missing or stale, and
//! falls back to whatever the cache holds when the fetch fails. The contract
//! is best-effort and never-throw: every failure mode resolves to a record, a
//! stale record, or `None`.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;

use crate::cache::CacheStore;
use crate::data::monitor::{reshape, FetchStatus, MonitorClient};
use crate::data::{cache_key, ServerRecord};
use crate::log::{DebugLevel, DebugLog};

/// Version tag stamped into every record this client writes
///
/// A cached record whose tag differs was written by an incompatible client
/// build and is refetched regardless of age.
pub const SCHEMA_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default record TTL in seconds
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Filename used when no XDG cache directory can be determined
const FALLBACK_CACHE_FILE: &str = "gamemon_servers.json";

/// Freshness classification of a cache lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No cached record for this key
    Miss,
    /// Cached record is within TTL and version-compatible
    Fresh,
    /// Cached record is older than the TTL
    StaleAge,
    /// Cached record was written by an incompatible client version
    StaleVersion,
}

/// Classifies a cache lookup result against the TTL and schema version.
///
/// A version mismatch wins over age: such records are stale no matter how
/// recently they were fetched.
pub fn assess(
    cached: Option<&ServerRecord>,
    ttl: Duration,
    schema_version: &str,
    now: DateTime<Utc>,
) -> Freshness {
    let Some(record) = cached else {
        return Freshness::Miss;
    };

    if record.schema_version != schema_version {
        return Freshness::StaleVersion;
    }

    // Compared in std time so arbitrarily large TTLs never overflow. A record
    // stamped ahead of the current clock has negative age and cannot be older
    // than any TTL.
    match now.signed_duration_since(record.updated).to_std() {
        Ok(age) if age > ttl => Freshness::StaleAge,
        _ => Freshness::Fresh,
    }
}

/// Construction options for [`GameMonitor`]
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Host used when `query` is called without one
    pub default_host: Option<String>,
    /// Port used when `query` is called without one
    pub default_port: Option<u16>,
    /// How long a cached record is served without a network call
    pub cache_ttl: Duration,
    /// Cache document path; `None` selects the platform default
    pub cache_path: Option<PathBuf>,
    /// Diagnostic sink; disabled by default
    pub debug_log: DebugLog,
    /// Version tag compared against cached records
    pub schema_version: String,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            default_host: None,
            default_port: None,
            cache_ttl: DEFAULT_TTL,
            cache_path: None,
            debug_log: DebugLog::disabled(),
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}

impl MonitorOptions {
    /// Sets the default target queried when `query` receives no arguments
    pub fn with_target(mut self, host: impl Into<String>, port: u16) -> Self {
        self.default_host = Some(host.into());
        self.default_port = Some(port);
        self
    }

    /// Sets the cache TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the cache document path
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Enables debug logging to `path` at the given verbosity
    pub fn with_debug_log(mut self, path: impl Into<PathBuf>, level: DebugLevel) -> Self {
        self.debug_log = DebugLog::to_file(path, level);
        self
    }

    /// Overrides the schema version tag
    ///
    /// Primarily useful in tests; the default is the crate version.
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = version.into();
        self
    }
}

/// Returns the platform cache document path (`~/.cache/gamemon/servers.json`
/// on Linux), falling back to a fixed filename in the working directory.
fn default_cache_path() -> PathBuf {
    match ProjectDirs::from("", "", "gamemon") {
        Some(dirs) => dirs.cache_dir().join("servers.json"),
        None => PathBuf::from(FALLBACK_CACHE_FILE),
    }
}

/// Caching client for the game-monitor status service
///
/// Generic over the fetch capability so tests can exercise the freshness and
/// fallback policy without a network; production code uses [`MonitorClient`].
#[derive(Debug)]
pub struct GameMonitor<F = MonitorClient> {
    default_host: Option<String>,
    default_port: Option<u16>,
    cache_ttl: Duration,
    schema_version: String,
    store: CacheStore,
    fetcher: F,
    log: DebugLog,
}

impl GameMonitor<MonitorClient> {
    /// Creates a client with the given options and the real HTTP fetcher.
    ///
    /// The cache document is loaded once here; a missing or unparsable
    /// document starts the client with an empty cache.
    pub fn new(options: MonitorOptions) -> Self {
        Self::with_fetcher(options, MonitorClient::new())
    }
}

impl<F: FetchStatus> GameMonitor<F> {
    /// Creates a client with a custom fetch implementation
    pub fn with_fetcher(options: MonitorOptions, fetcher: F) -> Self {
        let cache_path = options.cache_path.unwrap_or_else(default_cache_path);
        let store = CacheStore::load(cache_path);

        Self {
            default_host: options.default_host,
            default_port: options.default_port,
            cache_ttl: options.cache_ttl,
            schema_version: options.schema_version,
            store,
            fetcher,
            log: options.debug_log,
        }
    }

    /// Queries the status of one server.
    ///
    /// `host` and `port` fall back to the constructor defaults; if neither
    /// source yields both, the query resolves to `None` without a network
    /// call. A fresh cached record is returned directly. Otherwise the
    /// service is queried: on success the reshaped record is persisted and
    /// returned; on failure any previously cached record for the key is
    /// returned as-is, and `None` only when the cache holds nothing.
    pub async fn query(&mut self, host: Option<&str>, port: Option<u16>) -> Option<ServerRecord> {
        // An empty host argument counts as absent, so the default still applies
        let host = host.filter(|h| !h.is_empty());
        let host = match host.or(self.default_host.as_deref()) {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => {
                self.log
                    .emit(DebugLevel::Error, "query without host; no default configured");
                return None;
            }
        };
        let Some(port) = port.or(self.default_port) else {
            self.log
                .emit(DebugLevel::Error, "query without port; no default configured");
            return None;
        };

        let key = cache_key(&host, port);
        let now = Utc::now();

        match assess(self.store.get(&key), self.cache_ttl, &self.schema_version, now) {
            Freshness::Fresh => {
                self.log.emit(DebugLevel::Info, &format!("{}: served from cache", key));
                return self.store.get(&key).cloned();
            }
            Freshness::Miss => {
                self.log.emit(DebugLevel::Info, &format!("{}: cache miss", key));
            }
            Freshness::StaleAge => {
                self.log.emit(DebugLevel::Info, &format!("{}: cache entry expired", key));
            }
            Freshness::StaleVersion => {
                self.log.emit(
                    DebugLevel::Info,
                    &format!("{}: cache entry from incompatible client version", key),
                );
            }
        }

        match self.fetcher.fetch_raw(&host, port).await {
            Ok(raw) => {
                let record = reshape(raw, &host, port, now, &self.schema_version);
                if let Err(err) = self.store.put(&key, record.clone()) {
                    // Non-fatal: the fetched record is still returned
                    self.log
                        .emit(DebugLevel::Error, &format!("{}: cache write failed: {}", key, err));
                }
                self.log.emit(DebugLevel::Info, &format!("{}: refreshed from service", key));
                Some(record)
            }
            Err(err) => {
                self.log
                    .emit(DebugLevel::Error, &format!("{}: fetch failed: {}", key, err));
                match self.store.get(&key) {
                    Some(stale) => {
                        self.log
                            .emit(DebugLevel::Info, &format!("{}: serving stale fallback", key));
                        Some(stale.clone())
                    }
                    None => None,
                }
            }
        }
    }
}
