//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default listen port on localhost.
const DEFAULT_PORT: u16 = 3000;

/// Default snapshot cache TTL in seconds.
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Errors in server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("set STATIONS_URL or STATIONS_FILE to choose a station feed")]
    MissingFeed,

    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Where station data is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedConfig {
    /// Fetch `stations.geojson` over HTTP.
    Url(String),
    /// Read `stations.geojson` from a local file.
    File(PathBuf),
}

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Station feed.
    pub feed: FeedConfig,

    /// Optional disk cache file for the HTTP feed.
    pub disk_cache: Option<PathBuf>,

    /// How long the in-memory snapshot stays fresh.
    pub cache_ttl: Duration,

    /// Directory of static assets served under `/static`.
    pub static_dir: String,
}

impl ServerConfig {
    /// Create a config for the given feed with defaults for everything else.
    pub fn new(feed: FeedConfig) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            feed,
            disk_cache: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            static_dir: "static".to_string(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// `STATIONS_URL` wins when both it and `STATIONS_FILE` are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let feed = match (get("STATIONS_URL"), get("STATIONS_FILE")) {
            (Some(url), _) => FeedConfig::Url(url),
            (None, Some(path)) => FeedConfig::File(PathBuf::from(path)),
            (None, None) => return Err(ConfigError::MissingFeed),
        };

        let mut config = Self::new(feed);

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "BIND_ADDR",
                    message: e.to_string(),
                }
            })?;
        }

        if let Some(ttl) = get("CACHE_TTL_SECS") {
            let secs: u64 = ttl.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "CACHE_TTL_SECS",
                    message: e.to_string(),
                }
            })?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        config.disk_cache = get("STATIONS_CACHE_FILE").map(PathBuf::from);

        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = dir;
        }

        Ok(config)
    }
}
