//! Disk cache for the station feed.
//!
//! The cache file is the fetched FeatureCollection with a `cached_at`
//! foreign member, so it can also be served directly as `STATIONS_FILE`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Station, StationCollection};

use super::error::StationError;

const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    cached_at: DateTime<Utc>,
    #[serde(flatten)]
    collection: StationCollection,
}

/// Where the feed is cached and for how long.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    pub path: PathBuf,
    /// Age after which the cached feed is refetched (default 24 hours)
    pub ttl: Duration,
}

impl StationCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json")
    }
}

/// A cached copy of the station feed on disk.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// The cached stations, if the file exists, parses and is still fresh.
    pub fn load(&self) -> Option<Vec<Station>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let file: CacheFile = serde_json::from_str(&contents).ok()?;

        if !self.is_fresh(file.cached_at) {
            tracing::debug!(cached_at = %file.cached_at, "station cache expired");
            return None;
        }

        Some(file.collection.features)
    }

    /// A stamp in the future (clock skew, copied file) counts as age zero.
    fn is_fresh(&self, cached_at: DateTime<Utc>) -> bool {
        let age = Utc::now()
            .signed_duration_since(cached_at)
            .to_std()
            .unwrap_or_default();
        age < self.config.ttl
    }

    /// Write `stations` to the cache file, creating its directory if needed.
    pub fn save(&self, stations: &[Station]) -> Result<(), StationError> {
        let file = CacheFile {
            cached_at: Utc::now(),
            collection: StationCollection::new(stations.to_vec()),
        };

        if let Some(dir) = self.config.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir).map_err(|e| StationError::Cache {
                message: format!("failed to create {}: {}", dir.display(), e),
            })?;
        }

        let json = serde_json::to_string(&file).map_err(|e| StationError::Cache {
            message: e.to_string(),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| StationError::Cache {
            message: format!("failed to write {}: {}", self.config.path.display(), e),
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}
