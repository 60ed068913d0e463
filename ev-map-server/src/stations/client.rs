//! HTTP client for the published station GeoJSON.

use std::time::Duration;

use futures::future::BoxFuture;

use crate::domain::Station;

use super::cache::{StationCache, StationCacheConfig};
use super::error::StationError;
use super::source::{StationSource, Stations, parse_collection};

/// Configuration for the station feed client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Full URL of the `stations.geojson` FeatureCollection
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional disk cache in front of the feed
    pub cache: Option<StationCacheConfig>,
}

impl StationClientConfig {
    /// Create a new config for the given feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
            cache: None,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Serve from (and refresh) a disk cache file.
    pub fn with_cache(mut self, cache: StationCacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }
}

/// Client for the station GeoJSON feed.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    url: String,
    cache: Option<StationCache>,
}

impl StationClient {
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
            cache: config.cache.map(StationCache::new),
        })
    }

    /// Fetch all stations, preferring a fresh disk cache when configured.
    pub async fn fetch_all(&self) -> Result<Vec<Station>, StationError> {
        if let Some(cache) = &self.cache
            && let Some(stations) = cache.load()
        {
            tracing::debug!(path = %cache.path().display(), count = stations.len(), "served stations from disk cache");
            return Ok(stations);
        }

        let stations = self.fetch_remote().await?;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(&stations)
        {
            tracing::warn!(error = %e, "failed to write station disk cache");
        }

        Ok(stations)
    }

    /// Fetch all stations from the feed, bypassing any cache.
    pub async fn fetch_remote(&self) -> Result<Vec<Station>, StationError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StationError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let stations = parse_collection(&body)?;

        tracing::info!(url = %self.url, count = stations.len(), "fetched station feed");
        Ok(stations)
    }
}

impl StationSource for StationClient {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Stations, StationError>> {
        Box::pin(async move { StationClient::fetch_all(self).await.map(Stations::from) })
    }
}
