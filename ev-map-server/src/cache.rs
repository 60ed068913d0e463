//! In-memory caching of the station snapshot.
//!
//! The station feed is one large document that changes at most a few times a
//! day. Every page request needs the whole list, so we cache the entire
//! snapshot under a single key and let it expire on a TTL.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;

use crate::stations::{StationError, StationSource, Stations};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the cached snapshot.
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

/// Station source with snapshot caching.
///
/// Wraps another `StationSource`. Requests that miss at the same time share
/// one fetch, and every request gets the same snapshot without copying it.
/// Failed fetches are not cached, so the next request tries the inner source
/// again.
pub struct CachedStationSource<S> {
    inner: S,
    snapshot: MokaCache<(), Stations>,
}

impl<S: StationSource> CachedStationSource<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let snapshot = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { inner, snapshot }
    }

    /// The current station snapshot, fetching it if absent or expired.
    pub async fn snapshot(&self) -> Result<Stations, StationError> {
        self.snapshot
            .try_get_with((), async {
                let stations = self.inner.fetch_all().await?;
                tracing::debug!(count = stations.len(), "cached station snapshot");
                Ok::<_, StationError>(stations)
            })
            .await
            // Waiters on a failed fetch share its error
            .map_err(|e| Arc::try_unwrap(e).unwrap_or_else(StationError::Shared))
    }

    /// Drop the cached snapshot so the next request refetches.
    pub fn invalidate(&self) {
        self.snapshot.invalidate_all();
    }

    /// Access the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: StationSource> StationSource for CachedStationSource<S> {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Stations, StationError>> {
        Box::pin(self.snapshot())
    }
}
