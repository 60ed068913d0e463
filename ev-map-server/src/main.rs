use ev_map_server::cache::{CacheConfig, CachedStationSource};
use ev_map_server::config::{FeedConfig, ServerConfig};
use ev_map_server::stations::{
    FileStationSource, StationCacheConfig, StationClient, StationClientConfig, StationSource,
};
use ev_map_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ev_map_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");
    let cache_config = CacheConfig::with_ttl(config.cache_ttl);

    // Build the station source for the configured feed
    let state = match &config.feed {
        FeedConfig::Url(url) => {
            let mut client_config = StationClientConfig::new(url);
            if let Some(path) = &config.disk_cache {
                client_config = client_config.with_cache(StationCacheConfig::new(path));
            }
            let client = StationClient::new(client_config).expect("Failed to create Station client");
            tracing::info!(%url, "using HTTP station feed");
            AppState::new(CachedStationSource::new(client, &cache_config))
        }
        FeedConfig::File(path) => {
            tracing::info!(path = %path.display(), "using station file");
            AppState::new(CachedStationSource::new(
                FileStationSource::new(path),
                &cache_config,
            ))
        }
    };

    // Load stations once up front (fail fast if unavailable)
    let stations = state
        .stations
        .fetch_all()
        .await
        .expect("Failed to fetch stations");
    tracing::info!(count = stations.len(), "loaded stations");

    let app = create_router(state, &config.static_dir);

    let addr = config.bind_addr;
    tracing::info!("EV Map listening on http://{addr}");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /networks");
    tracing::info!("  GET  /networks/{{network}}/stations");
    tracing::info!("  GET  /networks/{{network}}/stations/{{station}}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
