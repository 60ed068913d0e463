//! Station sources.
//!
//! A source returns the full station list in a stable order. Sources know
//! nothing about networks or lookups; filtering happens in
//! [`super::lookup`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::{Station, StationCollection};

use super::error::StationError;

/// A full station list, shared between every request that reads it.
pub type Stations = Arc<[Station]>;

/// Something that can produce every known station.
pub trait StationSource: Send + Sync {
    /// Fetch all stations, in the order the source provides them.
    fn fetch_all(&self) -> BoxFuture<'_, Result<Stations, StationError>>;
}

impl<S: StationSource + ?Sized> StationSource for Arc<S> {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Stations, StationError>> {
        (**self).fetch_all()
    }
}

/// Parse a GeoJSON `FeatureCollection` body into stations.
pub(crate) fn parse_collection(body: &str) -> Result<Vec<Station>, StationError> {
    let collection: StationCollection =
        serde_json::from_str(body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

    Ok(collection.features)
}

/// Station source backed by a GeoJSON file on disk.
///
/// The file is re-read on every fetch, so edits show up without a restart
/// (wrap in a [`crate::cache::CachedStationSource`] to avoid the I/O).
#[derive(Debug, Clone)]
pub struct FileStationSource {
    path: PathBuf,
}

impl FileStationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Station>, StationError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StationError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        let stations = parse_collection(&body)?;
        tracing::debug!(path = %self.path.display(), count = stations.len(), "read station file");
        Ok(stations)
    }
}

impl StationSource for FileStationSource {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Stations, StationError>> {
        Box::pin(async move { self.read().await.map(Stations::from) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": null, "properties": {"network": "EVGO", "network_id": [{"value": "1"}]}},
            {"type": "Feature", "geometry": null, "properties": {"network": "FLO"}}
        ]
    }"#;

    #[test]
    fn parse_collection_keeps_order() {
        let stations = parse_collection(COLLECTION).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].network(), Some("EVGO"));
        assert_eq!(stations[1].network(), Some("FLO"));
    }

    #[test]
    fn numeric_evse_id_does_not_break_the_feed() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": {"network": "NYC", "network_id": [{"value": "456"}]}},
                {"type": "Feature", "geometry": null, "properties": {
                    "network": "BLINK",
                    "network_id": [{"value": "9"}],
                    "charging_points": [{"name": "1", "charging_groups": [{"network_id": 12345, "ports": [{"plug_type": "J1772"}]}]}]
                }}
            ]
        }"#;

        let stations = parse_collection(body).unwrap();
        assert_eq!(stations.len(), 2);
        assert!(crate::stations::find_station(&stations, "nyc", "456").is_some());
        assert!(crate::stations::find_station(&stations, "blink", "9").is_some());
    }

    #[test]
    fn parse_collection_rejects_garbage() {
        let err = parse_collection("not json").unwrap_err();
        assert!(matches!(err, StationError::Json { .. }));
    }

    #[tokio::test]
    async fn file_source_reads_geojson() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.geojson");
        std::fs::write(&path, COLLECTION).unwrap();

        let source = FileStationSource::new(&path);
        let stations = source.fetch_all().await.unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(source.path(), path.as_path());
    }

    #[tokio::test]
    async fn file_source_picks_up_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.geojson");
        std::fs::write(&path, COLLECTION).unwrap();

        let source = FileStationSource::new(&path);
        assert_eq!(source.fetch_all().await.unwrap().len(), 2);

        std::fs::write(&path, r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(source.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileStationSource::new("/nonexistent/stations.geojson");
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, StationError::Io { .. }));
    }

    #[tokio::test]
    async fn arc_source_delegates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.geojson");
        std::fs::write(&path, COLLECTION).unwrap();

        let source: Arc<dyn StationSource> = Arc::new(FileStationSource::new(&path));
        assert_eq!(source.fetch_all().await.unwrap().len(), 2);
    }
}
