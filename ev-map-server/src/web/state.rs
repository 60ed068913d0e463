//! Application state for the web layer.

use std::sync::Arc;

use crate::stations::StationSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Where station data comes from (usually a cached source)
    pub stations: Arc<dyn StationSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(stations: impl StationSource + 'static) -> Self {
        Self {
            stations: Arc::new(stations),
        }
    }
}
