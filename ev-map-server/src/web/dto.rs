//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Station;

/// Path parameters of a station page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationParams {
    /// Network code as it appeared in the URL (any case)
    pub network: String,

    /// The network's identifier for the station
    pub station: String,
}

/// Data for a station page.
///
/// `station` is `null` when nothing matched; clients render the empty case.
#[derive(Debug, Serialize)]
pub struct StationPageResponse {
    pub params: StationParams,
    pub station: Option<Station>,
}

/// Stations belonging to one network.
#[derive(Debug, Serialize)]
pub struct NetworkStationsResponse {
    /// Normalized (upper-case) network code
    pub network: String,
    pub stations: Vec<Station>,
}

/// One network and how many stations it has.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NetworkSummary {
    pub network: String,
    pub station_count: usize,
}

/// All networks present in the station data.
#[derive(Debug, Serialize)]
pub struct NetworksResponse {
    pub networks: Vec<NetworkSummary>,
}

impl NetworksResponse {
    /// Build from per-network counts, keeping the map's (sorted) order.
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        let networks = counts
            .into_iter()
            .map(|(network, station_count)| NetworkSummary {
                network,
                station_count,
            })
            .collect();
        Self { networks }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
