//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Station;

use super::dto::NetworkSummary;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Station detail page.
#[derive(Template)]
#[template(path = "station.html")]
pub struct StationTemplate {
    pub network: String,
    pub station_id: String,
    pub station: StationView,
}

/// Shown when no station matches the URL.
#[derive(Template)]
#[template(path = "station_not_found.html")]
pub struct StationNotFoundTemplate {
    pub network: String,
    pub station_id: String,
}

/// Every network with its station count.
#[derive(Template)]
#[template(path = "networks.html")]
pub struct NetworksTemplate {
    pub networks: Vec<NetworkSummary>,
}

/// The stations of one network.
#[derive(Template)]
#[template(path = "network_stations.html")]
pub struct NetworkStationsTemplate {
    /// Normalized (upper-case) network code
    pub network: String,
    pub stations: Vec<StationListItem>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Name to show for a station, falling back to its network.
fn display_name(station: &Station) -> String {
    match station.name() {
        Some(name) => name.to_string(),
        None => format!("{} station", station.network().unwrap_or_default()),
    }
}

/// One row of a network's station list.
#[derive(Debug, Clone)]
pub struct StationListItem {
    pub name: String,
    /// Identifier used to link to the station page; unlinked when absent
    pub station_id: Option<String>,
    pub address: Option<String>,
}

impl StationListItem {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: display_name(station),
            station_id: station.network_ids().next().map(str::to_string),
            address: station
                .primary_address()
                .map(|a| a.one_line())
                .filter(|a| !a.is_empty()),
        }
    }
}

/// Station view model for templates.
#[derive(Debug, Clone)]
pub struct StationView {
    pub name: String,
    pub network: String,
    pub network_ids: Vec<String>,
    pub address: Option<String>,
    pub coordinates: Option<String>,
    pub references: Vec<ReferenceView>,
    pub charging_points: Vec<ChargingPointView>,
}

impl StationView {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        let network = station.network().unwrap_or_default().to_string();

        let references = station
            .properties
            .references
            .iter()
            .map(|r| ReferenceView {
                name: r.name.clone(),
                url: r.url.clone(),
            })
            .collect();

        let charging_points = station
            .properties
            .charging_points
            .iter()
            .map(|p| ChargingPointView {
                name: p.name.clone(),
                plugs: p
                    .charging_groups
                    .iter()
                    .flat_map(|g| g.ports.iter().map(|port| port.plug_type.clone()))
                    .collect(),
            })
            .collect();

        Self {
            name: display_name(station),
            network,
            network_ids: station.network_ids().map(str::to_string).collect(),
            address: station
                .primary_address()
                .map(|a| a.one_line())
                .filter(|a| !a.is_empty()),
            // GeoJSON order is longitude, latitude; people read latitude first
            coordinates: station
                .coordinates()
                .map(|[lon, lat]| format!("{:.5}, {:.5}", lat, lon)),
            references,
            charging_points,
        }
    }

    /// Total connectors across all charging points.
    pub fn plug_count(&self) -> usize {
        self.charging_points.iter().map(|p| p.plugs.len()).sum()
    }
}

/// External database link.
#[derive(Debug, Clone)]
pub struct ReferenceView {
    pub name: String,
    pub url: String,
}

/// Charging point view model.
#[derive(Debug, Clone)]
pub struct ChargingPointView {
    pub name: String,
    pub plugs: Vec<String>,
}

impl ChargingPointView {
    /// e.g. "J1772_COMBO, CHADEMO"
    pub fn plug_summary(&self) -> String {
        self.plugs.join(", ")
    }
}
