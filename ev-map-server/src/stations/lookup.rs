//! Station lookup by network and network identifier.
//!
//! This is what a station page needs: given the `{network}` and `{station}`
//! segments of a URL, find the one station they refer to.
//!
//! The pure functions take a slice in source order and never reorder it, so
//! "first match" always means first in the order the source returned.

use std::collections::BTreeMap;

use crate::domain::{NetworkCode, Station};

use super::error::StationError;
use super::source::StationSource;

/// Stations belonging to `network`, in source order.
///
/// `network` is upper-cased before comparison; stations without a network
/// never match.
pub fn stations_for_network<'a>(stations: &'a [Station], network: &str) -> Vec<&'a Station> {
    let code = NetworkCode::normalized(network);
    stations
        .iter()
        .filter(|s| s.network().is_some_and(|n| code.matches(n)))
        .collect()
}

/// The first station in `network` whose identifier list contains `station_id`.
pub fn find_station<'a>(
    stations: &'a [Station],
    network: &str,
    station_id: &str,
) -> Option<&'a Station> {
    stations_for_network(stations, network)
        .into_iter()
        .find(|s| s.has_network_id(station_id))
}

/// Count stations per network code. Non-networked stations are skipped.
pub fn network_counts(stations: &[Station]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for network in stations.iter().filter_map(Station::network) {
        *counts.entry(network.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Fetch every station and keep those in `network`.
pub async fn fetch_stations_for_network<S>(
    source: &S,
    network: &str,
) -> Result<Vec<Station>, StationError>
where
    S: StationSource + ?Sized,
{
    let stations = source.fetch_all().await?;
    Ok(stations_for_network(&stations, network)
        .into_iter()
        .cloned()
        .collect())
}

/// Fetch every station and find the one identified by `station_id` within
/// `network`.
///
/// `Ok(None)` means the station doesn't exist; source failures are returned
/// as-is.
pub async fn fetch_station_for_network<S>(
    source: &S,
    network: &str,
    station_id: &str,
) -> Result<Option<Station>, StationError>
where
    S: StationSource + ?Sized,
{
    let stations = source.fetch_all().await?;
    let found = find_station(&stations, network, station_id).cloned();

    tracing::debug!(
        network = %NetworkCode::normalized(network),
        station_id,
        total = stations.len(),
        found = found.is_some(),
        "station lookup"
    );

    Ok(found)
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
