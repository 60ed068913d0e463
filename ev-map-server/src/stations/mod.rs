//! Station data: where it comes from and how to look stations up.
//!
//! Station data is the reconciled `stations.geojson` feed, fetched over HTTP
//! or read from disk. Lookups filter the full list by network code and then
//! by network identifier.

mod cache;
mod client;
mod error;
mod lookup;
mod source;

pub use cache::{StationCache, StationCacheConfig};
pub use client::{StationClient, StationClientConfig};
pub use error::StationError;
pub use lookup::{
    fetch_station_for_network, fetch_stations_for_network, find_station, network_counts,
    stations_for_network,
};
pub use source::{FileStationSource, StationSource, Stations};
