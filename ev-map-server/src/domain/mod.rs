//! Domain types for the EV charging map.
//!
//! Station records are read-only snapshots of the reconciled station data;
//! the types here only describe and query them.

mod network;
mod station;

pub use network::NetworkCode;
pub use station::{
    Address, ChargingGroup, ChargingPoint, Geometry, Port, Reference, Source, SourceQuality,
    SourcedAddress, SourcedValue, Station, StationCollection, StationProperties,
};

#[cfg(test)]
pub(crate) use station::fixtures;
