//! Station records.
//!
//! Stations are GeoJSON features produced by the reconciliation pipeline.
//! Most properties are lists of sourced values: the same attribute as seen by
//! several upstream systems, ordered best-quality first.

use serde::{Deserialize, Deserializer, Serialize};

/// How trustworthy an upstream source is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceQuality {
    Curated,
    Original,
    Partner,
    Aggregated,
}

/// The upstream system a value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub quality: SourceQuality,
}

/// A single attribute value with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedValue {
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl SourcedValue {
    /// A value with no recorded source.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: None,
        }
    }
}

/// Identifiers and codes are usually strings, but some feeds emit bare
/// numbers. Both are kept as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_string(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_string)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(TextOrNumber::into_string))
}

/// Postal address fields reported by one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub zip_code: Option<String>,
}

impl Address {
    /// Single-line rendering, e.g. "123 Main St, Springfield, IL 62701".
    pub fn one_line(&self) -> String {
        let state_zip = [self.state.as_deref(), self.zip_code.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street_address.as_deref(),
            self.city.as_deref(),
            Some(state_zip.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// An address together with the source that reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedAddress {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

/// Link to the station in an external database (OSM, OCM, AFDC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub url: String,
}

/// A single connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub plug_type: String,
}

/// Ports that share one EVSE and can't be used simultaneously.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargingGroup {
    /// EVSE identifier; some networks publish it as a number.
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_id: Option<String>,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// A physical charger at a station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargingPoint {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<Vec<SourcedValue>>,
    #[serde(default)]
    pub charging_groups: Vec<ChargingGroup>,
    /// Cross-database ids (`ocm_id`, `osm_id`, `nrel_id`) and anything else.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl ChargingPoint {
    /// Total number of ports across all groups.
    pub fn port_count(&self) -> usize {
        self.charging_groups.iter().map(|g| g.ports.len()).sum()
    }
}

/// Feature geometry. Stations whose chargers were located separately carry
/// a `MultiPoint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    MultiPoint { coordinates: Vec<[f64; 2]> },
}

impl Geometry {
    /// First `[longitude, latitude]` pair, if any.
    pub fn first_coordinates(&self) -> Option<[f64; 2]> {
        match self {
            Geometry::Point { coordinates } => Some(*coordinates),
            Geometry::MultiPoint { coordinates } => coordinates.first().copied(),
        }
    }
}

/// Station feature properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationProperties {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<SourcedValue>,

    /// Network code as stored, e.g. `ELECTRIFY_AMERICA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// The network's own identifiers for this station.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<Vec<SourcedValue>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<SourcedAddress>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charging_points: Vec<ChargingPoint>,

    /// Properties not modelled above, passed through untouched.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// A charging station: one GeoJSON `Feature`.
///
/// Serializes back to the feature it was parsed from, including its `id`
/// and any foreign members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: StationProperties,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

fn feature_type() -> String {
    "Feature".to_string()
}

impl Station {
    /// Create a station with the given properties and no geometry.
    pub fn new(properties: StationProperties) -> Self {
        Self {
            kind: feature_type(),
            geometry: None,
            properties,
            other: serde_json::Map::new(),
        }
    }

    /// The station's network code, if networked.
    pub fn network(&self) -> Option<&str> {
        self.properties.network.as_deref()
    }

    /// All network identifiers, best source first.
    pub fn network_ids(&self) -> impl Iterator<Item = &str> {
        self.properties
            .network_id
            .iter()
            .flatten()
            .map(|v| v.value.as_str())
    }

    /// Whether the identifier list is present and contains `id`.
    pub fn has_network_id(&self, id: &str) -> bool {
        self.properties
            .network_id
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|v| v.value == id))
    }

    /// Best-quality name.
    pub fn name(&self) -> Option<&str> {
        self.properties.name.first().map(|v| v.value.as_str())
    }

    /// Best-quality address.
    pub fn primary_address(&self) -> Option<&Address> {
        self.properties.address.first().map(|a| &a.address)
    }

    /// `[longitude, latitude]` of the station.
    pub fn coordinates(&self) -> Option<[f64; 2]> {
        self.geometry.as_ref().and_then(Geometry::first_coordinates)
    }
}

/// A GeoJSON `FeatureCollection` of stations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Station>,
}

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

impl StationCollection {
    pub fn new(features: Vec<Station>) -> Self {
        Self {
            kind: feature_collection_type(),
            features,
        }
    }
}

/// Station constructors shared by tests across modules.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A station with the given network and identifier list.
    pub fn station(network: Option<&str>, ids: Option<&[&str]>) -> Station {
        Station::new(StationProperties {
            network: network.map(str::to_string),
            network_id: ids.map(|ids| ids.iter().map(|id| SourcedValue::new(*id)).collect()),
            ..Default::default()
        })
    }

    /// Like [`station`], with a name so results can be told apart.
    pub fn named(name: &str, network: &str, ids: &[&str]) -> Station {
        let mut s = station(Some(network), Some(ids));
        s.properties.name = vec![SourcedValue::new(name)];
        s
    }
}
