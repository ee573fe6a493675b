use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NodeRole {
    Gateway,
    Sensor,
    #[default]
    Relay,
}

impl From<String> for NodeRole {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "GATEWAY" => Self::Gateway,
            "SENSOR" => Self::Sensor,
            _ => Self::Relay,
        }
    }
}

impl NodeRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Gateway => "GATEWAY",
            Self::Sensor => "SENSOR",
            Self::Relay => "RELAY",
        }
    }
}

/// `destination` and `via` may reference nodes absent from the current
/// snapshot; they render as literal text either way.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Route {
    pub destination: String,
    pub via: String,
    pub metric: f64,
    pub rssi: f64,
    pub snr: f64,
    pub role: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeshNode {
    pub id: String,
    pub position: [f64; 2],
    pub role: NodeRole,
    pub stats: Option<BTreeMap<String, Value>>,
    pub routes: Vec<Route>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeshSnapshot {
    pub nodes: Vec<MeshNode>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    pub world_size_km: f64,
    pub connection_range_km: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size_km: 10.0,
            connection_range_km: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_messages_sent: u64,
    pub total_messages_received: u64,
    pub average_time_to_deliver_seconds: f64,
    pub total_routes_broadcast: u64,
    pub average_new_node_discovery_seconds: f64,
    pub new_nodes_added: u64,
}
