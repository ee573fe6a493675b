use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::model::{MeshSnapshot, Statistics};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum InboundEvent {
    Snapshot(MeshSnapshot),
    RangeUpdate(RangeUpdate),
    Statistics(Statistics),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeUpdate {
    pub connection_range_km: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OutboundRequest {
    AddNode { position: [f64; 2] },
    Reset,
    Update(ParameterUpdate),
    SetReroute(SetReroute),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterUpdate {
    pub num_nodes: u32,
    pub area_length_km: f64,
    pub sf: u8,
    pub tx_power_dbm: f64,
    pub path_loss_exponent: f64,
    pub routing_interval_sec: u32,
    pub data_interval_sec: u32,
    pub reroute_on_new_node: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetReroute {
    pub reroute_on_new_node: bool,
}

pub fn decode_event(line: &str) -> Result<InboundEvent> {
    serde_json::from_str(line).with_context(|| format!("failed to decode backend event: {line}"))
}

pub fn encode_request(request: &OutboundRequest) -> Result<String> {
    serde_json::to_string(request).context("failed to encode outbound request")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::model::NodeRole;

    #[test]
    fn decodes_snapshot_event() {
        let line = r#"{
            "event": "snapshot",
            "data": {"nodes": [
                {"id": "A", "position": [1.0, 2.0], "role": "GATEWAY",
                 "routes": [{"destination": "B", "via": "C", "metric": 2,
                             "rssi": -91.456, "snr": 7.25, "role": "SENSOR"}]},
                {"id": "B"}
            ]}
        }"#;

        let InboundEvent::Snapshot(snapshot) = decode_event(line).expect("decodes") else {
            panic!("expected snapshot event");
        };
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.nodes[0].role, NodeRole::Gateway);
        assert_eq!(snapshot.nodes[0].routes[0].via, "C");
        assert_eq!(snapshot.nodes[1].role, NodeRole::Relay);
    }

    #[test]
    fn decodes_range_update_and_statistics() {
        let range = decode_event(r#"{"event": "range_update", "data": {"connectionRangeKm": 2.5}}"#)
            .expect("decodes");
        assert_eq!(
            range,
            InboundEvent::RangeUpdate(RangeUpdate {
                connection_range_km: 2.5
            })
        );

        let stats = decode_event(
            r#"{"event": "statistics", "data": {"totalMessagesSent": 7, "newNodesAdded": 1}}"#,
        )
        .expect("decodes");
        let InboundEvent::Statistics(stats) = stats else {
            panic!("expected statistics event");
        };
        assert_eq!(stats.total_messages_sent, 7);
        assert_eq!(stats.new_nodes_added, 1);
        assert_eq!(stats.total_messages_received, 0);
    }

    #[test]
    fn rejects_unknown_event_tag() {
        assert!(decode_event(r#"{"event": "telemetry", "data": {}}"#).is_err());
        assert!(decode_event("not json").is_err());
    }

    #[test]
    fn encodes_outbound_requests() {
        let add = encode_request(&OutboundRequest::AddNode {
            position: [1.5, 2.0],
        })
        .expect("encodes");
        assert_eq!(
            add,
            r#"{"event":"add_node","data":{"position":[1.5,2.0]}}"#
        );

        let reset = encode_request(&OutboundRequest::Reset).expect("encodes");
        assert_eq!(reset, r#"{"event":"reset"}"#);

        let reroute = encode_request(&OutboundRequest::SetReroute(SetReroute {
            reroute_on_new_node: true,
        }))
        .expect("encodes");
        assert_eq!(
            reroute,
            r#"{"event":"set_reroute","data":{"rerouteOnNewNode":true}}"#
        );
    }

    #[test]
    fn encodes_full_parameter_update() {
        let update = encode_request(&OutboundRequest::Update(ParameterUpdate {
            num_nodes: 10,
            area_length_km: 10.0,
            sf: 7,
            tx_power_dbm: 14.0,
            path_loss_exponent: 2.7,
            routing_interval_sec: 2,
            data_interval_sec: 10,
            reroute_on_new_node: false,
        }))
        .expect("encodes");

        let value: serde_json::Value = serde_json::from_str(&update).expect("valid json");
        assert_eq!(value["event"], "update");
        assert_eq!(value["data"]["numNodes"], 10);
        assert_eq!(value["data"]["areaLengthKm"], 10.0);
        assert_eq!(value["data"]["pathLossExponent"], 2.7);
        assert_eq!(value["data"]["rerouteOnNewNode"], false);
    }
}
