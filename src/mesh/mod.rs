mod backend;
mod events;
mod model;

pub use backend::BackendLink;
pub use events::{InboundEvent, OutboundRequest, ParameterUpdate, RangeUpdate, SetReroute};
pub use model::{MeshNode, NodeRole, Statistics, WorldConfig};
