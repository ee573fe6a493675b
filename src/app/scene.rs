use eframe::egui::{Color32, Pos2, Vec2, vec2};

use crate::mesh::{MeshNode, NodeRole, WorldConfig};

use super::geometry::{to_screen, to_screen_radius};

pub const MARKER_RADIUS: f32 = 6.0;
const LABEL_OFFSET: Vec2 = vec2(8.0, 4.0);

/// List order is the z-order: edges first, then ring, marker and label per
/// node in snapshot order.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    EdgeLine { start: Pos2, end: Pos2 },
    RangeRing { center: Pos2, radius: f32 },
    Marker { center: Pos2, color: Color32 },
    Label { anchor: Pos2, text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualHandle {
    pub marker: usize,
    pub ring: usize,
}

pub struct Scene {
    pub primitives: Vec<Primitive>,
    handles: Vec<(String, VisualHandle)>,
}

impl Scene {
    pub fn handles(&self) -> &[(String, VisualHandle)] {
        &self.handles
    }
}

pub fn role_color(role: NodeRole) -> Color32 {
    match role {
        NodeRole::Gateway => Color32::from_rgb(217, 58, 58),
        NodeRole::Sensor => Color32::from_rgb(128, 0, 128),
        NodeRole::Relay => Color32::from_rgb(0, 123, 255),
    }
}

pub fn build_scene(
    nodes: &[MeshNode],
    edges: &[(usize, usize)],
    world: WorldConfig,
    viewport: Vec2,
) -> Scene {
    let screen = nodes
        .iter()
        .map(|node| to_screen(node.position, world.world_size_km, viewport))
        .collect::<Vec<_>>();
    let ring_radius = to_screen_radius(world.connection_range_km, world.world_size_km, viewport);

    let mut primitives = Vec::with_capacity(edges.len() + nodes.len() * 3);
    let mut handles = Vec::with_capacity(nodes.len());

    for &(i, j) in edges {
        if i >= screen.len() || j >= screen.len() {
            continue;
        }
        primitives.push(Primitive::EdgeLine {
            start: screen[i],
            end: screen[j],
        });
    }

    for (index, node) in nodes.iter().enumerate() {
        let center = screen[index];

        let ring = primitives.len();
        primitives.push(Primitive::RangeRing {
            center,
            radius: ring_radius,
        });

        let marker = primitives.len();
        primitives.push(Primitive::Marker {
            center,
            color: role_color(node.role),
        });

        primitives.push(Primitive::Label {
            anchor: center + LABEL_OFFSET,
            text: node.id.clone(),
        });

        handles.push((node.id.clone(), VisualHandle { marker, ring }));
    }

    Scene { primitives, handles }
}
