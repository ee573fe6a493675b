use eframe::egui::{
    self, Align2, Color32, Context, FontId, Pos2, RichText, Sense, Stroke, Ui, vec2,
};

use crate::mesh::{MeshNode, OutboundRequest, WorldConfig};
use crate::util::{format_2dp, stat_value_text};

use super::ViewModel;
use super::geometry::to_world;
use super::hover::HoverSource;
use super::overlay::place;
use super::scene::{MARKER_RADIUS, Primitive};

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(46, 160, 67, 128);
const RING_COLOR: Color32 = Color32::from_rgba_premultiplied(120, 120, 120, 110);
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(255, 164, 101);
const LABEL_COLOR: Color32 = Color32::from_gray(225);

const HOVER_SLACK: f32 = 2.0;

impl ViewModel {
    pub(in crate::app) fn draw_graph(
        &mut self,
        ui: &mut Ui,
        world: WorldConfig,
        outbox: &mut Vec<OutboundRequest>,
    ) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        self.ensure_scene(rect.size(), world);

        let pointer = response.hover_pos();
        let spatial_target =
            pointer.and_then(|pointer| self.marker_at(pointer - rect.min.to_vec2()));

        match &spatial_target {
            Some(id) => self.hover.enter(id, HoverSource::Spatial),
            None => {
                // side-list hovers are cleared by the side list itself
                if self.hover.overlay_open()
                    && let Some(id) = self.hover.hovered_id().map(str::to_owned)
                {
                    self.hover.leave(&id);
                }
            }
        }

        if spatial_target.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if response.clicked()
            && spatial_target.is_none()
            && let Some(click) = response.interact_pointer_pos()
        {
            let local = click - rect.min.to_vec2();
            self.pending_add = Some(to_world(local, rect.size(), world.world_size_km));
        }

        let highlight = self.hover.hovered_handle();
        if let Some(scene) = &self.scene {
            for (index, primitive) in scene.primitives.iter().enumerate() {
                match primitive {
                    Primitive::EdgeLine { start, end } => {
                        painter.line_segment(
                            [rect.min + start.to_vec2(), rect.min + end.to_vec2()],
                            Stroke::new(1.0, EDGE_COLOR),
                        );
                    }
                    Primitive::RangeRing { center, radius } => {
                        let highlighted = highlight.is_some_and(|handle| handle.ring == index);
                        let stroke = if highlighted {
                            Stroke::new(2.0, HIGHLIGHT_COLOR)
                        } else {
                            Stroke::new(1.0, RING_COLOR)
                        };
                        painter.circle_stroke(rect.min + center.to_vec2(), *radius, stroke);
                    }
                    Primitive::Marker { center, color } => {
                        let highlighted = highlight.is_some_and(|handle| handle.marker == index);
                        let position = rect.min + center.to_vec2();
                        let radius = if highlighted {
                            MARKER_RADIUS + 2.0
                        } else {
                            MARKER_RADIUS
                        };
                        painter.circle_filled(position, radius, *color);
                        if highlighted {
                            painter.circle_stroke(
                                position,
                                radius + 2.0,
                                Stroke::new(2.0, HIGHLIGHT_COLOR),
                            );
                        }
                    }
                    Primitive::Label { anchor, text } => {
                        painter.text(
                            rect.min + anchor.to_vec2(),
                            Align2::LEFT_CENTER,
                            text,
                            FontId::proportional(12.0),
                            LABEL_COLOR,
                        );
                    }
                }
            }
        }

        if self.hover.overlay_open()
            && let (Some(id), Some(pointer)) = (self.hover.hovered_id().map(str::to_owned), pointer)
            && let Some(node) = self.node_by_id(&id).cloned()
        {
            self.draw_overlay(ui.ctx(), rect, &node, pointer);
        }

        self.draw_add_confirm(ui.ctx(), outbox);
    }

    fn marker_at(&self, local: Pos2) -> Option<String> {
        let scene = self.scene.as_ref()?;

        scene
            .handles()
            .iter()
            .filter_map(|(id, handle)| {
                let Primitive::Marker { center, .. } = scene.primitives.get(handle.marker)? else {
                    return None;
                };
                let distance = center.distance(local);
                (distance <= MARKER_RADIUS + HOVER_SLACK).then(|| (id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _distance)| id.clone())
    }

    // Placement uses the overlay's measured size from the previous frame.
    fn draw_overlay(&mut self, ctx: &Context, rect: egui::Rect, node: &MeshNode, pointer: Pos2) {
        let local_pointer = pointer - rect.min.to_vec2();
        let anchor = place(local_pointer, self.overlay_size, rect.size());

        let area = egui::Area::new(egui::Id::new("node-detail-overlay"))
            .order(egui::Order::Tooltip)
            .fixed_pos(rect.min + anchor.to_vec2())
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(340.0);
                    ui.label(
                        RichText::new(format!("{} ({})", node.id, node.role.label())).strong(),
                    );
                    ui.label(format!(
                        "Position: ({}, {})",
                        format_2dp(node.position[0]),
                        format_2dp(node.position[1])
                    ));

                    if let Some(stats) = &node.stats {
                        ui.separator();
                        ui.label(RichText::new("Stats").strong());
                        egui::Grid::new("overlay-stats").striped(true).show(ui, |ui| {
                            for (key, value) in stats {
                                ui.label(key);
                                ui.label(stat_value_text(value));
                                ui.end_row();
                            }
                        });
                    }

                    ui.separator();
                    if node.routes.is_empty() {
                        ui.label(RichText::new("No routes").italics());
                    } else {
                        egui::Grid::new("overlay-routes").striped(true).show(ui, |ui| {
                            ui.label(RichText::new("dst").strong());
                            ui.label(RichText::new("via").strong());
                            ui.label(RichText::new("metric").strong());
                            ui.label(RichText::new("role").strong());
                            ui.end_row();

                            for route in &node.routes {
                                ui.label(route.destination.as_str());
                                ui.label(route.via.as_str());
                                ui.label(format!("{}", route.metric));
                                ui.label(route.role.as_str());
                                ui.end_row();
                            }
                        });
                    }
                });
            });

        self.overlay_size = area.response.rect.size();
    }

    fn draw_add_confirm(&mut self, ctx: &Context, outbox: &mut Vec<OutboundRequest>) {
        let Some(position) = self.pending_add else {
            return;
        };

        egui::Window::new("Add node")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!(
                    "Create a new node at ({}, {})?",
                    format_2dp(position[0]),
                    format_2dp(position[1])
                ));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        outbox.push(OutboundRequest::AddNode { position });
                        self.pending_add = None;
                    }
                    if ui.button("Cancel").clicked() {
                        self.pending_add = None;
                    }
                });
            });
    }
}
