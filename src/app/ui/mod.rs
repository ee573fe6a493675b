use eframe::egui::{self, Align, Context, Layout, RichText};

use crate::mesh::OutboundRequest;

use super::MeshViewApp;

mod controls;
mod side_list;

impl MeshViewApp {
    pub(super) fn show_panels(&mut self, ctx: &Context, outbox: &mut Vec<OutboundRequest>) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("meshview");
                    ui.separator();
                    ui.label(format!("world: {:.1} km", self.world.world_size_km));
                    ui.label(format!("range: {:.1} km", self.world.connection_range_km));
                    if let Some(view) = &self.view {
                        ui.label(format!("nodes: {}", view.nodes.len()));
                        ui.label(format!("edges: {}", view.edge_count()));
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        match self.link_error.clone() {
                            Some(error) => {
                                if ui.button("Reconnect").clicked() {
                                    self.reconnect();
                                }
                                ui.label(
                                    RichText::new(format!("backend: {error}"))
                                        .color(ui.visuals().warn_fg_color),
                                );
                            }
                            None => {
                                ui.label(format!("backend: {}", self.backend_addr));
                            }
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.draw_controls(ui, outbox));
            });

        egui::SidePanel::right("nodes")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| match self.view.as_deref_mut() {
                Some(view) => view.draw_side_list(ui),
                None => {
                    ui.heading("Nodes");
                    ui.label("No snapshot received yet.");
                }
            });

        let world = self.world;
        egui::CentralPanel::default().show(ctx, |ui| match self.view.as_deref_mut() {
            Some(view) => view.draw_graph(ui, world, outbox),
            None => {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Waiting for the first topology snapshot...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            }
        });
    }
}
