use eframe::egui::{self, RichText, Ui};

use crate::mesh::{OutboundRequest, ParameterUpdate, SetReroute};
use crate::util::format_2dp;

use super::super::{ControlsForm, MeshViewApp};

impl MeshViewApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui, outbox: &mut Vec<OutboundRequest>) {
        ui.heading("Simulation Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.add(
            egui::Slider::new(&mut self.controls.num_nodes, 1..=200)
                .text("nodes")
                .integer(),
        );
        ui.add(
            egui::Slider::new(&mut self.controls.area_length_km, 1.0..=100.0)
                .text("area length (km)"),
        );
        ui.add(
            egui::Slider::new(&mut self.controls.connection_range_km, 0.0..=20.0)
                .text("connection range (km)"),
        )
        .on_hover_text("Display only; the backend recomputes the range from radio parameters.");

        ui.add_space(4.0);
        ui.add(egui::Slider::new(&mut self.controls.sf, 7..=12).text("spreading factor"));
        ui.add(
            egui::Slider::new(&mut self.controls.tx_power_dbm, 0.0..=30.0).text("TX power (dBm)"),
        );
        ui.add(
            egui::Slider::new(&mut self.controls.path_loss_exponent, 1.5..=5.0)
                .text("path-loss exponent"),
        );
        ui.add(
            egui::Slider::new(&mut self.controls.routing_interval_sec, 1..=120)
                .text("routing interval (s)")
                .integer(),
        );
        ui.add(
            egui::Slider::new(&mut self.controls.data_interval_sec, 1..=300)
                .text("data interval (s)")
                .integer(),
        );

        if ui
            .checkbox(
                &mut self.controls.reroute_on_new_node,
                "Reroute on new node",
            )
            .changed()
        {
            outbox.push(OutboundRequest::SetReroute(SetReroute {
                reroute_on_new_node: self.controls.reroute_on_new_node,
            }));
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Update").clicked() {
                // the backend reports no world size of its own
                self.world.world_size_km = self.controls.area_length_km;
                if let Some(view) = &mut self.view {
                    view.mark_scene_dirty();
                }
                outbox.push(OutboundRequest::Update(ParameterUpdate {
                    num_nodes: self.controls.num_nodes,
                    area_length_km: self.controls.area_length_km,
                    sf: self.controls.sf,
                    tx_power_dbm: self.controls.tx_power_dbm,
                    path_loss_exponent: self.controls.path_loss_exponent,
                    routing_interval_sec: self.controls.routing_interval_sec,
                    data_interval_sec: self.controls.data_interval_sec,
                    reroute_on_new_node: self.controls.reroute_on_new_node,
                }));
            }

            if ui.button("Reset").clicked() {
                self.world = self.initial_world;
                self.controls = ControlsForm::from_world(self.initial_world);
                if let Some(view) = &mut self.view {
                    view.mark_scene_dirty();
                }
                outbox.push(OutboundRequest::Reset);
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.label(RichText::new("Statistics").strong());
        egui::Grid::new("statistics-card").striped(true).show(ui, |ui| {
            ui.label("Total messages sent");
            ui.label(self.statistics.total_messages_sent.to_string());
            ui.end_row();
            ui.label("Total messages received");
            ui.label(self.statistics.total_messages_received.to_string());
            ui.end_row();
            ui.label("Average time to deliver (s)");
            ui.label(format_2dp(self.statistics.average_time_to_deliver_seconds));
            ui.end_row();
            ui.label("Total routes broadcast");
            ui.label(self.statistics.total_routes_broadcast.to_string());
            ui.end_row();
            ui.label("Average new-node discovery (s)");
            ui.label(format_2dp(
                self.statistics.average_new_node_discovery_seconds,
            ));
            ui.end_row();
            ui.label("New nodes added");
            ui.label(self.statistics.new_nodes_added.to_string());
            ui.end_row();
        });

        ui.add_space(10.0);
        ui.separator();
        ui.label(RichText::new("Synthetic injection").strong());

        if ui
            .checkbox(&mut self.prefs.enabled, "Inject nodes periodically")
            .changed()
        {
            self.scheduler = self.prefs.enabled.then(|| self.prefs.make_scheduler());
        }

        let prefs_changed = ui
            .add(
                egui::Slider::new(&mut self.prefs.duration_secs, 60..=7200)
                    .text("duration (s)")
                    .integer(),
            )
            .changed()
            | ui.add(
                egui::Slider::new(&mut self.prefs.interval_secs, 5..=600)
                    .text("interval (s)")
                    .integer(),
            )
            .changed();

        if prefs_changed && self.prefs.enabled {
            self.scheduler = Some(self.prefs.make_scheduler());
        }

        match &self.scheduler {
            Some(scheduler) => {
                let remaining = scheduler.remaining(std::time::Instant::now());
                ui.label(format!("injecting, {}s left", remaining.as_secs()));
            }
            None if self.prefs.enabled => {
                ui.label("injection run finished");
            }
            None => {}
        }
    }
}
