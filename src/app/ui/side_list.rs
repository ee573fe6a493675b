use eframe::egui::{self, RichText, Sense, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::format_2dp;

use super::super::ViewModel;
use super::super::hover::HoverSource;

impl ViewModel {
    pub(in crate::app) fn draw_side_list(&mut self, ui: &mut Ui) {
        ui.heading("Nodes");
        ui.add_space(4.0);

        ui.label(format!("{} node(s) in the current snapshot", self.nodes.len()));
        ui.text_edit_singleline(&mut self.filter)
            .on_hover_text("Fuzzy-filter the list by node id.");
        ui.add_space(4.0);

        let matcher = SkimMatcherV2::default();
        let filter = self.filter.trim().to_owned();

        let mut hovered_row: Option<String> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for index in 0..self.nodes.len() {
                    let node = &self.nodes[index];
                    if !filter.is_empty() && matcher.fuzzy_match(&node.id, &filter).is_none() {
                        continue;
                    }

                    let highlighted = self.hover.hovered_id() == Some(node.id.as_str());
                    let mut frame = egui::Frame::group(ui.style());
                    if highlighted {
                        frame = frame.fill(ui.visuals().faint_bg_color);
                    }

                    let inner = frame.show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("{} ({})", node.id, node.role.label()))
                                .strong(),
                        );

                        if node.routes.is_empty() {
                            ui.label(RichText::new("No routes").italics());
                            return;
                        }

                        egui::Grid::new(("routes", index)).striped(true).show(ui, |ui| {
                            ui.label(RichText::new("dst").strong());
                            ui.label(RichText::new("via").strong());
                            ui.label(RichText::new("metric").strong());
                            ui.label(RichText::new("rssi").strong());
                            ui.label(RichText::new("snr").strong());
                            ui.label(RichText::new("role").strong());
                            ui.end_row();

                            for route in &node.routes {
                                ui.label(route.destination.as_str());
                                ui.label(route.via.as_str());
                                ui.label(format!("{}", route.metric));
                                ui.label(format_2dp(route.rssi));
                                ui.label(format_2dp(route.snr));
                                ui.label(route.role.as_str());
                                ui.end_row();
                            }
                        });
                    });

                    let response = ui.interact(
                        inner.response.rect,
                        ui.id().with(("node-entry", index)),
                        Sense::hover(),
                    );
                    if response.hovered() {
                        hovered_row = Some(node.id.clone());
                    }
                }
            });

        match hovered_row {
            Some(id) => self.hover.enter(&id, HoverSource::SideList),
            None => {
                // spatial hovers are cleared by the graph view
                if !self.hover.overlay_open()
                    && let Some(id) = self.hover.hovered_id().map(str::to_owned)
                {
                    self.hover.leave(&id);
                }
            }
        }
    }
}
