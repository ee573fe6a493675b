use std::time::{Duration, Instant};

use eframe::egui::{self, Context, Vec2};
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::mesh::{
    BackendLink, InboundEvent, MeshNode, OutboundRequest, Statistics, WorldConfig,
};

mod connectivity;
mod geometry;
mod hover;
mod overlay;
mod scene;
mod scheduler;
mod ui;
mod view;

use self::hover::HoverSync;
use self::scene::Scene;
use self::scheduler::InjectionScheduler;

const PREFS_STORAGE_KEY: &str = "injection_prefs";

pub struct MeshViewApp {
    backend_addr: String,
    link: Option<BackendLink>,
    link_error: Option<String>,
    initial_world: WorldConfig,
    world: WorldConfig,
    statistics: Statistics,
    controls: ControlsForm,
    prefs: InjectionPrefs,
    scheduler: Option<InjectionScheduler>,
    view: Option<Box<ViewModel>>,
}

struct ViewModel {
    nodes: Vec<MeshNode>,
    edges: Vec<(usize, usize)>,
    scene: Option<Scene>,
    scene_world: WorldConfig,
    scene_viewport: Vec2,
    scene_dirty: bool,
    hover: HoverSync,
    filter: String,
    pending_add: Option<[f64; 2]>,
    overlay_size: Vec2,
}

struct ControlsForm {
    num_nodes: u32,
    area_length_km: f64,
    connection_range_km: f64,
    sf: u8,
    tx_power_dbm: f64,
    path_loss_exponent: f64,
    routing_interval_sec: u32,
    data_interval_sec: u32,
    reroute_on_new_node: bool,
}

impl ControlsForm {
    fn from_world(world: WorldConfig) -> Self {
        Self {
            num_nodes: 10,
            area_length_km: world.world_size_km,
            connection_range_km: world.connection_range_km,
            sf: 7,
            tx_power_dbm: 14.0,
            path_loss_exponent: 2.7,
            routing_interval_sec: 2,
            data_interval_sec: 10,
            reroute_on_new_node: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
struct InjectionPrefs {
    enabled: bool,
    duration_secs: u32,
    interval_secs: u32,
}

impl Default for InjectionPrefs {
    fn default() -> Self {
        Self {
            enabled: false,
            duration_secs: 1800,
            interval_secs: 60,
        }
    }
}

impl InjectionPrefs {
    fn make_scheduler(self) -> InjectionScheduler {
        InjectionScheduler::new(
            Duration::from_secs(self.interval_secs as u64),
            Duration::from_secs(self.duration_secs as u64),
            Instant::now(),
        )
    }
}

impl MeshViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, backend_addr: String, world: WorldConfig) -> Self {
        let prefs = cc
            .storage
            .and_then(|storage| eframe::get_value::<InjectionPrefs>(storage, PREFS_STORAGE_KEY))
            .unwrap_or_default();

        let (link, link_error) = match BackendLink::connect(&backend_addr) {
            Ok(link) => (Some(link), None),
            Err(error) => (None, Some(format!("{error:#}"))),
        };

        let scheduler = prefs.enabled.then(|| prefs.make_scheduler());

        Self {
            backend_addr,
            link,
            link_error,
            initial_world: world,
            world,
            statistics: Statistics::default(),
            controls: ControlsForm::from_world(world),
            prefs,
            scheduler,
            view: None,
        }
    }

    fn reconnect(&mut self) {
        match BackendLink::connect(&self.backend_addr) {
            Ok(link) => {
                self.link = Some(link);
                self.link_error = None;
            }
            Err(error) => self.link_error = Some(format!("{error:#}")),
        }
    }

    fn drain_events(&mut self) {
        let Some(link) = &self.link else {
            return;
        };

        while let Some(event) = link.try_recv() {
            match event {
                InboundEvent::Snapshot(snapshot) => match &mut self.view {
                    Some(view) => view.replace_nodes(snapshot.nodes),
                    None => self.view = Some(Box::new(ViewModel::new(snapshot.nodes))),
                },
                InboundEvent::RangeUpdate(update) => {
                    self.world.connection_range_km = update.connection_range_km;
                    self.controls.connection_range_km = update.connection_range_km;
                    if let Some(view) = &mut self.view {
                        view.mark_scene_dirty();
                    }
                }
                InboundEvent::Statistics(statistics) => self.statistics = statistics,
            }
        }
    }

    fn pump_scheduler(&mut self, ctx: &Context, outbox: &mut Vec<OutboundRequest>) {
        let Some(scheduler) = &mut self.scheduler else {
            return;
        };

        let due = scheduler.poll(Instant::now());
        let size = self.world.world_size_km;
        if size > 0.0 {
            let mut rng = rand::rng();
            for _ in 0..due {
                outbox.push(OutboundRequest::AddNode {
                    position: [rng.random_range(0.0..size), rng.random_range(0.0..size)],
                });
            }
        }

        if scheduler.is_finished() {
            self.scheduler = None;
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn flush_outbox(&mut self, outbox: Vec<OutboundRequest>) {
        if outbox.is_empty() {
            return;
        }

        let Some(link) = &self.link else {
            warn!("no backend connection; dropping {} request(s)", outbox.len());
            return;
        };

        for request in outbox {
            link.send(request);
        }
    }
}

impl eframe::App for MeshViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let mut outbox = Vec::new();
        self.pump_scheduler(ctx, &mut outbox);
        self.show_panels(ctx, &mut outbox);
        self.flush_outbox(outbox);

        // the event channel has no waker
        ctx.request_repaint_after(Duration::from_millis(200));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PREFS_STORAGE_KEY, &self.prefs);
    }
}

impl ViewModel {
    fn new(nodes: Vec<MeshNode>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
            scene: None,
            scene_world: WorldConfig::default(),
            scene_viewport: Vec2::ZERO,
            scene_dirty: true,
            hover: HoverSync::default(),
            filter: String::new(),
            pending_add: None,
            overlay_size: egui::vec2(260.0, 160.0),
        }
    }

    fn replace_nodes(&mut self, nodes: Vec<MeshNode>) {
        self.nodes = nodes;
        self.scene_dirty = true;
    }

    fn mark_scene_dirty(&mut self) {
        self.scene_dirty = true;
    }

    fn ensure_scene(&mut self, viewport: Vec2, world: WorldConfig) {
        if !self.scene_dirty && self.scene_viewport == viewport && self.scene_world == world {
            return;
        }

        self.edges = connectivity::derive_edges(&self.nodes, world.connection_range_km);
        let scene = scene::build_scene(&self.nodes, &self.edges, world, viewport);
        self.hover.rebuild(scene.handles().iter().cloned());
        self.scene = Some(scene);
        self.scene_world = world;
        self.scene_viewport = viewport;
        self.scene_dirty = false;
    }

    fn node_by_id(&self, id: &str) -> Option<&MeshNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::hover::HoverSource;
    use super::*;

    fn node(id: &str, x: f64, y: f64) -> MeshNode {
        MeshNode {
            id: id.to_owned(),
            position: [x, y],
            ..MeshNode::default()
        }
    }

    fn world(size: f64, range: f64) -> WorldConfig {
        WorldConfig {
            world_size_km: size,
            connection_range_km: range,
        }
    }

    #[test]
    fn snapshot_replaces_nodes_and_rebuilds_edges() {
        let viewport = egui::vec2(500.0, 500.0);
        let mut view = ViewModel::new(vec![node("A", 0.0, 0.0), node("B", 1.0, 1.0)]);

        view.ensure_scene(viewport, world(10.0, 2.0));
        assert_eq!(view.edge_count(), 1);

        view.replace_nodes(vec![node("A", 0.0, 0.0), node("C", 9.0, 9.0)]);
        view.ensure_scene(viewport, world(10.0, 2.0));
        assert_eq!(view.edge_count(), 0);
        assert!(view.node_by_id("B").is_none());
        assert!(view.node_by_id("C").is_some());
    }

    #[test]
    fn rebuild_drops_hover_on_nodes_missing_from_the_new_snapshot() {
        let viewport = egui::vec2(500.0, 500.0);
        let mut view = ViewModel::new(vec![node("A", 0.0, 0.0), node("B", 1.0, 1.0)]);
        view.ensure_scene(viewport, world(10.0, 2.0));

        view.hover.enter("B", HoverSource::Spatial);
        assert_eq!(view.hover.hovered_id(), Some("B"));

        view.replace_nodes(vec![node("A", 0.0, 0.0)]);
        view.ensure_scene(viewport, world(10.0, 2.0));
        assert_eq!(view.hover.hovered_id(), None);
    }

    #[test]
    fn range_change_recomputes_edges_against_the_existing_node_list() {
        let viewport = egui::vec2(500.0, 500.0);
        let mut view = ViewModel::new(vec![node("A", 0.0, 0.0), node("B", 3.0, 0.0)]);

        view.ensure_scene(viewport, world(10.0, 2.0));
        assert_eq!(view.edge_count(), 0);

        view.ensure_scene(viewport, world(10.0, 4.0));
        assert_eq!(view.edge_count(), 1);
    }

    #[test]
    fn unchanged_inputs_skip_the_rebuild() {
        let viewport = egui::vec2(500.0, 500.0);
        let mut view = ViewModel::new(vec![node("A", 0.0, 0.0)]);
        view.ensure_scene(viewport, world(10.0, 2.0));

        view.hover.enter("A", HoverSource::SideList);
        view.ensure_scene(viewport, world(10.0, 2.0));
        // no rebuild happened, so the hover survived untouched
        assert_eq!(view.hover.hovered_id(), Some("A"));
    }
}
