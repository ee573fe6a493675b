mod app;
mod mesh;
mod util;

use clap::Parser;

use crate::mesh::WorldConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "127.0.0.1:5000")]
    backend: String,

    #[arg(long, default_value_t = 10.0)]
    world_size_km: f64,

    #[arg(long, default_value_t = 3.0)]
    connection_range_km: f64,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let world = WorldConfig {
        world_size_km: args.world_size_km,
        connection_range_km: args.connection_range_km,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "meshview",
        options,
        Box::new(move |cc| Ok(Box::new(app::MeshViewApp::new(cc, args.backend.clone(), world)))),
    )
}
