use eframe::egui::{Pos2, Vec2};

pub fn to_screen(position: [f64; 2], world_size_km: f64, viewport: Vec2) -> Pos2 {
    if world_size_km <= 0.0 {
        return Pos2::ZERO;
    }

    Pos2::new(
        ((position[0] / world_size_km) * viewport.x as f64) as f32,
        ((position[1] / world_size_km) * viewport.y as f64) as f32,
    )
}

pub fn to_screen_radius(range_km: f64, world_size_km: f64, viewport: Vec2) -> f32 {
    if world_size_km <= 0.0 {
        return 0.0;
    }

    ((range_km / world_size_km) * viewport.x.min(viewport.y) as f64) as f32
}

pub fn to_world(click: Pos2, viewport: Vec2, world_size_km: f64) -> [f64; 2] {
    let x = if viewport.x > 0.0 {
        (click.x as f64 / viewport.x as f64) * world_size_km
    } else {
        0.0
    };
    let y = if viewport.y > 0.0 {
        (click.y as f64 / viewport.y as f64) * world_size_km
    } else {
        0.0
    };
    [x, y]
}
