use eframe::egui::{Pos2, Vec2};

const POINTER_OFFSET: f32 = 10.0;

pub fn place(pointer: Pos2, overlay: Vec2, container: Vec2) -> Pos2 {
    let mut left = pointer.x + POINTER_OFFSET;
    let mut top = pointer.y + POINTER_OFFSET;

    if left + overlay.x > container.x {
        left = pointer.x - overlay.x - POINTER_OFFSET;
    }
    if top + overlay.y > container.y {
        top = pointer.y - overlay.y - POINTER_OFFSET;
    }

    Pos2::new(
        left.clamp(0.0, (container.x - overlay.x).max(0.0)),
        top.clamp(0.0, (container.y - overlay.y).max(0.0)),
    )
}
