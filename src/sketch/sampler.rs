use crate::sketch::model::Point;

/// On-screen bounds of the canvas widget at the moment an event arrived.
/// Taken fresh per event so window moves and resizes between events cannot
/// desynchronize the mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Maps a client-space pointer position into canvas pixel space.
pub fn sample_point(client: (f32, f32), rect: CanvasRect, canvas_size: (u32, u32)) -> Point {
    let x = (client.0 - rect.left) / rect.width.max(f32::EPSILON) * canvas_size.0 as f32;
    let y = (client.1 - rect.top) / rect.height.max(f32::EPSILON) * canvas_size.1 as f32;
    Point::new(x, y)
}
