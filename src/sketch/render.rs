use crate::sketch::history::StrokeHistory;
use crate::sketch::model::{Color, Point, StrokeStyle};

/// CPU-side canvas pixels, RGBA8, row-major. Doubles as the display surface
/// uploaded to the GUI texture and as the input to the snapshot encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaBuffer {
    /// Fully transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = ((y * self.width + x) * 4) as usize;
        Color {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }
}

/// Paints one segment as a capsule: every pixel within half the stroke width
/// of the segment is covered, which gives round caps at both ends. A
/// degenerate segment (from == to) paints a disc, so a single-point stroke
/// still leaves a mark.
pub fn draw_segment(buffer: &mut RgbaBuffer, from: Point, to: Point, style: StrokeStyle) {
    let radius = style.width.max(1) as f32 / 2.0;
    let pad = radius.ceil() as i32 + 1;

    let min_x = (from.x.min(to.x).floor() as i32 - pad).max(0);
    let max_x = (from.x.max(to.x).ceil() as i32 + pad).min(buffer.width as i32 - 1);
    let min_y = (from.y.min(to.y).floor() as i32 - pad).max(0);
    let max_y = (from.y.max(to.y).ceil() as i32 + pad).min(buffer.height as i32 - 1);

    let radius_sq = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if point_segment_distance_sq(center, from, to) <= radius_sq {
                buffer.set_pixel(x, y, style.color);
            }
        }
    }
}

/// Paints a whole stroke as a connected polyline.
pub fn draw_polyline(buffer: &mut RgbaBuffer, points: &[Point], style: StrokeStyle) {
    match points {
        [] => {}
        [only] => draw_segment(buffer, *only, *only, style),
        _ => {
            for pair in points.windows(2) {
                draw_segment(buffer, pair[0], pair[1], style);
            }
        }
    }
}

/// Clears the surface and redraws every stroke in chronological order.
/// Deterministic: the same history always produces the same pixels.
pub fn replay(buffer: &mut RgbaBuffer, history: &StrokeHistory, style: StrokeStyle) {
    buffer.clear();
    for stroke in history.strokes() {
        draw_polyline(buffer, stroke.points(), style);
    }
}

fn point_segment_distance_sq(point: Point, start: Point, end: Point) -> f32 {
    let vx = end.x - start.x;
    let vy = end.y - start.y;
    let wx = point.x - start.x;
    let wy = point.y - start.y;

    let length_sq = vx * vx + vy * vy;
    if length_sq <= f32::EPSILON {
        return wx * wx + wy * wy;
    }

    let t = ((wx * vx + wy * vy) / length_sq).clamp(0.0, 1.0);
    let dx = wx - vx * t;
    let dy = wy - vy * t;
    dx * dx + dy * dy
}
