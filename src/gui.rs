use crate::settings::Settings;
use crate::sketch::sampler::{sample_point, CanvasRect};
use crate::sketch::SketchController;
use eframe::egui;
use std::time::{Duration, Instant};

/// Drawing pad window: a toolbar with Undo / Clear / Solve and the result
/// line, above a canvas that fills the rest of the window and resizes with
/// it.
pub struct SketchApp {
    controller: SketchController,
    texture: Option<egui::TextureHandle>,
}

impl SketchApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            // surface gets its real size on the first frame
            controller: SketchController::new(&settings, (1, 1)),
            texture: None,
        }
    }

    fn upload_surface(&mut self, ctx: &egui::Context) {
        if !self.controller.take_surface_dirty() && self.texture.is_some() {
            return;
        }
        let surface = self.controller.surface();
        let size = [surface.width as usize, surface.height as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &surface.pixels);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST))
            }
        }
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.tick(now);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Undo").clicked() {
                    self.controller.undo(Instant::now());
                }
                if ui.button("Clear").clicked() {
                    self.controller.clear();
                }
                if ui.button("Solve").clicked() {
                    self.controller.request_prediction();
                }
                ui.separator();
                if let Some(display) = self.controller.display() {
                    ui.label(egui::RichText::new(display.text()).strong());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let (rect, response) = ui.allocate_exact_size(available, egui::Sense::drag());

            // canvas pixels track the widget size
            self.controller
                .resize_surface(rect.width().max(1.0) as u32, rect.height().max(1.0) as u32);
            let canvas_size = (self.controller.surface().width, self.controller.surface().height);
            let canvas_rect =
                CanvasRect::new(rect.left(), rect.top(), rect.width(), rect.height());

            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.controller
                        .pointer_down(sample_point((pos.x, pos.y), canvas_rect, canvas_size));
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.controller
                        .pointer_move(sample_point((pos.x, pos.y), canvas_rect, canvas_size));
                }
            }
            if response.drag_stopped() {
                self.controller.pointer_up(Instant::now());
            }

            self.upload_surface(ctx);
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
            if let Some(texture) = &self.texture {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
            }
        });

        // Repaint promptly while drawing; otherwise wake up in time for the
        // idle trigger and to drain finished recognition requests.
        if self.controller.is_drawing() {
            ctx.request_repaint();
        } else {
            let wait = self
                .controller
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(now))
                .unwrap_or(Duration::from_millis(100))
                .min(Duration::from_millis(100));
            ctx.request_repaint_after(wait);
        }
    }
}
