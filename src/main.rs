use eframe::egui;
use sketch_solver::gui::SketchApp;
use sketch_solver::{logging, settings};

fn main() -> anyhow::Result<()> {
    let settings = settings::load()?;
    logging::init(settings.debug_logging);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sketch Solver",
        native_options,
        Box::new(move |_cc| Box::new(SketchApp::new(settings))),
    )
    .map_err(|err| anyhow::anyhow!("gui event loop failed: {err}"))
}
