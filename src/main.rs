//! Log Delta Viewer - a drag-and-drop log viewer that shows each line's
//! time offset relative to a clicked reference line.

mod core;
mod gui;

use crate::core::config::AppSettings;
use gui::LogDeltaViewerApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = AppSettings::load();
    let (width, height) = settings.window_size.unwrap_or((1024.0, 768.0));

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Log Delta Viewer",
        options,
        Box::new(|cc| Ok(Box::new(LogDeltaViewerApp::new(cc, settings)))),
    )
}
