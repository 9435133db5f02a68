//! Partscope - explore the parts of a 3D model
//!
//! Opens the bundled model and lists its hierarchy in hover-driven columns
//! next to an orbitable 3D view.

use eframe::egui;
use log::info;

use partscope::constants::{self, panel};
use partscope::gpu::depth_buffer_bits;
use partscope::{ViewerApp, ViewerConfig};

/// Application entry point.
fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::load_or_default();
    info!("Starting {}", constants::APP_TITLE);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(panel::DEFAULT_WINDOW_SIZE)
            .with_title(constants::APP_TITLE),
        renderer: eframe::Renderer::Wgpu,
        depth_buffer: depth_buffer_bits(),
        ..Default::default()
    };

    eframe::run_native(
        constants::APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, config)))),
    )
}
