#![cfg_attr(windows, windows_subsystem = "windows")]

use anyhow::anyhow;
use anyhow::Result;
use eframe::egui;

mod app;
mod dimensions;
mod loader;
mod notify;
mod presets;
mod resizer;
mod session;

use app::ResizerApp;

fn main() -> Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([565.0, 680.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Banner Resizer",
        options,
        Box::new(|_| Box::new(ResizerApp::new())),
    )
    .map_err(|e| anyhow!("Application error: {}", e))
}
