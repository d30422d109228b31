mod app;
mod catalog;
mod config;
mod models;
mod ui;

use app::CatalogApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Material Structures Browser"),
        ..Default::default()
    };

    eframe::run_native(
        "Material Browser",
        options,
        Box::new(|cc| Box::new(CatalogApp::new(cc))),
    )
}
