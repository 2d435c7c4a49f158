//! GUI entry point for the dose calculator

mod app;
mod calculator_panel;

use app::DoseCalcApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 760.0])
            .with_min_inner_size([420.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Drug Dosage Calculator",
        options,
        Box::new(|cc| Ok(Box::new(DoseCalcApp::new(cc)))),
    )
}
