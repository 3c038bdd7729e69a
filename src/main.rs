mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod pipeline;
mod state;
mod ui;

use anyhow::anyhow;
use app::HrDiagramApp;
use config::PipelineConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = PipelineConfig::default();
    let run = pipeline::run(&config)?;
    let state = AppState::from(run);

    let (width, height) = config.figure_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 200.0, height as f32])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|cc| Ok(Box::new(HrDiagramApp::new(cc, state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
