//! Market Value History Viewer
//!
//! Desktop viewer for one athlete's market value across clubs: a category
//! multi-select driving an interactive chart and table.

use anyhow::Context;
use eframe::egui;
use valuation_view::config::AppConfig;
use valuation_view::data::{DataSource, DatasetLoader};
use valuation_view::gui::ValuationApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load();

    // The dataset is validated once, up front; a bad record stops startup.
    let source = match &config.dataset_path {
        Some(path) => DataSource::File(path.clone()),
        None => DataSource::Builtin,
    };
    let dataset = DatasetLoader::load(&source)
        .with_context(|| format!("failed to load dataset from {}", source.label()))?;
    log::info!(
        "dataset ready: {} records, {} categories",
        dataset.len(),
        dataset.categories().len()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title(&config.window_title),
        ..Default::default()
    };

    // Run the application
    let window_title = config.window_title.clone();
    eframe::run_native(
        &window_title,
        options,
        Box::new(|cc| Ok(Box::new(ValuationApp::new(cc, config, dataset, source)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))
}
