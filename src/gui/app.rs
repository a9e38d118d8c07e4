//! Market Value Viewer Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{SeriesStyles, StaticChartRenderer};
use crate::config::AppConfig;
use crate::data::{DataSource, Dataset, DatasetLoader, Selection};
use crate::export::TableExporter;
use crate::format::format_date;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Complete { dataset: Dataset, source: DataSource },
    Error { source: DataSource, error: String },
}

/// Main application window.
pub struct ValuationApp {
    config: AppConfig,
    styles: SeriesStyles,
    dataset: Dataset,
    source: DataSource,
    selection: Selection,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading; replacing the receiver discards a stale load
    load_rx: Option<Receiver<LoadResult>>,
}

impl ValuationApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        dataset: Dataset,
        source: DataSource,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::with_dataset(config, dataset, source)
    }

    /// Build the app state without a window.
    pub fn with_dataset(config: AppConfig, dataset: Dataset, source: DataSource) -> Self {
        let styles = SeriesStyles::from_config(&config.categories);
        let mut app = Self {
            config,
            styles,
            dataset: Dataset::from_records(Vec::new()),
            source: DataSource::Builtin,
            selection: Selection::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
        };
        app.install_dataset(dataset, source);
        app
    }

    /// Swap in a dataset and select all of its categories.
    fn install_dataset(&mut self, dataset: Dataset, source: DataSource) {
        let categories = dataset.categories();
        self.selection = Selection::all(categories.iter().cloned());
        self.control_panel
            .update_categories(self.styles.assign(&self.styles.ordered(&categories)));
        self.control_panel.set_source(source.label(), dataset.len());
        self.dataset = dataset;
        self.source = source;
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.chart_viewer.update(
            &self.dataset,
            &self.selection,
            &self.styles,
            &self.config.title,
        );
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn chart_viewer(&self) -> &ChartViewer {
        &self.chart_viewer
    }

    /// Load a dataset in a background thread.
    ///
    /// A load already in flight is abandoned: its result is dropped unread.
    fn start_load(&mut self, source: DataSource) {
        if self.load_rx.is_some() {
            log::debug!("discarding in-flight dataset load");
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.control_panel.is_loading = true;
        self.control_panel
            .set_status(&format!("Loading {}...", source.label()));

        thread::spawn(move || {
            let result = match DatasetLoader::load(&source) {
                Ok(dataset) => LoadResult::Complete { dataset, source },
                Err(e) => LoadResult::Error {
                    source,
                    error: e.to_string(),
                },
            };
            // Receiver gone means a newer load replaced this one.
            let _ = tx.send(result);
        });
    }

    /// Handle dataset file selection
    fn handle_browse_dataset(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Dataset", &["json", "csv"])
            .pick_file()
        {
            self.start_load(DataSource::File(path));
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { dataset, source }) => {
                let status = format!(
                    "Loaded {} records, {} categories",
                    dataset.len(),
                    dataset.categories().len()
                );
                self.install_dataset(dataset, source);
                self.control_panel.set_status(&status);
                self.control_panel.is_loading = false;
            }
            Ok(LoadResult::Error { source, error }) => {
                log::warn!("failed to load {}: {}", source.label(), error);
                self.control_panel
                    .set_status(&format!("Error: {}", error));
                self.control_panel.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_status("Error: loader stopped unexpectedly");
                self.control_panel.is_loading = false;
            }
        }
    }

    fn handle_selection_changed(&mut self) {
        log::debug!(
            "selection changed: {:?}",
            self.selection.iter().collect::<Vec<_>>()
        );
        self.refresh_view();
        if self.selection.is_empty() {
            self.control_panel.set_status("No category selected");
        } else {
            self.control_panel
                .set_status(&format!("{} categories selected", self.selection.len()));
        }
    }

    /// Handle PNG export of the current chart
    fn handle_export_png(&mut self) {
        let chart_data = self.chart_viewer.chart_data();
        if chart_data.is_empty() {
            self.control_panel.set_status("No chart to export");
            return;
        }

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("market_value.png")
            .save_file()
        else {
            return; // User cancelled
        };

        let export = &self.config.export;
        match StaticChartRenderer::render_png(chart_data, export.width, export.height, &output_path)
        {
            Ok(()) => {
                let span = StaticChartRenderer::date_span(chart_data)
                    .map(|(first, last)| format!(" ({} to {})", format_date(first), format_date(last)))
                    .unwrap_or_default();
                self.control_panel
                    .set_status(&format!("Exported chart{}", span));
                if export.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        log::warn!("could not open {}: {}", output_path.display(), e);
                    }
                }
            }
            Err(e) => {
                log::error!("chart export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle CSV export of the current table, in its displayed order
    fn handle_export_csv(&mut self) {
        if self.chart_viewer.rows().is_empty() {
            self.control_panel.set_status("No rows to export");
            return;
        }

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("market_value.csv")
            .save_file()
        else {
            return;
        };

        match TableExporter::write_csv(self.chart_viewer.rows(), &output_path) {
            Ok(count) => {
                self.control_panel
                    .set_status(&format!("Exported {} rows", count));
            }
            Err(e) => {
                log::error!("table export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for ValuationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &mut self.selection);

                    match action {
                        ControlPanelAction::BrowseDataset => self.handle_browse_dataset(),
                        ControlPanelAction::UseBuiltin => self.start_load(DataSource::Builtin),
                        ControlPanelAction::SelectionChanged => self.handle_selection_changed(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.config);
        });
    }
}
