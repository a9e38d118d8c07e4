//! Chart Viewer Widget
//! Central panel: market-value chart, per-category summary and the value table.

use crate::charts::{ChartData, ChartPlotter, SeriesStyles};
use crate::config::AppConfig;
use crate::data::{
    Dataset, FilteredView, Selection, SeriesView, TableColumn, TableRow, TableSort,
};
use crate::format::{format_currency_m, format_date};
use crate::stats::{CategorySummary, StatsCalculator};
use egui::{Color32, RichText, ScrollArea};

/// Everything derived from the current dataset and selection.
#[derive(Default)]
pub struct ChartViewer {
    filtered: FilteredView,
    chart_data: ChartData,
    summaries: Vec<CategorySummary>,
    rows: Vec<TableRow>,
    sort: TableSort,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every projection from scratch.
    pub fn update(
        &mut self,
        dataset: &Dataset,
        selection: &Selection,
        styles: &SeriesStyles,
        title: &str,
    ) {
        let filtered = SeriesView::filter(dataset, selection);
        let series = SeriesView::to_chart_series(&filtered);
        let mut summaries = StatsCalculator::compute_all_parallel(&series);
        let chart_data = ChartData::build(title, series, &dataset.categories(), styles);

        // Summaries follow the chart's display order.
        summaries.sort_by_key(|s| {
            chart_data
                .series
                .iter()
                .position(|c| c.series.category == s.category)
                .unwrap_or(usize::MAX)
        });

        let mut rows = SeriesView::to_table(&filtered);
        SeriesView::sort_rows(&mut rows, self.sort);

        log::debug!(
            "view recomputed: {} of {} records, {} series",
            filtered.len(),
            dataset.len(),
            chart_data.series.len()
        );

        self.filtered = filtered;
        self.chart_data = chart_data;
        self.summaries = summaries;
        self.rows = rows;
    }

    pub fn chart_data(&self) -> &ChartData {
        &self.chart_data
    }

    /// Table rows in their current display order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn summaries(&self) -> &[CategorySummary] {
        &self.summaries
    }

    pub fn sort(&self) -> TableSort {
        self.sort
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Apply a header click to the table order.
    pub fn toggle_sort(&mut self, column: TableColumn) {
        self.sort = self.sort.toggled(column);
        SeriesView::sort_rows(&mut self.rows, self.sort);
    }

    pub fn show(&mut self, ui: &mut egui::Ui, config: &AppConfig) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(&config.title).size(24.0).strong());
                ui.label(RichText::new(&config.subtitle).size(13.0));
                ui.add_space(10.0);

                if self.is_empty() {
                    Self::draw_empty_notice(ui);
                    return;
                }

                ui.label(RichText::new("Interactive chart").size(18.0).strong());
                ui.add_space(5.0);
                ChartPlotter::draw_line_chart(ui, &self.chart_data, &config.chart);

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                ui.label(RichText::new("Summary by category").size(18.0).strong());
                if let Some(peak) = StatsCalculator::overall_peak(&self.summaries) {
                    ui.label(
                        RichText::new(format!(
                            "Peak: {} with {} on {}",
                            format_currency_m(peak.value),
                            peak.category,
                            format_date(peak.date)
                        ))
                        .size(13.0),
                    );
                }
                ui.add_space(5.0);
                ChartPlotter::draw_summary_table(ui, &self.summaries, &self.chart_data);

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                ui.label(RichText::new("Market value history").size(18.0).strong());
                ui.label(
                    RichText::new(format!("{} records", self.rows.len()))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(5.0);
                if let Some(column) =
                    ChartPlotter::draw_value_table(ui, &self.rows, self.sort, &self.chart_data)
                {
                    self.toggle_sort(column);
                }

                ui.add_space(10.0);
                ui.separator();
                ui.label(
                    RichText::new(format!("ℹ {}", config.footnote))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });
    }

    /// Shown instead of the chart when nothing is selected.
    fn draw_empty_notice(ui: &mut egui::Ui) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, Color32::from_rgb(255, 193, 7)))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("⚠ Select at least one category to display the analysis.")
                        .size(16.0)
                        .color(Color32::from_rgb(255, 193, 7)),
                );
            });
    }
}
