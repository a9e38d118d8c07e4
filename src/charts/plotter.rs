//! Chart Plotter Module
//! Interactive market-value line chart and tables using egui_plot.

use crate::charts::SeriesStyles;
use crate::config::ChartConfig;
use crate::data::{ChartSeries, TableColumn, TableRow, TableSort};
use crate::format::{
    date_to_x, format_axis_date, format_axis_value, format_currency_m, format_date, x_to_date,
};
use crate::stats::CategorySummary;
use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText};
use egui_plot::{Corner, GridInput, GridMark, Legend, Line, Plot, PlotPoints, Points};

/// Upper bound on labelled x grid marks.
const MAX_X_MARKS: usize = 16;

/// One category's series with its display color.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSeries {
    pub series: ChartSeries,
    pub rgb: [u8; 3],
}

impl StyledSeries {
    pub fn color32(&self) -> Color32 {
        let [r, g, b] = self.rgb;
        Color32::from_rgb(r, g, b)
    }

    pub fn xy(&self) -> Vec<[f64; 2]> {
        self.series
            .points
            .iter()
            .map(|p| [date_to_x(p.timestamp), p.value])
            .collect()
    }
}

/// Everything needed to draw the chart, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub series: Vec<StyledSeries>,
}

impl ChartData {
    /// Order and color the series.
    ///
    /// Colors are assigned over `all_categories` so a category keeps its
    /// color whatever else is selected.
    pub fn build(
        title: &str,
        series: Vec<ChartSeries>,
        all_categories: &[String],
        styles: &SeriesStyles,
    ) -> Self {
        let assigned = styles.assign(&styles.ordered(all_categories));
        let mut styled: Vec<StyledSeries> = series
            .into_iter()
            .map(|s| {
                let rgb = assigned
                    .iter()
                    .find(|(name, _)| *name == s.category)
                    .map(|(_, rgb)| *rgb)
                    .unwrap_or_else(|| styles.rgb(&s.category, assigned.len()));
                StyledSeries { series: s, rgb }
            })
            .collect();

        let rank = |category: &str| {
            assigned
                .iter()
                .position(|(name, _)| name == category)
                .unwrap_or(usize::MAX)
        };
        styled.sort_by_key(|s| rank(&s.series.category));

        Self {
            title: title.to_string(),
            series: styled,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.series.points.is_empty())
    }

    /// Min and max x over all points.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        self.bounds(|p| p[0])
    }

    /// Min and max y over all points.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.bounds(|p| p[1])
    }

    fn bounds(&self, axis: impl Fn(&[f64; 2]) -> f64) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.xy())
            .map(|p| axis(&p))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Jan 1st marks between `min_x` and `max_x`, thinned to at most `MAX_X_MARKS`.
///
/// Returns `(x, step_size)` pairs.
pub fn year_marks(min_x: f64, max_x: f64) -> Vec<(f64, f64)> {
    let (Some(start), Some(end)) = (x_to_date(min_x), x_to_date(max_x)) else {
        return Vec::new();
    };
    let years = (end.year() - start.year() + 1).max(1) as usize;
    let stride = years.div_ceil(MAX_X_MARKS).max(1);

    (start.year()..=end.year() + 1)
        .step_by(stride)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .map(date_to_x)
        .filter(|&x| x >= min_x && x <= max_x)
        .map(|x| (x, 365.0 * stride as f64))
        .collect()
}

fn x_grid(input: GridInput) -> Vec<GridMark> {
    let (min_x, max_x) = input.bounds;
    let marks = year_marks(min_x, max_x);
    if marks.len() < 2 {
        // Zoomed into less than a year: let egui pick the spacing.
        return egui_plot::log_grid_spacer(10)(input);
    }
    marks
        .into_iter()
        .map(|(value, step_size)| GridMark { value, step_size })
        .collect()
}

/// Hover text for a plot position.
pub fn hover_label(name: &str, x: f64, y: f64) -> String {
    let date = x_to_date(x).map(format_date).unwrap_or_default();
    if name.is_empty() {
        format!("{}\n{}", date, format_currency_m(y))
    } else {
        format!("{}\n{}\n{}", name, date, format_currency_m(y))
    }
}

/// Draws the chart and tables with egui.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Multi-line market-value chart with point markers.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart_data: &ChartData, config: &ChartConfig) {
        let span = chart_data
            .x_bounds()
            .map(|(lo, hi)| hi - lo)
            .unwrap_or_default();

        Plot::new("market_value_chart")
            .height(config.height)
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label("Date")
            .y_axis_label("Market value (€ millions)")
            .include_y(0.0)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .x_grid_spacer(x_grid)
            .x_axis_formatter(move |mark, _range| format_axis_date(mark.value, span))
            .y_axis_formatter(|mark, _range| format_axis_value(mark.value))
            .label_formatter(|name, value| hover_label(name, value.x, value.y))
            .show(ui, |plot_ui| {
                for styled in &chart_data.series {
                    let color = styled.color32();
                    let xy = styled.xy();
                    let name = &styled.series.category;

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(xy.iter().copied()))
                            .color(color)
                            .width(config.line_width)
                            .name(name),
                    );

                    if config.show_points {
                        plot_ui.points(
                            Points::new(PlotPoints::from_iter(xy.iter().copied()))
                                .radius(config.point_radius)
                                .color(color)
                                .name(name),
                        );
                    }
                }
            });
    }

    /// Per-category summary table.
    pub fn draw_summary_table(
        ui: &mut egui::Ui,
        summaries: &[CategorySummary],
        chart_data: &ChartData,
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Category", "N", "From", "To", "Start", "End", "Change", "Peak",
                            "Mean", "Std",
                        ] {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();
                        for summary in summaries {
                            let color = chart_data
                                .series
                                .iter()
                                .find(|s| s.series.category == summary.category)
                                .map(StyledSeries::color32)
                                .unwrap_or(default_text_color);
                            let change = summary.change();
                            let change_color = if change > 0.0 {
                                Color32::from_rgb(40, 167, 69)
                            } else if change < 0.0 {
                                Color32::from_rgb(220, 53, 69)
                            } else {
                                default_text_color
                            };

                            ui.label(RichText::new(&summary.category).size(12.0).color(color));
                            ui.label(summary.count.to_string());
                            ui.label(format_date(summary.first_date));
                            ui.label(format_date(summary.last_date));
                            ui.label(format_currency_m(summary.start_value));
                            ui.label(format_currency_m(summary.end_value));
                            ui.label(RichText::new(format_currency_m(change)).color(change_color));
                            ui.label(format!(
                                "{} ({})",
                                format_currency_m(summary.peak_value),
                                format_date(summary.peak_date)
                            ));
                            ui.label(format_currency_m(summary.mean));
                            if summary.std_dev.is_nan() {
                                ui.label("-");
                            } else {
                                ui.label(format!("{:.2}", summary.std_dev));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Raw value table with clickable headers. Returns the clicked column, if any.
    pub fn draw_value_table(
        ui: &mut egui::Ui,
        rows: &[TableRow],
        sort: TableSort,
        chart_data: &ChartData,
    ) -> Option<TableColumn> {
        let mut clicked = None;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("value_table")
                    .striped(true)
                    .min_col_width(120.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for (column, title) in [
                            (TableColumn::Date, "Date"),
                            (TableColumn::Value, "Market value"),
                            (TableColumn::Category, "Category"),
                        ] {
                            let arrow = match (sort.column == column, sort.ascending) {
                                (true, true) => " ⏶",
                                (true, false) => " ⏷",
                                (false, _) => "",
                            };
                            let header = egui::Button::new(
                                RichText::new(format!("{}{}", title, arrow)).strong(),
                            )
                            .frame(false);
                            if ui.add(header).clicked() {
                                clicked = Some(column);
                            }
                        }
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();
                        for row in rows {
                            let color = chart_data
                                .series
                                .iter()
                                .find(|s| s.series.category == row.category)
                                .map(StyledSeries::color32)
                                .unwrap_or(default_text_color);
                            ui.label(format_date(row.timestamp));
                            ui.label(format_currency_m(row.value));
                            ui.label(RichText::new(&row.category).color(color));
                            ui.end_row();
                        }
                    });
            });

        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryStyle;
    use crate::data::SeriesPoint;

    fn series(category: &str, years: &[i32]) -> ChartSeries {
        ChartSeries {
            category: category.to_string(),
            points: years
                .iter()
                .map(|&y| SeriesPoint {
                    timestamp: NaiveDate::from_ymd_opt(y, 6, 1).unwrap(),
                    value: y as f64 - 2000.0,
                    category: category.to_string(),
                })
                .collect(),
        }
    }

    fn styles() -> SeriesStyles {
        SeriesStyles::from_config(&[
            CategoryStyle {
                name: "Barcelona".into(),
                color: "#2196f3".into(),
            },
            CategoryStyle {
                name: "Paris SG".into(),
                color: "#ef5350".into(),
            },
        ])
    }

    #[test]
    fn test_build_orders_by_style_then_appearance() {
        let all = vec![
            "Santos".to_string(),
            "Barcelona".to_string(),
            "Paris SG".to_string(),
        ];
        let data = ChartData::build(
            "t",
            vec![series("Santos", &[2010]), series("Paris SG", &[2018]), series("Barcelona", &[2014])],
            &all,
            &styles(),
        );
        let names: Vec<_> = data.series.iter().map(|s| s.series.category.as_str()).collect();
        assert_eq!(names, vec!["Barcelona", "Paris SG", "Santos"]);
        assert_eq!(data.series[0].rgb, [0x21, 0x96, 0xf3]);
    }

    #[test]
    fn test_colors_stable_across_selection() {
        let all = vec!["Santos".to_string(), "Al-Hilal".to_string()];
        let both = ChartData::build(
            "t",
            vec![series("Santos", &[2010]), series("Al-Hilal", &[2023])],
            &all,
            &styles(),
        );
        let only = ChartData::build("t", vec![series("Al-Hilal", &[2023])], &all, &styles());
        assert_eq!(both.series[1].rgb, only.series[0].rgb);
    }

    #[test]
    fn test_bounds() {
        let data = ChartData::build(
            "t",
            vec![series("Santos", &[2010, 2013]), series("Barcelona", &[2014, 2017])],
            &[],
            &styles(),
        );
        let (lo, hi) = data.y_bounds().unwrap();
        assert_eq!((lo, hi), (10.0, 17.0));
        assert!(data.x_bounds().is_some());
        assert!(ChartData::default().x_bounds().is_none());
        assert!(ChartData::default().is_empty());
    }

    #[test]
    fn test_year_marks() {
        let min = date_to_x(NaiveDate::from_ymd_opt(2009, 7, 23).unwrap());
        let max = date_to_x(NaiveDate::from_ymd_opt(2024, 12, 13).unwrap());
        let marks = year_marks(min, max);
        assert_eq!(marks.len(), 15);
        assert_eq!(
            x_to_date(marks[0].0),
            NaiveDate::from_ymd_opt(2010, 1, 1)
        );

        let far = date_to_x(NaiveDate::from_ymd_opt(2100, 1, 1).unwrap());
        assert!(year_marks(min, far).len() <= MAX_X_MARKS);
    }

    #[test]
    fn test_hover_label() {
        let x = date_to_x(NaiveDate::from_ymd_opt(2013, 9, 2).unwrap());
        assert_eq!(hover_label("Barcelona", x, 50.0), "Barcelona\n2013-09-02\n€50.00M");
        assert_eq!(hover_label("", x, 50.0), "2013-09-02\n€50.00M");
    }
}
