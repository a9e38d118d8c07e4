//! Static Chart Renderer
//! Draws the current chart off-screen with plotters and encodes it as PNG.
//!
//! Layout follows the interactive chart on a dark background:
//! 1. Title, left aligned
//! 2. Lines with point markers, one color per category
//! 3. Year ticks on x, EUR millions on y, legend at the bottom

use crate::charts::ChartData;
use crate::format::{date_to_x, format_axis_date, format_axis_value};
use chrono::NaiveDate;
use image::RgbImage;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("nothing to render")]
    NoData,
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

const BACKGROUND: RGBColor = RGBColor(0x1c, 0x1c, 0x1c);
const GRID: RGBColor = RGBColor(0x4a, 0x4a, 0x4a);

/// Renders `ChartData` to RGB buffers and PNG files.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Padded x and y ranges. y always starts at zero.
    pub fn plot_ranges(data: &ChartData) -> Option<((f64, f64), (f64, f64))> {
        let (x_min, x_max) = data.x_bounds()?;
        let (_, y_max) = data.y_bounds()?;

        let x_pad = ((x_max - x_min) * 0.03).max(15.0);
        let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
        Some(((x_min - x_pad, x_max + x_pad), (0.0, y_top)))
    }

    /// Render into a packed RGB buffer of `width * height * 3` bytes.
    pub fn render_rgb(data: &ChartData, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let ((x_min, x_max), (y_min, y_max)) = Self::plot_ranges(data).ok_or(RenderError::NoData)?;
        let span = x_max - x_min;
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&BACKGROUND).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&data.title, ("sans-serif", 24).into_font().color(&WHITE))
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .bold_line_style(GRID)
                .light_line_style(BACKGROUND)
                .axis_style(GRID)
                .label_style(("sans-serif", 14).into_font().color(&WHITE))
                .x_labels(12)
                .x_label_formatter(&|x| format_axis_date(*x, span))
                .y_label_formatter(&|y| format_axis_value(*y))
                .y_desc("Market value (€ millions)")
                .draw()
                .map_err(draw_err)?;

            for styled in &data.series {
                let [r, g, b] = styled.rgb;
                let color = RGBColor(r, g, b);
                let points: Vec<(f64, f64)> = styled
                    .series
                    .points
                    .iter()
                    .map(|p| (date_to_x(p.timestamp), p.value))
                    .collect();

                chart
                    .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))
                    .map_err(draw_err)?
                    .label(styled.series.category.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                    });

                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                    )
                    .map_err(draw_err)?;
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(BACKGROUND.mix(0.9))
                .border_style(GRID)
                .label_font(("sans-serif", 14).into_font().color(&WHITE))
                .draw()
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        Ok(buffer)
    }

    /// Render and save as PNG.
    pub fn render_png(
        data: &ChartData,
        width: u32,
        height: u32,
        output_path: &Path,
    ) -> Result<(), RenderError> {
        let buffer = Self::render_rgb(data, width, height)?;
        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("buffer size mismatch".to_string()))?;
        image.save(output_path)?;
        log::info!("chart exported to {}", output_path.display());
        Ok(())
    }

    /// First and last date drawn, for status messages.
    pub fn date_span(data: &ChartData) -> Option<(NaiveDate, NaiveDate)> {
        let dates = data
            .series
            .iter()
            .flat_map(|s| s.series.points.iter().map(|p| p.timestamp));
        let (min, max) = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })?;
        Some((min, max))
    }
}

fn draw_err<E: std::error::Error + Send + Sync>(
    e: plotters::drawing::DrawingAreaErrorKind<E>,
) -> RenderError {
    RenderError::Draw(e.to_string())
}
