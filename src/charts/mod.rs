//! Charts module - Chart rendering

mod plotter;
mod renderer;
mod style;

pub use plotter::{hover_label, year_marks, ChartData, ChartPlotter, StyledSeries};
pub use renderer::{RenderError, StaticChartRenderer};
pub use style::{SeriesStyles, PALETTE};
