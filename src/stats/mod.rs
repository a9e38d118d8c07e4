//! Stats module - descriptive summaries of the displayed series

mod calculator;

pub use calculator::{CategorySummary, OverallPeak, StatsCalculator};
