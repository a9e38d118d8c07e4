//! Market Value History Viewer
//!
//! Filters a category-tagged valuation time series and shows it as an
//! interactive multi-line chart plus a sortable table.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod format;
pub mod gui;
pub mod stats;
