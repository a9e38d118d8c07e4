//! Data module - dataset loading, selection and series projections

mod dataset;
mod loader;
mod record;
mod selection;
mod series_view;

pub use dataset::{Dataset, BUILTIN_DATASET_JSON};
pub use loader::{DataSource, DatasetLoader, LoaderError};
pub use record::{parse_date, RawRecord, RawValue, Record, ValidationError};
pub use selection::Selection;
pub use series_view::{
    ChartSeries, FilteredView, SeriesPoint, SeriesView, TableColumn, TableRow, TableSort,
};
