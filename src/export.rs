//! Table Export Module
//! Writes the displayed table rows to CSV through a polars DataFrame.

use crate::data::TableRow;
use crate::format::format_date;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export")]
    NoRows,
    #[error("could not create file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV writing failed: {0}")]
    Csv(#[from] PolarsError),
}

/// Table rows to CSV with a `date,value,category` header.
pub struct TableExporter;

impl TableExporter {
    /// Build the DataFrame written by `write_csv`.
    pub fn to_dataframe(rows: &[TableRow]) -> Result<DataFrame, ExportError> {
        let dates: Vec<String> = rows.iter().map(|r| format_date(r.timestamp)).collect();
        let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
        let categories: Vec<String> = rows.iter().map(|r| r.category.clone()).collect();

        let df = DataFrame::new(vec![
            Column::new("date".into(), dates),
            Column::new("value".into(), values),
            Column::new("category".into(), categories),
        ])?;
        Ok(df)
    }

    /// Write rows in the given order. Returns the number of rows written.
    pub fn write_csv(rows: &[TableRow], output_path: &Path) -> Result<usize, ExportError> {
        if rows.is_empty() {
            return Err(ExportError::NoRows);
        }
        let mut df = Self::to_dataframe(rows)?;
        let mut file = File::create(output_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;

        log::info!("{} rows exported to {}", rows.len(), output_path.display());
        Ok(rows.len())
    }
}
