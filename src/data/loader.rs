//! Dataset Loader Module
//! Reads the embedded dataset or a JSON/CSV file and validates it, failing fast.

use super::dataset::{Dataset, BUILTIN_DATASET_JSON};
use super::record::{RawRecord, RawValue, ValidationError};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("CSV is missing column `{0}`")]
    MissingColumn(&'static str),
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Invalid dataset: {0}")]
    Validation(#[from] ValidationError),
}

/// Where the current dataset came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl DataSource {
    pub fn label(&self) -> String {
        match self {
            DataSource::Builtin => "Built-in dataset".to_string(),
            DataSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

/// Column names expected in CSV sources.
const DATE_COL: &str = "date";
const VALUE_COL: &str = "value";
const CATEGORY_COL: &str = "category";

/// Turns dataset sources into validated datasets.
pub struct DatasetLoader;

impl DatasetLoader {
    /// The dataset compiled into the binary.
    pub fn builtin() -> Result<Dataset, LoaderError> {
        Self::from_json_str(BUILTIN_DATASET_JSON)
    }

    /// Load whichever source is given.
    pub fn load(source: &DataSource) -> Result<Dataset, LoaderError> {
        match source {
            DataSource::Builtin => Self::builtin(),
            DataSource::File(path) => Self::load_path(path),
        }
    }

    /// Load a file, picking the format from its extension.
    pub fn load_path(path: &Path) -> Result<Dataset, LoaderError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        let dataset = match extension.as_deref() {
            Some("json") => Self::load_json(path)?,
            Some("csv") => Self::load_csv(path)?,
            _ => return Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
        };
        log::info!(
            "loaded {} records in {} categories from {}",
            dataset.len(),
            dataset.categories().len(),
            path.display()
        );
        Ok(dataset)
    }

    /// JSON array of `{date, value, category}` objects.
    pub fn load_json(path: &Path) -> Result<Dataset, LoaderError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Dataset, LoaderError> {
        let raw: Vec<RawRecord> = serde_json::from_str(text)?;
        Ok(Dataset::from_raw(raw)?)
    }

    /// CSV with a `date,value,category` header.
    pub fn load_csv(path: &Path) -> Result<Dataset, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;
        Self::from_dataframe(&df)
    }

    /// Extract raw records column-wise, then validate.
    ///
    /// Every cell is read as text so validation sees exactly what the file holds.
    pub fn from_dataframe(df: &DataFrame) -> Result<Dataset, LoaderError> {
        let dates = Self::text_column(df, DATE_COL)?;
        let values = Self::text_column(df, VALUE_COL)?;
        let categories = Self::text_column(df, CATEGORY_COL)?;

        let raw: Vec<RawRecord> = dates
            .into_iter()
            .zip(values)
            .zip(categories)
            .map(|((date, value), category)| RawRecord {
                date,
                value: value.map(RawValue::Text),
                category,
            })
            .collect();

        Ok(Dataset::from_raw(raw)?)
    }

    fn text_column(df: &DataFrame, name: &'static str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name))?;
        let as_text = column.cast(&DataType::String)?;
        let ca = as_text.as_materialized_series().str()?;
        Ok(ca
            .into_iter()
            .map(|cell| cell.map(|s| s.to_string()))
            .collect())
    }
}
