//! Dataset Module
//! Immutable, shareable collection of validated records.

use super::record::{RawRecord, Record, ValidationError};
use std::collections::HashSet;
use std::sync::Arc;

/// Market-value history compiled into the binary.
pub const BUILTIN_DATASET_JSON: &str = include_str!("../../assets/market_value.json");

/// Full immutable collection of records.
///
/// Cloning is cheap: clones share the same backing slice, which is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// Wrap already-validated records. Order is preserved as given.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Validate raw records, failing on the first malformed one.
    ///
    /// An empty source is rejected: there is nothing to show.
    pub fn from_raw(raw: Vec<RawRecord>) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyDataset);
        }
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.category.as_str()))
            .map(|r| r.category.clone())
            .collect()
    }
}
