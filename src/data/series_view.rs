//! Series View Module
//! Filters a tagged time series by category and projects it for the chart and table.

use super::dataset::Dataset;
use super::record::Record;
use super::selection::Selection;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Records matching a selection, ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    records: Vec<Record>,
}

impl FilteredView {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reuse the filtered records as a dataset of their own.
    pub fn to_dataset(&self) -> Dataset {
        Dataset::from_records(self.records.clone())
    }
}

/// One plotted point; the category travels along for tooltips.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: NaiveDate,
    pub value: f64,
    pub category: String,
}

/// Time-ordered points of a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub category: String,
    pub points: Vec<SeriesPoint>,
}

/// Raw table row. Formatting is applied only when drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub timestamp: NaiveDate,
    pub value: f64,
    pub category: String,
}

/// Table column that can drive sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableColumn {
    #[default]
    Date,
    Value,
    Category,
}

/// Display-only sort key and direction for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub column: TableColumn,
    pub ascending: bool,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            column: TableColumn::Date,
            ascending: true,
        }
    }
}

impl TableSort {
    /// Header click: same column flips direction, a new column starts ascending.
    pub fn toggled(self, column: TableColumn) -> Self {
        if self.column == column {
            Self {
                column,
                ascending: !self.ascending,
            }
        } else {
            Self {
                column,
                ascending: true,
            }
        }
    }
}

/// Stateless projections over a dataset and a selection.
pub struct SeriesView;

impl SeriesView {
    /// Records whose category is selected, stably sorted by timestamp.
    ///
    /// Unknown categories in the selection match nothing; an empty
    /// selection yields an empty view.
    pub fn filter(dataset: &Dataset, selection: &Selection) -> FilteredView {
        if selection.is_empty() {
            return FilteredView::default();
        }

        let mut records: Vec<Record> = dataset
            .records()
            .iter()
            .filter(|r| selection.contains(&r.category))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.timestamp);

        FilteredView { records }
    }

    /// Group the view by category, keeping time order within each group.
    ///
    /// Groups appear in order of their first point.
    pub fn to_chart_series(view: &FilteredView) -> Vec<ChartSeries> {
        let mut series: Vec<ChartSeries> = Vec::new();

        for record in view.records() {
            let point = SeriesPoint {
                timestamp: record.timestamp,
                value: record.value,
                category: record.category.clone(),
            };
            match series.iter_mut().find(|s| s.category == record.category) {
                Some(existing) => existing.points.push(point),
                None => series.push(ChartSeries {
                    category: record.category.clone(),
                    points: vec![point],
                }),
            }
        }

        series
    }

    /// Table rows in the view's order.
    pub fn to_table(view: &FilteredView) -> Vec<TableRow> {
        view.records()
            .iter()
            .map(|r| TableRow {
                timestamp: r.timestamp,
                value: r.value,
                category: r.category.clone(),
            })
            .collect()
    }

    /// Stable re-sort of table rows for display.
    pub fn sort_rows(rows: &mut [TableRow], sort: TableSort) {
        rows.sort_by(|a, b| {
            let ord = match sort.column {
                TableColumn::Date => a.timestamp.cmp(&b.timestamp),
                TableColumn::Value => a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal),
                TableColumn::Category => a.category.cmp(&b.category),
            };
            if sort.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }
}
