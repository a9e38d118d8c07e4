//! Statistics Calculator Module
//! Descriptive per-category summaries of the currently displayed series.

use crate::data::ChartSeries;
use chrono::NaiveDate;
use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Summary of one category's points.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub start_value: f64,
    pub end_value: f64,
    pub peak_value: f64,
    pub peak_date: NaiveDate,
    pub min_value: f64,
    pub mean: f64,
    /// Sample standard deviation; NaN for a single point.
    pub std_dev: f64,
}

impl CategorySummary {
    /// End value minus start value.
    pub fn change(&self) -> f64 {
        self.end_value - self.start_value
    }
}

/// Highest point across all summarized categories.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallPeak {
    pub category: String,
    pub date: NaiveDate,
    pub value: f64,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize one series. `None` for a series without points.
    pub fn summarize(series: &ChartSeries) -> Option<CategorySummary> {
        let first = series.points.first()?;
        let last = series.points.last()?;
        let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();

        // First occurrence wins on ties.
        let peak = series.points.iter().fold(first, |best, p| {
            if p.value > best.value {
                p
            } else {
                best
            }
        });

        Some(CategorySummary {
            category: series.category.clone(),
            count: values.len(),
            first_date: first.timestamp,
            last_date: last.timestamp,
            start_value: first.value,
            end_value: last.value,
            peak_value: peak.value,
            peak_date: peak.timestamp,
            min_value: Statistics::min(values.iter()),
            mean: Statistics::mean(values.iter()),
            std_dev: Statistics::std_dev(values.iter()),
        })
    }

    /// Summaries for every series, computed in parallel, in series order.
    pub fn compute_all_parallel(series: &[ChartSeries]) -> Vec<CategorySummary> {
        series.par_iter().filter_map(Self::summarize).collect()
    }

    pub fn overall_peak(summaries: &[CategorySummary]) -> Option<OverallPeak> {
        summaries
            .iter()
            .fold(None::<&CategorySummary>, |best, s| match best {
                Some(b) if b.peak_value >= s.peak_value => Some(b),
                _ => Some(s),
            })
            .map(|s| OverallPeak {
                category: s.category.clone(),
                date: s.peak_date,
                value: s.peak_value,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SeriesPoint;

    fn series(category: &str, points: &[(i32, f64)]) -> ChartSeries {
        ChartSeries {
            category: category.to_string(),
            points: points
                .iter()
                .map(|&(year, value)| SeriesPoint {
                    timestamp: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                    value,
                    category: category.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary_values() {
        let s = series("Paris SG", &[(2017, 150.0), (2018, 180.0), (2019, 180.0), (2023, 60.0)]);
        let summary = StatsCalculator::summarize(&s).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.start_value, 150.0);
        assert_eq!(summary.end_value, 60.0);
        assert_eq!(summary.change(), -90.0);
        assert_eq!(summary.peak_value, 180.0);
        assert_eq!(summary.peak_date, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(summary.min_value, 60.0);
        assert!((summary.mean - 142.5).abs() < 1e-9);
        assert!((summary.std_dev - 56.789083458002736).abs() < 1e-6);
    }

    #[test]
    fn test_single_point_and_empty() {
        let summary = StatsCalculator::summarize(&series("Santos", &[(2024, 15.0)])).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.change(), 0.0);
        assert!(summary.std_dev.is_nan());

        assert!(StatsCalculator::summarize(&series("Empty", &[])).is_none());
    }

    #[test]
    fn test_parallel_keeps_order_and_overall_peak() {
        let all = vec![
            series("Santos", &[(2009, 1.0), (2013, 50.0)]),
            series("Barcelona", &[(2013, 50.0), (2017, 100.0)]),
            series("Paris SG", &[(2017, 150.0), (2018, 180.0)]),
        ];
        let summaries = StatsCalculator::compute_all_parallel(&all);
        let names: Vec<_> = summaries.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Santos", "Barcelona", "Paris SG"]);

        let peak = StatsCalculator::overall_peak(&summaries).unwrap();
        assert_eq!(peak.category, "Paris SG");
        assert_eq!(peak.value, 180.0);
        assert!(StatsCalculator::overall_peak(&[]).is_none());
    }
}
