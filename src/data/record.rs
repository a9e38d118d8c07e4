//! Record Module
//! One timestamped valuation tagged with a category, plus load-time validation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

/// Reasons a dataset is rejected at load time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index}: unparseable date {raw:?}")]
    InvalidDate { index: usize, raw: String },
    #[error("record {index}: value {raw:?} is not a finite number")]
    NonNumericValue { index: usize, raw: String },
    #[error("record {index}: negative value {value}")]
    NegativeValue { index: usize, value: f64 },
    #[error("record {index}: empty category")]
    EmptyCategory { index: usize },
    #[error("dataset contains no records")]
    EmptyDataset,
}

/// One observed valuation (EUR millions) for one category at one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDate,
    pub value: f64,
    pub category: String,
}

impl Record {
    pub fn new(timestamp: NaiveDate, value: f64, category: impl Into<String>) -> Self {
        Self {
            timestamp,
            value,
            category: category.into(),
        }
    }
}

/// Value cell as it appears in a source file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// Unvalidated record as read from JSON or CSV.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    pub date: Option<String>,
    pub value: Option<RawValue>,
    pub category: Option<String>,
}

impl RawRecord {
    /// Validate into a `Record`. `index` is the position in the source, used in errors.
    pub fn validate(self, index: usize) -> Result<Record, ValidationError> {
        let date = self.date.ok_or(ValidationError::MissingField {
            index,
            field: "date",
        })?;
        let timestamp =
            parse_date(&date).ok_or_else(|| ValidationError::InvalidDate { index, raw: date })?;

        let value = match self.value {
            None => {
                return Err(ValidationError::MissingField {
                    index,
                    field: "value",
                })
            }
            Some(RawValue::Number(v)) => v,
            Some(RawValue::Text(text)) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::NonNumericValue {
                    index,
                    raw: text.clone(),
                })?,
        };
        if !value.is_finite() {
            return Err(ValidationError::NonNumericValue {
                index,
                raw: value.to_string(),
            });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeValue { index, value });
        }

        let category = self.category.ok_or(ValidationError::MissingField {
            index,
            field: "category",
        })?;
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory { index });
        }

        Ok(Record::new(timestamp, value, category))
    }
}

/// Parse an ISO-8601 date, a naive date-time (`T` or space separated) or an RFC 3339
/// timestamp down to its date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, value: RawValue, category: &str) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            value: Some(value),
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn test_valid_record() {
        let record = raw("2013-09-02", RawValue::Number(50.0), "Barcelona")
            .validate(0)
            .unwrap();
        assert_eq!(record.timestamp, NaiveDate::from_ymd_opt(2013, 9, 2).unwrap());
        assert_eq!(record.value, 50.0);
        assert_eq!(record.category, "Barcelona");
    }

    #[test]
    fn test_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2009, 7, 23);
        assert_eq!(parse_date("2009-07-23"), expected);
        assert_eq!(parse_date("2009-07-23T00:00:00"), expected);
        assert_eq!(parse_date("2009-07-23 00:00:00"), expected);
        assert_eq!(parse_date("2009-07-23 18:45:10.250"), expected);
        assert_eq!(parse_date("2009-07-23T10:30:00+02:00"), expected);
        assert_eq!(parse_date("23/07/2009"), None);
        assert_eq!(parse_date("2009-02-30"), None);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = raw("not-a-date", RawValue::Number(1.0), "Santos")
            .validate(3)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                index: 3,
                raw: "not-a-date".to_string()
            }
        );
    }

    #[test]
    fn test_negative_value_rejected() {
        let err = raw("2020-01-01", RawValue::Number(-1.0), "Santos")
            .validate(0)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NegativeValue { .. }));
    }

    #[test]
    fn test_text_values() {
        let record = raw("2020-01-01", RawValue::Text(" 12.5 ".into()), "Santos")
            .validate(0)
            .unwrap();
        assert_eq!(record.value, 12.5);

        let err = raw("2020-01-01", RawValue::Text("lots".into()), "Santos")
            .validate(0)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonNumericValue { .. }));

        let err = raw("2020-01-01", RawValue::Text("NaN".into()), "Santos")
            .validate(0)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonNumericValue { .. }));
    }

    #[test]
    fn test_missing_and_empty_fields() {
        let mut record = raw("2020-01-01", RawValue::Number(1.0), "Santos");
        record.value = None;
        assert_eq!(
            record.validate(1).unwrap_err(),
            ValidationError::MissingField {
                index: 1,
                field: "value"
            }
        );

        let err = raw("2020-01-01", RawValue::Number(1.0), "   ")
            .validate(2)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyCategory { index: 2 });

        let err = RawRecord::default().validate(0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                index: 0,
                field: "date"
            }
        );
    }

    #[test]
    fn test_zero_value_allowed() {
        let record = raw("2020-01-01", RawValue::Number(0.0), "Santos")
            .validate(0)
            .unwrap();
        assert_eq!(record.value, 0.0);
    }
}
