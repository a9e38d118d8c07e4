//! Display formatting for values and dates. Only used when drawing.

use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};

/// `1234.5` -> `€1,234.50M`
pub fn format_currency_m(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole: u64 = whole.parse().unwrap_or(u64::MAX);
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!(
        "€{}{}.{}M",
        sign,
        whole.to_formatted_string(&Locale::en),
        cents
    )
}

/// Short axis form: `150` -> `€150M`, `1.5` -> `€1.5M`
pub fn format_axis_value(value: f64) -> String {
    let text = format!("{:.1}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("€{}M", text)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Chart x coordinate for a date: days since 0001-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Axis tick label for a chart x coordinate.
pub fn format_axis_date(x: f64, span_days: f64) -> String {
    match x_to_date(x) {
        Some(date) if span_days > 3.0 * 365.0 => date.format("%Y").to_string(),
        Some(date) => date.format("%Y-%m").to_string(),
        None => String::new(),
    }
}
