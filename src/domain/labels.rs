//! Labels derived from an observation: quarter, year, and the formatted value.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};

/// First year whose tooltip is anchored to the left of the pointer.
pub const LEFT_ANCHOR_FROM_YEAR: i32 = 2007;

/// Calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Quarter for a zero-based month index (0 = January).
    pub fn from_month0(month0: u32) -> Self {
        match month0 / 3 {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from_month0(date.month0())
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        };
        write!(f, "Q{n}")
    }
}

/// Year taken from the leading component of a `YYYY-MM-DD` string.
pub fn year_of(date: &str) -> Option<i32> {
    date.split('-').next()?.parse().ok()
}

/// Year of an observation, read from its `YYYY-MM-DD` form.
pub fn observation_year(date: NaiveDate) -> i32 {
    year_of(&date.to_string()).unwrap_or_else(|| date.year())
}

pub fn is_post_2007(year: i32) -> bool {
    year >= LEFT_ANCHOR_FROM_YEAR
}

/// First tooltip line, e.g. `Q1 2010`.
pub fn period_label(date: NaiveDate) -> String {
    format!("{} {}", Quarter::of(date), observation_year(date))
}

/// Second tooltip line, e.g. `$14,000 billion`.
pub fn value_label(value: f64) -> String {
    format!("${} billion", format_thousands(value))
}

/// Format a number the way an en-US locale prints it: thousands separators and
/// at most three fraction digits, trailing zeros dropped.
pub fn format_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
