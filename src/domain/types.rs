//! Shared domain types.
//!
//! The dataset mirrors the JSON document served by the data source:
//!
//! ```json
//! { "data": [["1947-01-01", 243.1], ...], "from_date": "1947-01-01", "to_date": "2015-07-01" }
//! ```
//!
//! Any other top-level fields (name, description, column names, ...) are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One quarterly GDP observation (billions of dollars).
///
/// Serialized as a two-element array `[date, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(NaiveDate, f64)", into = "(NaiveDate, f64)")]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

impl From<(NaiveDate, f64)> for Observation {
    fn from((date, value): (NaiveDate, f64)) -> Self {
        Self { date, value }
    }
}

impl From<Observation> for (NaiveDate, f64) {
    fn from(obs: Observation) -> Self {
        (obs.date, obs.value)
    }
}

/// The fetched dataset: observations plus the x-axis domain bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub data: Vec<Observation>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl Dataset {
    /// Parse a dataset from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::data_unavailable(format!("Invalid dataset JSON: {e}")))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest observed value, or `None` for an empty dataset.
    pub fn max_value(&self) -> Option<f64> {
        self.data
            .iter()
            .map(|o| o.value)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_ignores_extra_fields() {
        let raw = r#"{
            "name": "Gross Domestic Product",
            "column_names": ["DATE", "VALUE"],
            "data": [["1947-01-01", 243.1], ["1947-04-01", 246.3]],
            "from_date": "1947-01-01",
            "to_date": "1947-04-01"
        }"#;

        let ds = Dataset::from_json_str(raw).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.data[0].date, NaiveDate::from_ymd_opt(1947, 1, 1).unwrap());
        assert_eq!(ds.data[1].value, 246.3);
        assert_eq!(ds.max_value(), Some(246.3));
    }

    #[test]
    fn bad_date_is_data_unavailable() {
        let raw = r#"{"data": [["1947-13-01", 1.0]], "from_date": "1947-01-01", "to_date": "1948-01-01"}"#;
        let err = Dataset::from_json_str(raw).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::DataUnavailable);
    }

    #[test]
    fn empty_dataset_has_no_max() {
        let raw = r#"{"data": [], "from_date": "1947-01-01", "to_date": "1948-01-01"}"#;
        let ds = Dataset::from_json_str(raw).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.max_value(), None);
    }
}
