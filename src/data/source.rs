//! Dataset retrieval.
//!
//! Every failure here (transport, HTTP status, body shape) surfaces as a
//! `DataUnavailable` error; callers decide whether to swallow it.

use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::domain::Dataset;
use crate::error::AppError;

/// Anything that can produce the chart's dataset.
pub trait DatasetSource {
    /// Short description used in log lines.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Dataset, AppError>;
}

/// Fetch the dataset with a single HTTP GET.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Dataset, AppError> {
        tracing::debug!(url = %self.url, "fetching dataset");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::data_unavailable(format!("Dataset request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data_unavailable(format!(
                "Dataset request failed with status {}.",
                resp.status()
            )));
        }

        let dataset: Dataset = resp
            .json()
            .map_err(|e| AppError::data_unavailable(format!("Failed to parse dataset response: {e}")))?;

        tracing::debug!(points = dataset.len(), "dataset received");
        Ok(dataset)
    }
}

/// Read the dataset from a local JSON file (same document shape as the URL).
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Dataset, AppError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::data_unavailable(format!(
                "Failed to read dataset '{}': {e}",
                self.path.display()
            ))
        })?;
        Dataset::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_file_is_data_unavailable() {
        let src = FileSource::new("does/not/exist.json");
        let err = src.fetch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn reads_dataset_file() {
        let dir = std::env::temp_dir().join("gdp-bars-source-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gdp.json");
        std::fs::write(
            &path,
            r#"{"data": [["2010-01-01", 14000]], "from_date": "2010-01-01", "to_date": "2010-04-01"}"#,
        )
        .unwrap();

        let ds = FileSource::new(&path).fetch().unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.data[0].value, 14000.0);
    }

    #[test]
    fn unreachable_url_is_data_unavailable() {
        // Port 9 on localhost is the discard service; nothing listens there in CI.
        let src = HttpSource::new("http://127.0.0.1:9/GDP-data.json");
        let err = src.fetch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    }
}
