//! Chart layout and data-source configuration.
//!
//! Layout values are plain pixels. The defaults give
//! an 800x400 surface with a 692x330 plot area.

use serde::Serialize;

use crate::error::AppError;

/// Default location of the quarterly GDP dataset.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/GDP-data.json";

/// Environment variable overriding [`DEFAULT_DATA_URL`].
pub const DATA_URL_ENV: &str = "GDP_DATA_URL";

/// Default mount point selector.
pub const DEFAULT_CONTAINER: &str = "#bar-chart-container";

/// Plot size and margins around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartConfig {
    pub plot_width: f64,
    pub plot_height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            plot_width: 692.0,
            plot_height: 330.0,
            margin_top: 40.0,
            margin_right: 54.0,
            margin_bottom: 30.0,
            margin_left: 54.0,
        }
    }
}

impl ChartConfig {
    /// Full drawing surface width (plot plus horizontal margins).
    pub fn surface_width(&self) -> f64 {
        self.plot_width + self.margin_left + self.margin_right
    }

    /// Full drawing surface height (plot plus vertical margins).
    pub fn surface_height(&self) -> f64 {
        self.plot_height + self.margin_top + self.margin_bottom
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("plot width", self.plot_width),
            ("plot height", self.plot_height),
            ("top margin", self.margin_top),
            ("right margin", self.margin_right),
            ("bottom margin", self.margin_bottom),
            ("left margin", self.margin_left),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(AppError::usage(format!("Invalid {name}: {v}")));
            }
        }
        if self.plot_width <= 0.0 || self.plot_height <= 0.0 {
            return Err(AppError::usage(format!(
                "Plot area must be positive, got {}x{}.",
                self.plot_width, self.plot_height
            )));
        }
        if fields[2..].iter().any(|(_, v)| *v < 0.0) {
            return Err(AppError::usage("Margins must not be negative."));
        }
        Ok(())
    }
}

/// Where the container element lives in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum MountSelector {
    Id(String),
    Class(String),
}

impl MountSelector {
    /// Parse `#name` or `.name`; a bare name is treated as an id.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        let (ctor, name): (fn(String) -> Self, &str) = if let Some(rest) = raw.strip_prefix('#') {
            (MountSelector::Id, rest)
        } else if let Some(rest) = raw.strip_prefix('.') {
            (MountSelector::Class, rest)
        } else {
            (MountSelector::Id, raw)
        };

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::usage(format!("Invalid container selector '{raw}'.")));
        }
        Ok(ctor(name.to_string()))
    }
}

impl Default for MountSelector {
    fn default() -> Self {
        MountSelector::Id(DEFAULT_CONTAINER.trim_start_matches('#').to_string())
    }
}

impl std::fmt::Display for MountSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountSelector::Id(name) => write!(f, "#{name}"),
            MountSelector::Class(name) => write!(f, ".{name}"),
        }
    }
}

/// Resolve the dataset URL: explicit value, then `GDP_DATA_URL` (a `.env` file
/// is honored), then the built-in default.
pub fn resolve_data_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }
    dotenvy::dotenv().ok();
    std::env::var(DATA_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_page_size() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.surface_width(), 800.0);
        assert_eq!(cfg.surface_height(), 400.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_layouts() {
        let cfg = ChartConfig {
            plot_width: 0.0,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ChartConfig {
            margin_left: -1.0,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ChartConfig {
            plot_height: f64::NAN,
            ..ChartConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parses_selectors() {
        assert_eq!(
            MountSelector::parse("#bar-chart-container").unwrap(),
            MountSelector::Id("bar-chart-container".to_string())
        );
        assert_eq!(
            MountSelector::parse(".chart").unwrap(),
            MountSelector::Class("chart".to_string())
        );
        assert_eq!(MountSelector::parse("plain").unwrap().to_string(), "#plain");
        assert!(MountSelector::parse("#").is_err());
        assert!(MountSelector::parse("#a b").is_err());
        assert_eq!(MountSelector::default().to_string(), DEFAULT_CONTAINER);
    }

    #[test]
    fn explicit_url_wins() {
        assert_eq!(resolve_data_url(Some("http://localhost/x.json")), "http://localhost/x.json");
    }
}
