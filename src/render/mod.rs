//! Renderers that materialize a mounted container.
//!
//! - `html`: standalone page with hover tooltips
//! - `svg`: the drawing surface only
//! - JSON: the scene (shape tree, bars, tooltip state) for other tools

use clap::ValueEnum;
use serde::Serialize;

use crate::chart::Container;
use crate::error::AppError;

pub mod html;
pub mod svg;

pub use html::{render_page, tooltip_markup};
pub use svg::render_svg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Svg,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Svg => "svg",
            OutputFormat::Json => "json",
        }
    }
}

/// Render every chart in the container in the requested format.
///
/// SVG output concatenates one `<svg>` element per mounted chart.
pub fn render_container(container: &Container, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Html => render_page(container),
        OutputFormat::Svg => Ok(container
            .charts
            .iter()
            .map(|c| render_svg(&c.surface))
            .collect::<Vec<_>>()
            .join("")),
        OutputFormat::Json => serde_json::to_string_pretty(container)
            .map_err(|e| AppError::io(format!("Failed to serialize chart scene: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartRenderer;
    use crate::config::{ChartConfig, MountSelector};
    use crate::domain::{Dataset, Observation};
    use chrono::NaiveDate;

    #[test]
    fn json_scene_exposes_bars_and_tooltip() {
        let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let ds = Dataset {
            data: vec![Observation::new(d(2001), 10000.0)],
            from_date: d(2001),
            to_date: d(2002),
        };
        let mut c = Container::new(MountSelector::default());
        c.mount(ChartRenderer::new(ChartConfig::default()).build(&ds));

        let json = render_container(&c, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let chart = &value["charts"][0];
        assert_eq!(chart["bars"][0]["observation"][0], "2001-01-01");
        assert_eq!(chart["bars"][0]["observation"][1], 10000.0);
        assert_eq!(chart["tooltip"]["visibility"], "hidden");
        assert_eq!(value["selector"]["kind"], "id");

        let svg = render_container(&c, OutputFormat::Svg).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(OutputFormat::Svg.extension(), "svg");
    }
}
