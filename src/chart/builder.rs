//! One-time construction of the drawing surface: axes, axis labels and the
//! hidden tooltip.

use super::axis::{build_axis, Orientation};
use super::scale::{ScaleMapping, DEFAULT_TICK_COUNT};
use super::shape::{Attrs, Shape, Surface, TextShape, Translate};
use super::tooltip::Tooltip;
use crate::config::ChartConfig;

pub const X_AXIS_ID: &str = "x-axis";
pub const Y_AXIS_ID: &str = "y-axis";
pub const X_LABEL_ID: &str = "x-axis-label";
pub const Y_LABEL_ID: &str = "y-axis-label";

pub struct ChartBuilder<'a> {
    config: &'a ChartConfig,
    scales: &'a ScaleMapping,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(config: &'a ChartConfig, scales: &'a ScaleMapping) -> Self {
        Self { config, scales }
    }

    /// Surface with both axis labels and both axes; bars are added later.
    pub fn surface(&self) -> Surface {
        let cfg = self.config;
        let width = cfg.surface_width();
        let height = cfg.surface_height();
        let mut surface = Surface::new(width, height);

        surface.push(axis_label(
            X_LABEL_ID,
            "Year",
            width - cfg.margin_right + 26.0,
            height - cfg.margin_bottom + 4.0,
        ));
        surface.push(axis_label(Y_LABEL_ID, "GDP", cfg.margin_left, cfg.margin_top - 16.0));

        surface.push(build_axis(
            X_AXIS_ID,
            Orientation::Bottom,
            &self.scales.x,
            DEFAULT_TICK_COUNT,
            Translate {
                x: cfg.margin_left,
                y: cfg.margin_top + cfg.plot_height,
            },
        ));
        surface.push(build_axis(
            Y_AXIS_ID,
            Orientation::Left,
            &self.scales.y,
            DEFAULT_TICK_COUNT,
            Translate {
                x: cfg.margin_left,
                y: cfg.margin_top,
            },
        ));

        surface
    }

    pub fn tooltip(&self) -> Tooltip {
        Tooltip::hidden()
    }
}

fn axis_label(id: &str, text: &str, x: f64, y: f64) -> Shape {
    Shape::Text(TextShape {
        attrs: Attrs::default()
            .id(id)
            .with("fill", "#fff")
            .with("font-size", "0.8rem")
            .with("text-anchor", "middle"),
        x,
        y,
        content: text.to_string(),
    })
}
