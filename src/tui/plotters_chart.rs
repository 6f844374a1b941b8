//! Plotters-powered bar chart widget for Ratatui.
//!
//! Bars come from the same [`ChartScene`](crate::chart::ChartScene) the HTML
//! renderer uses; this widget only converts them to plot coordinates and
//! draws them through `plotters-ratatui-backend`.

use plotters::prelude::*;
// `ratatui::style::Color` shadows the plotters trait that provides `filled`.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::Bar;
use crate::config::ChartConfig;

const BAR_COLOR: RGBColor = RGBColor(78, 155, 214);
const HOVER_COLOR: RGBColor = RGBColor(245, 245, 245);

/// Render-only description of the plot area.
pub struct GdpBarsChart<'a> {
    pub bars: &'a [Bar],
    pub config: &'a ChartConfig,
    /// Bar under the pointer, drawn highlighted.
    pub hovered: Option<usize>,
}

/// Bar corners in plot coordinates (origin bottom-left, y up), clipped to the plot width.
pub(super) fn plot_rect(bar: &Bar, config: &ChartConfig) -> [(f64, f64); 2] {
    let x0 = (bar.x - config.margin_left).clamp(0.0, config.plot_width);
    let x1 = (bar.x - config.margin_left + bar.width).clamp(0.0, config.plot_width);
    let top = config.plot_height - (bar.y - config.margin_top);
    let bottom = top - bar.height;
    [(x0, bottom.max(0.0)), (x1, top.min(config.plot_height))]
}

impl<'a> Widget for GdpBarsChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let (w, h) = (self.config.plot_width, self.config.plot_height);
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return;
        }

        let rects: Vec<([(f64, f64); 2], bool)> = self
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| (plot_rect(bar, self.config), self.hovered == Some(i)))
            .collect();

        // Axes are drawn by the caller, so the plot fills the whole area and
        // cell <-> plot mapping stays linear.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(0)
                .build_cartesian_2d(0.0..w, 0.0..h)?;

            chart.draw_series(rects.iter().map(|&(corners, hot)| {
                let color = if hot { HOVER_COLOR } else { BAR_COLOR };
                Rectangle::new(corners, color.filled())
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use chrono::NaiveDate;

    #[test]
    fn plot_rect_flips_y_and_drops_margins() {
        let config = ChartConfig::default();
        let bar = Bar {
            observation: Observation::new(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 1.0),
            x: 64.0,
            y: 200.0,
            width: 4.0,
            height: 170.0,
        };
        assert_eq!(plot_rect(&bar, &config), [(10.0, 0.0), (14.0, 170.0)]);
    }

    #[test]
    fn renders_filled_bars_into_buffer() {
        let config = ChartConfig::default();
        let bar = Bar {
            observation: Observation::new(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 1.0),
            x: 54.0,
            y: 40.0,
            width: 692.0,
            height: 330.0,
        };
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);

        GdpBarsChart {
            bars: std::slice::from_ref(&bar),
            config: &config,
            hovered: Some(0),
        }
        .render(area, &mut buf);

        let drawn = buf.content().iter().filter(|c| c.symbol() != " ").count();
        assert!(drawn > 0);
    }

    #[test]
    fn plot_rect_clips_overhanging_bar() {
        let config = ChartConfig::default();
        let bar = Bar {
            observation: Observation::new(NaiveDate::from_ymd_opt(2015, 7, 1).unwrap(), 1.0),
            x: 54.0 + 690.0,
            y: 40.0,
            width: 10.0,
            height: 330.0,
        };
        assert_eq!(plot_rect(&bar, &config), [(690.0, 0.0), (692.0, 330.0)]);
    }
}
