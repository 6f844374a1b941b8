//! Standalone HTML page: mount container, SVG surface, tooltip and a small
//! script that shows the tooltip on hover.
//!
//! Tooltip text, anchor class, CSS transform and pointer offset for every bar
//! are computed here and embedded as JSON; the script only places the element.

use std::fmt::Write;

use serde::Serialize;

use super::svg::{escape, num, write_surface};
use crate::chart::{Anchor, ChartScene, Container, PointerPosition, Tooltip, TooltipContent};
use crate::config::MountSelector;
use crate::error::AppError;

const PAGE_TITLE: &str = "United States GDP";
const PAYLOAD_ID: &str = "bar-chart-tooltips";

const STYLE: &str = r#"body {
  margin: 0;
  min-height: 100vh;
  display: flex;
  align-items: center;
  justify-content: center;
  background: #1d2630;
  color: #fff;
  font-family: sans-serif;
}
main { text-align: center; }
rect.bar { fill: #4e9bd6; }
rect.bar:hover { fill: #f5f5f5; }
.chart-container { position: relative; display: inline-block; }
.chart-tooltip {
  position: absolute;
  pointer-events: none;
  padding: 0.4rem 0.6rem;
  border-radius: 4px;
  background: rgba(255, 255, 255, 0.9);
  color: #1d2630;
  font-size: 0.8rem;
  text-align: center;
}"#;

const SCRIPT: &str = r#"(function () {
  var container = document.querySelector(SELECTOR);
  var payload = JSON.parse(document.getElementById(PAYLOAD_ID).textContent);
  if (!container) { return; }
  var surfaces = container.querySelectorAll(':scope > svg');
  var tooltips = container.querySelectorAll(':scope > .chart-tooltip');
  surfaces.forEach(function (svg, i) {
    var tooltip = tooltips[i];
    svg.querySelectorAll('rect.bar').forEach(function (rect, j) {
      var tip = payload[i][j];
      rect.addEventListener('mouseover', function (e) {
        var box = container.getBoundingClientRect();
        var x = e.clientX - box.left + tip.dx;
        var y = e.clientY - box.top + tip.dy;
        tooltip.style.opacity = 1;
        tooltip.style.left = x + 'px';
        tooltip.style.top = y + 'px';
        tooltip.style.width = 'max-content';
        tooltip.style.transform = tip.transform;
        tooltip.setAttribute('class', 'chart-tooltip ' + tip.class);
        tooltip.setAttribute('data-date', tip.date);
        tooltip.replaceChildren();
        var first = document.createElement('span');
        first.textContent = tip.period;
        var second = document.createElement('span');
        second.textContent = tip.value;
        tooltip.append(first, document.createElement('br'), second);
      });
      rect.addEventListener('mouseout', function () {
        tooltip.style.opacity = 0;
      });
    });
  });
})();"#;

/// Per-bar data the page script needs.
#[derive(Debug, Serialize)]
struct TooltipPayload {
    date: String,
    period: String,
    value: String,
    class: &'static str,
    transform: &'static str,
    dx: f64,
    dy: f64,
}

impl TooltipPayload {
    fn new(content: TooltipContent) -> Self {
        let offset = content.anchor.place(PointerPosition { x: 0.0, y: 0.0 });
        Self {
            class: content.anchor.class_name(),
            transform: content.anchor.css_transform(),
            dx: offset.x,
            dy: offset.y,
            date: content.date,
            period: content.period,
            value: content.value,
        }
    }
}

/// Render the whole page for a container.
pub fn render_page(container: &Container) -> Result<String, AppError> {
    let payload: Vec<Vec<TooltipPayload>> = container
        .charts
        .iter()
        .map(|chart| {
            chart
                .bars
                .iter()
                .map(|b| TooltipPayload::new(TooltipContent::for_observation(&b.observation)))
                .collect()
        })
        .collect();
    let payload_json = serde_json::to_string(&payload)
        .map_err(|e| AppError::io(format!("Failed to serialize tooltip payload: {e}")))?;
    let selector_json = serde_json::to_string(&container.selector.to_string())
        .map_err(|e| AppError::io(format!("Failed to serialize selector: {e}")))?;

    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{PAGE_TITLE}</title>");
    let _ = writeln!(out, "<style>\n{STYLE}\n</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<main>");
    let _ = writeln!(out, "<h1 id=\"title\">{PAGE_TITLE}</h1>");
    write_container(&mut out, container);
    let _ = writeln!(out, "</main>");
    let _ = writeln!(
        out,
        "<script type=\"application/json\" id=\"{PAYLOAD_ID}\">{}</script>",
        script_safe(&payload_json)
    );
    // The selector goes in last so its text is never rewritten.
    let script = SCRIPT
        .replace("PAYLOAD_ID", &format!("'{PAYLOAD_ID}'"))
        .replace("SELECTOR", &script_safe(&selector_json));
    let _ = writeln!(out, "<script>\n{script}\n</script>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    Ok(out)
}

fn write_container(out: &mut String, container: &Container) {
    let selector_attr = match &container.selector {
        MountSelector::Id(name) => format!("id=\"{}\" class=\"chart-container\"", escape(name)),
        MountSelector::Class(name) => format!("class=\"chart-container {}\"", escape(name)),
    };
    let _ = writeln!(out, "<div {selector_attr}>");
    for chart in &container.charts {
        write_chart(out, chart);
    }
    let _ = writeln!(out, "</div>");
}

fn write_chart(out: &mut String, chart: &ChartScene) {
    write_surface(out, &chart.surface, 1);
    let _ = writeln!(out, "  {}", tooltip_markup(&chart.tooltip));
}

/// Markup for the tooltip element in its current state.
pub fn tooltip_markup(tooltip: &Tooltip) -> String {
    let mut class = String::from("chart-tooltip");
    let mut attrs = String::new();
    let mut style = format!("opacity: {};", num(tooltip.opacity()));
    let mut body = String::new();

    if let (Some(pos), Some(content)) = (tooltip.position, tooltip.content.as_ref()) {
        let anchor: Anchor = content.anchor;
        class.push(' ');
        class.push_str(anchor.class_name());
        let _ = write!(attrs, " data-date=\"{}\"", escape(&content.date));
        let _ = write!(
            style,
            " left: {}px; top: {}px; width: max-content; transform: {};",
            num(pos.x),
            num(pos.y),
            anchor.css_transform()
        );
        let [period, value] = content.lines();
        let _ = write!(
            body,
            "<span>{}</span><br /><span>{}</span>",
            escape(period),
            escape(value)
        );
    }

    format!("<div id=\"tooltip\" class=\"{class}\"{attrs} style=\"{style}\">{body}</div>")
}

/// Keep embedded JSON from closing the surrounding `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
