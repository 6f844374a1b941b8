//! One rectangle per observation.

use serde::Serialize;

use super::scale::{Scale, ScaleMapping};
use super::shape::{Attrs, RectShape, Shape};
use crate::config::ChartConfig;
use crate::domain::{Dataset, Observation};

/// A laid-out bar in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub observation: Observation,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bar {
    /// Hit test in surface coordinates; the right edge belongs to the next bar.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn to_shape(&self) -> Shape {
        Shape::Rect(RectShape {
            attrs: Attrs::default()
                .class("bar")
                .data("date", self.observation.date.to_string())
                .data("gdp", self.observation.value.to_string()),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        })
    }
}

pub struct BarRenderer<'a> {
    config: &'a ChartConfig,
    scales: &'a ScaleMapping,
}

impl<'a> BarRenderer<'a> {
    pub fn new(config: &'a ChartConfig, scales: &'a ScaleMapping) -> Self {
        Self { config, scales }
    }

    /// Uniform width; assumes observations are evenly spaced in time.
    pub fn bar_width(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            self.config.plot_width / count as f64
        }
    }

    pub fn layout(&self, dataset: &Dataset) -> Vec<Bar> {
        let width = self.bar_width(dataset.len());
        dataset
            .data
            .iter()
            .map(|obs| {
                let y_px = self.scales.y.map(obs.value);
                Bar {
                    observation: *obs,
                    x: self.scales.x.map(obs.date) + self.config.margin_left,
                    y: y_px + self.config.margin_top,
                    width,
                    height: self.config.plot_height - y_px,
                }
            })
            .collect()
    }
}
