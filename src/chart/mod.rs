//! The bar chart: scales, shape tree, bars and tooltip.
//!
//! `ChartRenderer` is the entry point. It fetches the dataset, builds a
//! [`ChartScene`] and mounts it into a [`Container`]. A failed fetch is logged
//! once and nothing is mounted.

use serde::Serialize;

use crate::config::{ChartConfig, MountSelector};
use crate::data::DatasetSource;
use crate::domain::Dataset;

pub mod axis;
pub mod bars;
pub mod builder;
pub mod scale;
pub mod shape;
pub mod tooltip;

pub use bars::{Bar, BarRenderer};
pub use builder::ChartBuilder;
pub use scale::{LinearScale, Scale, ScaleMapping, TimeScale};
pub use shape::{Shape, Surface};
pub use tooltip::{Anchor, PointerPosition, Tooltip, TooltipContent};

/// Everything one render pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScene {
    pub config: ChartConfig,
    pub scales: ScaleMapping,
    pub surface: Surface,
    pub bars: Vec<Bar>,
    pub tooltip: Tooltip,
}

impl ChartScene {
    /// Index of the bar under a point in surface coordinates. Later bars are
    /// drawn on top, so they win when bars overlap.
    pub fn bar_at(&self, x: f64, y: f64) -> Option<usize> {
        self.bars.iter().rposition(|b| b.contains(x, y))
    }

    /// Pointer entered bar `index`. Returns `false` for an unknown bar.
    pub fn pointer_enter(&mut self, index: usize, at: PointerPosition) -> bool {
        let Some(bar) = self.bars.get(index) else {
            return false;
        };
        self.tooltip.pointer_enter(&bar.observation, at);
        true
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip.pointer_leave();
    }
}

/// The caller-provided mount point. Each successful render appends a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub selector: MountSelector,
    pub charts: Vec<ChartScene>,
}

impl Container {
    pub fn new(selector: MountSelector) -> Self {
        Self {
            selector,
            charts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn mount(&mut self, scene: ChartScene) -> &mut ChartScene {
        self.charts.push(scene);
        let last = self.charts.len() - 1;
        &mut self.charts[last]
    }

    pub fn rect_count(&self) -> usize {
        self.charts
            .iter()
            .map(|c| c.surface.rects_with_class("bar").len())
            .sum()
    }

    pub fn axis_count(&self) -> usize {
        self.charts
            .iter()
            .flat_map(|c| c.surface.shapes())
            .filter(|s| {
                matches!(s.attrs().id.as_deref(), Some(builder::X_AXIS_ID | builder::Y_AXIS_ID))
            })
            .count()
    }

    pub fn tooltip_count(&self) -> usize {
        self.charts.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Mounted { bars: usize },
    Skipped,
}

pub struct ChartRenderer {
    config: ChartConfig,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Pure geometry: scales, surface, bars and a hidden tooltip.
    pub fn build(&self, dataset: &Dataset) -> ChartScene {
        let scales = ScaleMapping::build(&self.config, dataset);
        let builder = ChartBuilder::new(&self.config, &scales);

        let mut surface = builder.surface();
        let bars = BarRenderer::new(&self.config, &scales).layout(dataset);
        for bar in &bars {
            surface.push(bar.to_shape());
        }

        ChartScene {
            config: self.config,
            scales,
            surface,
            bars,
            tooltip: builder.tooltip(),
        }
    }

    /// Fetch, build and mount. A fetch failure is logged and swallowed.
    ///
    /// Rendering twice into the same container appends a second chart.
    pub fn render(&self, container: &mut Container, source: &dyn DatasetSource) -> RenderOutcome {
        let dataset = match source.fetch() {
            Ok(ds) => ds,
            Err(err) => {
                tracing::error!(source = %source.describe(), error = %err, "dataset unavailable; chart not rendered");
                return RenderOutcome::Skipped;
            }
        };

        let scene = self.build(&dataset);
        let bars = scene.bars.len();
        container.mount(scene);
        tracing::info!(container = %container.selector, bars, "chart mounted");
        RenderOutcome::Mounted { bars }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::domain::Observation;
    use crate::error::AppError;

    struct StaticSource(Dataset);

    impl DatasetSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        fn fetch(&self) -> Result<Dataset, AppError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl DatasetSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn fetch(&self) -> Result<Dataset, AppError> {
            Err(AppError::data_unavailable("connection refused"))
        }
    }

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn gdp_sample() -> Dataset {
        Dataset {
            data: vec![
                Observation::new(d("2006-10-01"), 13000.0),
                Observation::new(d("2007-01-01"), 13500.0),
                Observation::new(d("2010-01-01"), 14000.0),
            ],
            from_date: d("2006-10-01"),
            to_date: d("2010-01-01"),
        }
    }

    #[test]
    fn render_mounts_surface_bars_and_hidden_tooltip() {
        let renderer = ChartRenderer::new(ChartConfig::default());
        let mut container = Container::new(MountSelector::default());

        let outcome = renderer.render(&mut container, &StaticSource(gdp_sample()));

        assert_eq!(outcome, RenderOutcome::Mounted { bars: 3 });
        assert_eq!(container.rect_count(), 3);
        assert_eq!(container.axis_count(), 2);
        assert_eq!(container.tooltip_count(), 1);
        assert_eq!(container.charts[0].tooltip.opacity(), 0.0);
    }

    #[test]
    fn hovering_a_2010_bar_shows_left_anchored_tooltip() {
        let renderer = ChartRenderer::new(ChartConfig::default());
        let mut scene = renderer.build(&gdp_sample());

        assert!(scene.pointer_enter(2, PointerPosition { x: 700.0, y: 120.0 }));

        let tip = &scene.tooltip;
        assert!(tip.is_visible());
        assert_eq!(tip.anchor(), Some(Anchor::Left));
        let content = tip.content.as_ref().unwrap();
        assert_eq!(content.lines(), ["Q1 2010", "$14,000 billion"]);

        scene.pointer_leave();
        assert_eq!(scene.tooltip.opacity(), 0.0);
        assert!(!scene.pointer_enter(99, PointerPosition { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn bar_at_finds_bar_under_point() {
        let renderer = ChartRenderer::new(ChartConfig::default());
        let scene = renderer.build(&gdp_sample());

        let bar = &scene.bars[1];
        let hit = scene.bar_at(bar.x + 1.0, bar.y + bar.height - 1.0);
        assert_eq!(hit, Some(1));
        assert_eq!(scene.bar_at(0.0, 0.0), None);
    }

    #[test]
    fn failed_fetch_mounts_nothing_and_logs_one_error() {
        let counter = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(counter.clone()));

        let renderer = ChartRenderer::new(ChartConfig::default());
        let mut container = Container::new(MountSelector::default());

        let outcome = tracing::subscriber::with_default(subscriber, || {
            renderer.render(&mut container, &FailingSource)
        });

        assert_eq!(outcome, RenderOutcome::Skipped);
        assert!(container.is_empty());
        assert_eq!(container.rect_count(), 0);
        assert_eq!(container.axis_count(), 0);
        assert_eq!(container.tooltip_count(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rendering_twice_appends_a_second_chart() {
        let renderer = ChartRenderer::new(ChartConfig::default());
        let mut container = Container::new(MountSelector::default());
        let source = StaticSource(gdp_sample());

        renderer.render(&mut container, &source);
        renderer.render(&mut container, &source);

        assert_eq!(container.charts.len(), 2);
        assert_eq!(container.rect_count(), 6);
    }
}
