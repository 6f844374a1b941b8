//! Shared render pipeline used by both the document renderer and the TUI.
//!
//! source -> fetch -> scales -> shape tree + bars -> mounted container
//!
//! The front-ends only differ in how they present the mounted scene.

use crate::chart::{ChartRenderer, Container, RenderOutcome};
use crate::cli::SourceArgs;
use crate::config::{ChartConfig, MountSelector, resolve_data_url};
use crate::data::{DatasetSource, FileSource, HttpSource};
use crate::error::AppError;

/// Result of one render pass.
#[derive(Debug, Clone)]
pub struct RenderRun {
    pub container: Container,
    pub outcome: RenderOutcome,
}

impl RenderRun {
    pub fn mounted(&self) -> bool {
        matches!(self.outcome, RenderOutcome::Mounted { .. })
    }
}

/// Pick the dataset source: a local file when `--input` is given, otherwise HTTP.
pub fn source_from_args(args: &SourceArgs) -> Box<dyn DatasetSource> {
    match &args.input {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(HttpSource::new(resolve_data_url(args.url.as_deref()))),
    }
}

/// Validate the layout, then fetch and mount one chart.
///
/// An unavailable dataset is not an error here: the render is skipped and the
/// container stays empty.
pub fn run_render(
    source: &dyn DatasetSource,
    config: ChartConfig,
    selector: MountSelector,
) -> Result<RenderRun, AppError> {
    config.validate()?;

    let mut container = Container::new(selector);
    let outcome = ChartRenderer::new(config).render(&mut container, source);

    Ok(RenderRun { container, outcome })
}
