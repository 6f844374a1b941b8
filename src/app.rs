//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real main that:
//! - parses CLI arguments
//! - sets up logging
//! - runs the render pipeline
//! - writes the document and optional bar export, or launches the TUI

use clap::Parser;

use crate::cli::{Command, LayoutArgs, RenderArgs, TuiArgs};
use crate::config::{ChartConfig, MountSelector};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gdp` binary.
pub fn run() -> Result<(), AppError> {
    // `gdp` and `gdp --format svg` behave like `gdp render ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init_logging();

    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.layout);
    let selector = MountSelector::parse(&args.container)?;
    let source = pipeline::source_from_args(&args.source);

    let run = pipeline::run_render(source.as_ref(), config, selector)?;

    // Nothing was mounted; the failure has already been logged.
    let Some(scene) = run.container.charts.first() else {
        return Ok(());
    };

    let document = crate::render::render_container(&run.container, args.format)?;
    crate::io::write_document(args.out.as_deref(), &document)?;
    if let Some(path) = &args.out {
        tracing::info!(path = %path.display(), format = args.format.extension(), "chart written");
    }

    if let Some(path) = &args.export_bars {
        crate::io::write_bars_csv(path, scene)?;
        tracing::info!(path = %path.display(), bars = scene.bars.len(), "bar geometry exported");
    }

    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

pub fn config_from_args(args: &LayoutArgs) -> ChartConfig {
    ChartConfig {
        plot_width: args.plot_width,
        plot_height: args.plot_height,
        margin_top: args.margin_top,
        margin_right: args.margin_right,
        margin_bottom: args.margin_bottom,
        margin_left: args.margin_left,
    }
}

/// Rewrite argv so `gdp` defaults to `gdp render`.
///
/// Rules:
/// - `gdp`                       -> `gdp render`
/// - `gdp --format svg ...`      -> `gdp render --format svg ...`
/// - `gdp --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("render".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if matches!(arg1.as_str(), "render" | "tui") {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "render".to_string());
        return argv;
    }

    argv
}
