//! Command-line parsing for the GDP bar chart.
//!
//! Parsing lives here; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONTAINER;
use crate::render::OutputFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gdp", version, about = "United States GDP bar chart (quarterly)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the dataset and write the chart as HTML, SVG or JSON.
    Render(RenderArgs),
    /// Show the chart in the terminal with a hover tooltip.
    Tui(TuiArgs),
}

/// Where the dataset comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Dataset URL (overrides GDP_DATA_URL).
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Read the dataset from a local JSON file instead of the network.
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,
}

/// Chart geometry in surface units.
#[derive(Debug, Args, Clone)]
pub struct LayoutArgs {
    /// Plot area width.
    #[arg(long, default_value_t = 692.0)]
    pub plot_width: f64,

    /// Plot area height.
    #[arg(long, default_value_t = 330.0)]
    pub plot_height: f64,

    #[arg(long, default_value_t = 40.0)]
    pub margin_top: f64,

    #[arg(long, default_value_t = 54.0)]
    pub margin_right: f64,

    #[arg(long, default_value_t = 30.0)]
    pub margin_bottom: f64,

    #[arg(long, default_value_t = 54.0)]
    pub margin_left: f64,
}

/// Options for `gdp render`.
#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output file (stdout when omitted or `-`).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Mount selector: `#id` or `.class`.
    #[arg(long, default_value = DEFAULT_CONTAINER)]
    pub container: String,

    /// Export per-bar geometry to CSV.
    #[arg(long = "export-bars", value_name = "CSV")]
    pub export_bars: Option<PathBuf>,
}

/// Options for `gdp tui`.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,
}
