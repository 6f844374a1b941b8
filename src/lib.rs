//! `gdp-bars` library crate.
//!
//! The binary (`gdp`) is a thin wrapper around this library so that:
//!
//! - chart geometry and tooltip behavior are testable without a browser
//! - the HTML/SVG renderers and the terminal viewer share one scene model

pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod render;
pub mod tui;
