//! Input/output helpers.
//!
//! - rendered document output (`output`)
//! - per-bar CSV export (`export`)

pub mod export;
pub mod output;

pub use export::*;
pub use output::*;
