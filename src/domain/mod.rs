//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fetched dataset (`Dataset`, `Observation`)
//! - labels derived from an observation (`Quarter`, tooltip lines)

pub mod labels;
pub mod types;

pub use labels::*;
pub use types::*;
