//! Dataset acquisition (HTTP or local file).

pub mod source;

pub use source::{DatasetSource, FileSource, HttpSource};
