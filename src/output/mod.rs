// src/output/mod.rs
//! Output handling: where files go and how they are written.
//!
//! Path calculation is pure; `writer` is the only place that touches the
//! filesystem.

mod paths;
mod types;
mod writer;

pub use paths::{markdown_file_name, OutputLayout};
pub use types::{PageOutcome, PageReport, RunReport, RunStats};
pub use writer::write_file;
