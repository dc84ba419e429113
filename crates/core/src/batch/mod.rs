//! Batch reduction over all PO lines.
//!
//! Each line's stream is reduced independently, optionally on the rayon pool.
//! Results are collected in ascending `po_line_id` order, so a parallel run
//! produces exactly the rows of a sequential one. A failing line is isolated
//! and reported.

pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::BatchEngine;
pub use types::{BatchOutcome, BatchParams, BatchReport, LineFailure};
