//! Cost recognition.
//!
//! This module converts a PO line's ordered posting stream into recognized
//! cost deltas:
//! - Simple lines recognize cost at GR only
//! - Complex lines follow the high-water mark of cumulative GR and IR
//! - Error types for per-line arithmetic failures

pub mod engine;
pub mod error;
pub mod high_water;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::CostImpactEngine;
pub use error::CostImpactError;
pub use high_water::HighWaterMark;
pub use types::{CostImpactRecord, CostImpactTotals};
