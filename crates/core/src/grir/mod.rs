//! GRIR (goods receipt / invoice receipt) exposure.
//!
//! This module implements the over-invoice exposure side of the engines:
//! - Exposure tracking with reset on recovery
//! - Aging into ordered time buckets
//! - The per-line engine producing at most one exposure record
//! - Error types for per-line arithmetic failures

pub mod aging;
pub mod engine;
pub mod error;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod engine_props;
#[cfg(test)]
mod tests;

pub use aging::TimeBuckets;
pub use engine::GrirEngine;
pub use error::GrirError;
pub use tracker::ExposureTracker;
pub use types::GrirExposureRecord;
