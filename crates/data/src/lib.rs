//! CSV data layer for poflow.
//!
//! This crate provides:
//! - Row models for raw extracts, intermediate files, and import-ready files
//! - Fail-soft coercion of numbers, dates, and plant codes
//! - Repositories that read and write every pipeline table

pub mod coerce;
pub mod error;
pub mod models;
pub mod repositories;

pub use coerce::CoercionStats;
pub use error::DataError;
pub use repositories::{
    CostImpactRepository, GrirRepository, PoLineRepository, PostingRepository,
};
