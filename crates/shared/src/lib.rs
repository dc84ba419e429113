//! Shared types, errors, and configuration for poflow.
//!
//! This crate provides common types used across all other crates:
//! - Decimal rounding rules for quantities and USD amounts
//! - Typed keys for PO lines, PO numbers, and vendors
//! - Pipeline-level error types
//! - Configuration management (paths, business rules, mapping tables)

pub mod config;
pub mod error;
pub mod types;

pub use config::PipelineConfig;
pub use error::{AppError, AppResult};
