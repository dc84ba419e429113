//! Core business logic for poflow.
//!
//! This crate contains the cost-recognition and GRIR-exposure engines with
//! ZERO file I/O. Everything is loaded into memory by the caller first.
//!
//! # Modules
//!
//! - `po` - PO lines, Simple/Complex classification, unit prices
//! - `posting` - GR/IR postings and the per-line event stream merger
//! - `cost_impact` - Recognized-cost deltas (GR passthrough, high-water mark)
//! - `grir` - Over-invoice exposure and aging
//! - `cleaning` - Stage 1 filters and mapping passes
//! - `prepare` - Stage 3 open positions and output shapes
//! - `contracts` - Business-rule checks on prepared outputs
//! - `batch` - Reduction over all PO lines
//! - `summary` - End-of-run totals

pub mod batch;
pub mod cleaning;
pub mod contracts;
pub mod cost_impact;
pub mod grir;
pub mod po;
pub mod posting;
pub mod prepare;
pub mod summary;
