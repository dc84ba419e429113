//! Stage 3 preparation.
//!
//! Joins cost impact totals back onto PO lines, derives status flags, and
//! maps engine outputs into the import-ready shapes.

pub mod error;
pub mod service;
pub mod types;

pub use error::PrepareError;
pub use service::PreparationService;
pub use types::{
    OpenPositionReport, PoLifecycleStatus, PoStatusFlags, PoTransaction, PreparedPoLine,
};
