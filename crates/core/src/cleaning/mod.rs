//! Stage 1 cleaning.
//!
//! Explicit predicate and mapping passes over PO lines and postings, driven
//! by the tables in `CleaningConfig`. Each pass reports how many rows it
//! touched so the pipeline can log an auditable trail.

pub mod po_lines;
pub mod postings;
pub mod types;

pub use po_lines::PoLineCleaner;
pub use postings::PostingCleaner;
pub use types::{PoCleaningReport, PostingCleaningReport, PostingInput};
