//! GR and IR postings.
//!
//! Postings are read-only facts. The merger turns the two posting tables into
//! one chronologically ordered event stream per PO line, which both engines
//! fold over.

pub mod merger;
pub mod types;

pub use merger::PostingMerger;
pub use types::{Posting, PostingStream, PostingType};
