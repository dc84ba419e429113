//! GRIR error types.

use poflow_shared::types::PoLineId;
use thiserror::Error;

/// Errors that can occur while evaluating one PO line's exposure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrirError {
    /// A cumulative counter left the decimal range.
    #[error("Quantity overflow on PO line {0}")]
    QuantityOverflow(PoLineId),

    /// Exposure times unit price left the decimal range.
    #[error("Value overflow on PO line {0}")]
    ValueOverflow(PoLineId),

    /// The stream holds a posting of another PO line.
    #[error("Posting for {found} found in stream of PO line {expected}")]
    ForeignPosting {
        /// Line the stream belongs to.
        expected: PoLineId,
        /// Line the stray posting belongs to.
        found: PoLineId,
    },
}

impl GrirError {
    /// Returns a stable error code for log lines.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::QuantityOverflow(_) => "QUANTITY_OVERFLOW",
            Self::ValueOverflow(_) => "VALUE_OVERFLOW",
            Self::ForeignPosting { .. } => "FOREIGN_POSTING",
        }
    }
}
