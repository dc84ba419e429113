//! Cost impact error types.

use poflow_shared::types::PoLineId;
use thiserror::Error;

/// Errors that can occur while reducing one PO line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostImpactError {
    /// A cumulative counter or delta left the decimal range.
    #[error("Quantity overflow on PO line {0}")]
    QuantityOverflow(PoLineId),

    /// Quantity times unit price left the decimal range.
    #[error("Amount overflow on PO line {0}")]
    AmountOverflow(PoLineId),

    /// The stream holds a posting of another PO line.
    #[error("Posting for {found} found in stream of PO line {expected}")]
    ForeignPosting {
        /// Line the stream belongs to.
        expected: PoLineId,
        /// Line the stray posting belongs to.
        found: PoLineId,
    },
}

impl CostImpactError {
    /// Returns a stable error code for log lines.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::QuantityOverflow(_) => "QUANTITY_OVERFLOW",
            Self::AmountOverflow(_) => "AMOUNT_OVERFLOW",
            Self::ForeignPosting { .. } => "FOREIGN_POSTING",
        }
    }
}
