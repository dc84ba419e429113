//! Contract violation types.

use poflow_shared::types::PoLineId;
use thiserror::Error;

/// A broken business rule in the prepared outputs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    /// GRIR quantity must be strictly positive.
    #[error("GRIR quantity of {0} is not positive")]
    NonPositiveGrirQty(PoLineId),

    /// GRIR value must not be negative.
    #[error("GRIR value of {0} is negative")]
    NegativeGrirValue(PoLineId),

    /// Time bucket is not a configured label.
    #[error("GRIR time bucket '{bucket}' of {po_line_id} is not configured")]
    UnknownTimeBucket {
        /// PO line of the exposure.
        po_line_id: PoLineId,
        /// Offending label.
        bucket: String,
    },

    /// GRIR exposure for a line that is not an open Simple line.
    #[error("GRIR exposure for ineligible PO line {po_line_id}: {reason}")]
    IneligibleGrirLine {
        /// PO line of the exposure.
        po_line_id: PoLineId,
        /// Why the line is ineligible.
        reason: &'static str,
    },

    /// A PO line appears more than once in the PO line output.
    #[error("Duplicate PO line {0}")]
    DuplicatePoLine(PoLineId),

    /// A PO line appears more than once in the GRIR output.
    #[error("Duplicate GRIR exposure for PO line {0}")]
    DuplicateGrirLine(PoLineId),

    /// A transaction references a PO line missing from the output.
    #[error("Transaction references unknown PO line {0}")]
    UnknownTransactionLine(PoLineId),
}

impl ContractError {
    /// Returns a stable error code for log lines.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveGrirQty(_) => "NON_POSITIVE_GRIR_QTY",
            Self::NegativeGrirValue(_) => "NEGATIVE_GRIR_VALUE",
            Self::UnknownTimeBucket { .. } => "UNKNOWN_TIME_BUCKET",
            Self::IneligibleGrirLine { .. } => "INELIGIBLE_GRIR_LINE",
            Self::DuplicatePoLine(_) => "DUPLICATE_PO_LINE",
            Self::DuplicateGrirLine(_) => "DUPLICATE_GRIR_LINE",
            Self::UnknownTransactionLine(_) => "UNKNOWN_TRANSACTION_LINE",
        }
    }
}
