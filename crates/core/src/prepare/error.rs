//! Preparation error types.

use poflow_shared::AppError;
use poflow_shared::types::PoLineId;
use thiserror::Error;

/// Errors that abort stage 3 before anything is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrepareError {
    /// The cost impact sums of a line left the decimal range.
    #[error("Cost impact totals overflow on PO line {0}")]
    TotalsOverflow(PoLineId),

    /// Ordered minus recognized left the decimal range.
    #[error("Open position overflow on PO line {0}")]
    OpenPositionOverflow(PoLineId),
}

impl PrepareError {
    /// Returns a stable error code for log lines.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TotalsOverflow(_) => "TOTALS_OVERFLOW",
            Self::OpenPositionOverflow(_) => "OPEN_POSITION_OVERFLOW",
        }
    }
}

impl From<PrepareError> for AppError {
    fn from(err: PrepareError) -> Self {
        Self::Contract(err.to_string())
    }
}
