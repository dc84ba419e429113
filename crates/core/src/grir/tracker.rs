//! Exposure fold state.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::posting::{Posting, PostingType};

/// Running GR/IR counters and the opening date of the current exposure.
///
/// The opening date is cleared whenever GR catches up with IR, so an exposure
/// that closes and reopens is aged from the reopening.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExposureTracker {
    /// Cumulative GR quantity.
    pub cum_gr: Decimal,
    /// Cumulative IR quantity.
    pub cum_ir: Decimal,
    /// Date IR last pulled ahead of GR, if it still is.
    pub first_exposure_date: Option<NaiveDate>,
}

impl ExposureTracker {
    /// Creates a fresh tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one posting. Returns `None` on counter overflow.
    pub fn apply(&mut self, posting: &Posting) -> Option<()> {
        match posting.posting_type {
            PostingType::Gr => self.cum_gr = self.cum_gr.checked_add(posting.posting_qty)?,
            PostingType::Ir => self.cum_ir = self.cum_ir.checked_add(posting.posting_qty)?,
        }

        if self.cum_ir > self.cum_gr {
            if self.first_exposure_date.is_none() {
                self.first_exposure_date = Some(posting.posting_date);
            }
        } else {
            self.first_exposure_date = None;
        }
        Some(())
    }

    /// Net over-invoiced quantity (`cum_ir - cum_gr`); may be zero or negative.
    pub fn exposure(&self) -> Option<Decimal> {
        self.cum_ir.checked_sub(self.cum_gr)
    }
}
