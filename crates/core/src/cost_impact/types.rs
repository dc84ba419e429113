//! Cost impact domain types.

use chrono::NaiveDate;
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::posting::PostingType;

/// One recognized-cost delta for a (PO line, posting) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostImpactRecord {
    /// PO line.
    pub po_line_id: PoLineId,
    /// Date of the posting that moved cost.
    pub posting_date: NaiveDate,
    /// GR or IR.
    pub posting_type: PostingType,
    /// Quantity of the posting.
    pub posting_qty: Decimal,
    /// Signed recognized quantity delta; negative is a reversal.
    pub cost_impact_qty: Decimal,
    /// Signed recognized USD delta.
    pub cost_impact_amount: Decimal,
}

/// Per-line sums of cost impact records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostImpactTotals {
    /// Sum of `cost_impact_qty`.
    pub qty: Decimal,
    /// Sum of `cost_impact_amount`.
    pub amount: Decimal,
}

impl CostImpactTotals {
    /// Adds one record to both sums.
    ///
    /// Returns `None` if either sum leaves the decimal range.
    #[must_use]
    pub fn checked_add(self, record: &CostImpactRecord) -> Option<Self> {
        Some(Self {
            qty: self.qty.checked_add(record.cost_impact_qty)?,
            amount: self.amount.checked_add(record.cost_impact_amount)?,
        })
    }

    /// Sums a slice of records; `None` on overflow.
    #[must_use]
    pub fn of(records: &[CostImpactRecord]) -> Option<Self> {
        records
            .iter()
            .try_fold(Self::default(), |totals, record| totals.checked_add(record))
    }
}
