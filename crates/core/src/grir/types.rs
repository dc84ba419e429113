//! GRIR domain types.

use chrono::NaiveDate;
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unresolved invoice-over-receipt exposure of one PO line at a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrirExposureRecord {
    /// PO line.
    pub po_line_id: PoLineId,
    /// `cum_ir - cum_gr`, strictly positive.
    pub grir_qty: Decimal,
    /// `grir_qty * unit_price`, rounded to cents.
    pub grir_value: Decimal,
    /// Date the current exposure opened.
    pub first_exposure_date: Option<NaiveDate>,
    /// Days between `first_exposure_date` and `snapshot_date`, never negative.
    pub days_open: i64,
    /// Aging bucket label.
    pub time_bucket: String,
    /// As-of date of the run.
    pub snapshot_date: NaiveDate,
}
