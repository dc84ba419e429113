//! Import-ready row types.

use chrono::NaiveDate;
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::po::PoLine;
use crate::posting::PostingType;

/// Lifecycle state of a PO line, by precedence: closed, then GTS blocked,
/// then pending approval, else open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoLifecycleStatus {
    /// Open and unblocked.
    Open,
    /// Blocked by the approval workflow.
    PendingApproval,
    /// Blocked by trade compliance screening.
    GtsBlocked,
    /// Closed by status or fully consumed.
    Closed,
}

impl PoLifecycleStatus {
    /// Returns the output label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::PendingApproval => "pending_approval",
            Self::GtsBlocked => "gts_blocked",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for PoLifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status flags derived from the raw SAP status columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoStatusFlags {
    /// WBS element is a capitalized project (`C.` prefix).
    pub is_capex: bool,
    /// GTS status contains "gts blocked".
    pub is_gts_blocked: bool,
    /// Approval status contains "blocked".
    pub is_approval_blocked: bool,
    /// Closed receipt status, or nothing left open.
    pub is_effectively_closed: bool,
}

impl PoStatusFlags {
    /// Applies the lifecycle precedence to the flags.
    #[must_use]
    pub fn lifecycle_status(&self) -> PoLifecycleStatus {
        if self.is_effectively_closed {
            PoLifecycleStatus::Closed
        } else if self.is_gts_blocked {
            PoLifecycleStatus::GtsBlocked
        } else if self.is_approval_blocked {
            PoLifecycleStatus::PendingApproval
        } else {
            PoLifecycleStatus::Open
        }
    }
}

/// A PO line enriched with its open position, recognized cost, and status
/// flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedPoLine {
    /// The cleaned PO line.
    pub line: PoLine,
    /// `ordered_quantity - sum(cost_impact_qty)`, 4 dp; 0 when closed.
    pub open_po_qty: Decimal,
    /// `order_value_usd - sum(cost_impact_amount)`, 2 dp; 0 when closed.
    pub open_po_value: Decimal,
    /// `sum(cost_impact_amount)`, 2 dp.
    pub cost_impact_value: Decimal,
    /// `cost_impact_value / order_value_usd`, 4 dp; `None` for a zero order value.
    pub cost_impact_pct: Option<Decimal>,
    /// Derived status flags.
    pub flags: PoStatusFlags,
    /// Lifecycle state derived from `flags`.
    pub lifecycle_status: PoLifecycleStatus,
    /// Framework-agreement flag; always false for now.
    pub fmt_po: bool,
}

/// One cost impact record in import-ready form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoTransaction {
    /// PO line.
    pub po_line_id: PoLineId,
    /// GR or IR.
    pub transaction_type: PostingType,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Posting quantity, 4 dp.
    pub quantity: Decimal,
    /// Recognized quantity delta, 4 dp.
    pub cost_impact_qty: Decimal,
    /// Recognized USD delta, 2 dp.
    pub cost_impact_amount: Decimal,
    /// Same as `cost_impact_amount`.
    pub amount: Decimal,
}

/// Counts of the open-position pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpenPositionReport {
    /// Lines prepared.
    pub lines: usize,
    /// Lines with an open value above zero.
    pub with_open_value: usize,
    /// Closed lines forced to zero.
    pub closed_forced: usize,
    /// Cost impact records whose PO line is not in the master.
    pub unmatched_records: usize,
    /// Later rows of a repeated `po_line_id` that were dropped.
    pub duplicates_dropped: usize,
    /// Lines flagged as capex.
    pub capex: usize,
    /// Lines whose lifecycle state is closed.
    pub closed: usize,
    /// Lines whose lifecycle state is GTS blocked.
    pub gts_blocked: usize,
    /// Lines whose lifecycle state is pending approval.
    pub pending_approval: usize,
}
