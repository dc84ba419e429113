//! Cleaning input and report types.

use chrono::NaiveDate;
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A raw GR or IR row before it is joined to the PO line master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingInput {
    /// PO line the row references.
    pub po_line_id: PoLineId,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Signed quantity.
    pub posting_qty: Decimal,
    /// Amount supplied by the extract, if any.
    pub posting_amount: Option<Decimal>,
}

/// Row counts of PO line cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoCleaningReport {
    /// Rows received.
    pub loaded: usize,
    /// Dropped for an excluded valuation class.
    pub excluded_valuation_class: usize,
    /// Dropped for an excluded NIS level.
    pub excluded_nis_level: usize,
    /// NIS level filled for the fill valuation class.
    pub nis_filled: usize,
    /// NIS level rewritten by an alias.
    pub nis_aliased: usize,
    /// Main vendor names mapped.
    pub main_vendor_mapped: usize,
    /// Ultimate vendor names mapped.
    pub ultimate_vendor_mapped: usize,
    /// Locations mapped from plant codes.
    pub location_mapped: usize,
    /// Rows kept.
    pub kept: usize,
}

/// Row counts of GR or IR cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostingCleaningReport {
    /// Rows received.
    pub loaded: usize,
    /// Dropped for a zero quantity.
    pub zero_qty_dropped: usize,
    /// Dropped for referencing an unknown PO line.
    pub orphan_dropped: usize,
    /// Amounts derived from the unit price.
    pub amount_derived: usize,
    /// Dropped because the derived amount left the decimal range.
    pub amount_overflow_dropped: usize,
    /// Rows kept.
    pub kept: usize,
}
