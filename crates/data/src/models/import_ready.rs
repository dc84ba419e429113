//! Rows shaped for the database import (`data/import-ready`).
//!
//! `po_transactions.csv` and `grir_exposures.csv` serialize
//! [`PoTransaction`](poflow_core::prepare::PoTransaction) and
//! [`GrirExposureRecord`](poflow_core::grir::GrirExposureRecord) directly; their
//! field names are already the import column names. Only the PO line table
//! needs a flattened row.

use chrono::NaiveDate;
use poflow_core::prepare::{PoLifecycleStatus, PreparedPoLine};
use rust_decimal::Decimal;
use serde::Serialize;

/// Header row of `import-ready/po_line_items.csv`.
pub const PO_LINE_ITEM_COLUMNS: [&str; 33] = [
    "po_line_id",
    "po_number",
    "po_creation_date",
    "plant_code",
    "location",
    "sub_business_line",
    "vendor_id",
    "vendor_name",
    "vendor_category",
    "ultimate_vendor_name",
    "line_item_number",
    "part_number",
    "description",
    "ordered_qty",
    "order_unit",
    "po_value_usd",
    "account_assignment_category",
    "nis_line",
    "wbs_number",
    "expected_delivery_date",
    "po_approval_status",
    "po_receipt_status",
    "po_gts_status",
    "open_po_qty",
    "open_po_value",
    "cost_impact_value",
    "cost_impact_pct",
    "fmt_po",
    "is_capex",
    "is_gts_blocked",
    "is_approval_blocked",
    "is_effectively_closed",
    "po_lifecycle_status",
];

/// Header row of `import-ready/po_transactions.csv`.
pub const PO_TRANSACTION_COLUMNS: [&str; 7] = [
    "po_line_id",
    "transaction_type",
    "posting_date",
    "quantity",
    "cost_impact_qty",
    "cost_impact_amount",
    "amount",
];

/// Header row of `import-ready/grir_exposures.csv`.
pub const GRIR_EXPOSURE_COLUMNS: [&str; 7] = [
    "po_line_id",
    "grir_qty",
    "grir_value",
    "first_exposure_date",
    "days_open",
    "time_bucket",
    "snapshot_date",
];

/// One import-ready PO line, borrowing from the prepared line.
#[derive(Debug, Serialize)]
pub struct PoLineItemRow<'a> {
    pub po_line_id: &'a str,
    pub po_number: Option<&'a str>,
    pub po_creation_date: Option<NaiveDate>,
    pub plant_code: Option<&'a str>,
    pub location: Option<&'a str>,
    pub sub_business_line: Option<&'a str>,
    pub vendor_id: Option<&'a str>,
    pub vendor_name: Option<&'a str>,
    pub vendor_category: &'a str,
    pub ultimate_vendor_name: Option<&'a str>,
    pub line_item_number: Option<&'a str>,
    pub part_number: Option<&'a str>,
    pub description: Option<&'a str>,
    pub ordered_qty: Decimal,
    pub order_unit: Option<&'a str>,
    pub po_value_usd: Decimal,
    pub account_assignment_category: &'a str,
    pub nis_line: Option<&'a str>,
    pub wbs_number: Option<&'a str>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub po_approval_status: Option<&'a str>,
    pub po_receipt_status: &'a str,
    pub po_gts_status: Option<&'a str>,
    pub open_po_qty: Decimal,
    pub open_po_value: Decimal,
    pub cost_impact_value: Decimal,
    pub cost_impact_pct: Option<Decimal>,
    pub fmt_po: bool,
    pub is_capex: bool,
    pub is_gts_blocked: bool,
    pub is_approval_blocked: bool,
    pub is_effectively_closed: bool,
    pub po_lifecycle_status: PoLifecycleStatus,
}

impl<'a> From<&'a PreparedPoLine> for PoLineItemRow<'a> {
    fn from(prepared: &'a PreparedPoLine) -> Self {
        let line = &prepared.line;
        let d = &line.details;
        Self {
            po_line_id: line.po_line_id.as_str(),
            po_number: d.po_number.as_deref(),
            po_creation_date: d.document_date,
            plant_code: d.plant_code.as_deref(),
            location: d.location.as_deref(),
            sub_business_line: d.sub_business_line.as_deref(),
            vendor_id: d.main_vendor_id.as_deref(),
            vendor_name: d.main_vendor_name.as_deref(),
            vendor_category: &line.vendor_category,
            ultimate_vendor_name: d.ultimate_vendor_name.as_deref(),
            line_item_number: d.po_line.as_deref(),
            part_number: d.material_number.as_deref(),
            description: d.material_description.as_deref(),
            ordered_qty: line.ordered_quantity,
            order_unit: d.order_unit.as_deref(),
            po_value_usd: line.order_value_usd,
            account_assignment_category: &line.account_assignment_category,
            nis_line: d.nis_line.as_deref(),
            wbs_number: d.wbs_element.as_deref(),
            expected_delivery_date: d.expected_delivery_date,
            po_approval_status: d.approval_status.as_deref(),
            po_receipt_status: &line.receipt_status,
            po_gts_status: d.gts_status.as_deref(),
            open_po_qty: prepared.open_po_qty,
            open_po_value: prepared.open_po_value,
            cost_impact_value: prepared.cost_impact_value,
            cost_impact_pct: prepared.cost_impact_pct,
            fmt_po: prepared.fmt_po,
            is_capex: prepared.flags.is_capex,
            is_gts_blocked: prepared.flags.is_gts_blocked,
            is_approval_blocked: prepared.flags.is_approval_blocked,
            is_effectively_closed: prepared.flags.is_effectively_closed,
            po_lifecycle_status: prepared.lifecycle_status,
        }
    }
}
