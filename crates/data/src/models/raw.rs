//! Raw extract rows.
//!
//! Every cell is read as optional text so a malformed value never fails the
//! whole file; typing happens in the `into_*` conversions.

use poflow_core::cleaning::PostingInput;
use poflow_core::po::{PoLine, PoLineDetails};
use poflow_shared::types::PoLineId;
use serde::Deserialize;

use crate::coerce::{CoercionStats, clean_text, normalize_code};

/// Columns the PO line extract must carry.
pub const PO_REQUIRED_COLUMNS: [&str; 6] = [
    "PO Line ID",
    "Main Vendor SLB Vendor Category",
    "PO Account Assignment Category",
    "Ordered Quantity",
    "Purchase Value USD",
    "PO Receipt Status",
];

/// Columns the GR extract must carry.
pub const GR_REQUIRED_COLUMNS: [&str; 3] =
    ["PO Line ID", "GR Posting Date", "GR Effective Quantity"];

/// Columns the invoice extract must carry.
pub const IR_REQUIRED_COLUMNS: [&str; 3] =
    ["PO Line ID", "Invoice Posting Date", "IR Effective Quantity"];

/// One row of `po line items.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPoLineRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: Option<String>,
    #[serde(rename = "PO Number")]
    pub po_number: Option<String>,
    #[serde(rename = "PO Line")]
    pub po_line: Option<String>,
    #[serde(rename = "Main Vendor SLB Vendor Category")]
    pub vendor_category: Option<String>,
    #[serde(rename = "PO Account Assignment Category")]
    pub account_assignment_category: Option<String>,
    #[serde(rename = "Ordered Quantity")]
    pub ordered_quantity: Option<String>,
    #[serde(rename = "Purchase Value USD")]
    pub order_value_usd: Option<String>,
    #[serde(rename = "PO Receipt Status")]
    pub receipt_status: Option<String>,
    #[serde(rename = "PO Valuation Class")]
    pub valuation_class: Option<String>,
    #[serde(rename = "NIS Level 0 Desc")]
    pub nis_line: Option<String>,
    #[serde(rename = "Main Vendor ID")]
    pub main_vendor_id: Option<String>,
    #[serde(rename = "Main Vendor Name")]
    pub main_vendor_name: Option<String>,
    #[serde(rename = "Ultimate Vendor Number")]
    pub ultimate_vendor_id: Option<String>,
    #[serde(rename = "Ultimate Vendor Name")]
    pub ultimate_vendor_name: Option<String>,
    #[serde(rename = "Plant Code")]
    pub plant_code: Option<String>,
    #[serde(rename = "PO Current Supplier Requested Delivery Date")]
    pub requested_delivery_date: Option<String>,
    #[serde(rename = "PO Current Supplier Promised Date")]
    pub promised_delivery_date: Option<String>,
    #[serde(rename = "PO Document Date")]
    pub document_date: Option<String>,
    #[serde(rename = "SL Sub-Business Line Code (BV Lvl 3)")]
    pub sub_business_line: Option<String>,
    #[serde(rename = "PO Material Number")]
    pub material_number: Option<String>,
    #[serde(rename = "PO Material description")]
    pub material_description: Option<String>,
    #[serde(rename = "PO Order Unit")]
    pub order_unit: Option<String>,
    #[serde(rename = "PO WBS Element")]
    pub wbs_element: Option<String>,
    #[serde(rename = "PO Approval Status")]
    pub approval_status: Option<String>,
    #[serde(rename = "PO GTS Status")]
    pub gts_status: Option<String>,
}

impl RawPoLineRow {
    /// Converts to a domain line. Returns `None` when the PO line id is blank.
    pub fn into_po_line(self, stats: &mut CoercionStats) -> Option<PoLine> {
        let po_line_id = clean_text(self.po_line_id).map(PoLineId::new)?;
        let details = PoLineDetails {
            po_number: clean_text(self.po_number),
            po_line: clean_text(self.po_line),
            valuation_class: stats.integral("PO Valuation Class", self.valuation_class.as_deref()),
            nis_line: clean_text(self.nis_line),
            main_vendor_id: self.main_vendor_id.as_deref().and_then(normalize_code),
            main_vendor_name: clean_text(self.main_vendor_name),
            ultimate_vendor_id: self.ultimate_vendor_id.as_deref().and_then(normalize_code),
            ultimate_vendor_name: clean_text(self.ultimate_vendor_name),
            plant_code: self.plant_code.as_deref().and_then(normalize_code),
            location: None,
            requested_delivery_date: stats.date(
                "PO Current Supplier Requested Delivery Date",
                self.requested_delivery_date.as_deref(),
            ),
            promised_delivery_date: stats.date(
                "PO Current Supplier Promised Date",
                self.promised_delivery_date.as_deref(),
            ),
            expected_delivery_date: None,
            document_date: stats.date("PO Document Date", self.document_date.as_deref()),
            sub_business_line: clean_text(self.sub_business_line),
            material_number: clean_text(self.material_number),
            material_description: clean_text(self.material_description),
            order_unit: clean_text(self.order_unit),
            wbs_element: clean_text(self.wbs_element),
            approval_status: clean_text(self.approval_status),
            gts_status: clean_text(self.gts_status),
        };
        Some(PoLine {
            po_line_id,
            vendor_category: clean_text(self.vendor_category).unwrap_or_default(),
            account_assignment_category: clean_text(self.account_assignment_category)
                .unwrap_or_default(),
            ordered_quantity: stats.decimal("Ordered Quantity", self.ordered_quantity.as_deref()),
            order_value_usd: stats.decimal("Purchase Value USD", self.order_value_usd.as_deref()),
            receipt_status: clean_text(self.receipt_status).unwrap_or_default(),
            details,
        })
    }
}

/// One row of `gr table.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGrRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: Option<String>,
    #[serde(rename = "GR Posting Date")]
    pub posting_date: Option<String>,
    #[serde(rename = "GR Effective Quantity")]
    pub quantity: Option<String>,
    #[serde(rename = "GR Amount")]
    pub amount: Option<String>,
}

impl RawGrRow {
    /// Converts to a posting input. Returns `None` when the id or date is unusable.
    pub fn into_input(self, stats: &mut CoercionStats) -> Option<PostingInput> {
        posting_input(
            stats,
            self.po_line_id,
            ("GR Posting Date", self.posting_date.as_deref()),
            ("GR Effective Quantity", self.quantity.as_deref()),
            ("GR Amount", self.amount.as_deref()),
        )
    }
}

/// One row of `invoice table.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIrRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: Option<String>,
    #[serde(rename = "Invoice Posting Date")]
    pub posting_date: Option<String>,
    #[serde(rename = "IR Effective Quantity")]
    pub quantity: Option<String>,
    #[serde(rename = "Invoice Amount")]
    pub amount: Option<String>,
}

impl RawIrRow {
    /// Converts to a posting input. Returns `None` when the id or date is unusable.
    pub fn into_input(self, stats: &mut CoercionStats) -> Option<PostingInput> {
        posting_input(
            stats,
            self.po_line_id,
            ("Invoice Posting Date", self.posting_date.as_deref()),
            ("IR Effective Quantity", self.quantity.as_deref()),
            ("Invoice Amount", self.amount.as_deref()),
        )
    }
}

type Cell<'a> = (&'static str, Option<&'a str>);

fn posting_input(
    stats: &mut CoercionStats,
    po_line_id: Option<String>,
    (date_column, date): Cell<'_>,
    (qty_column, qty): Cell<'_>,
    (amount_column, amount): Cell<'_>,
) -> Option<PostingInput> {
    let po_line_id = clean_text(po_line_id).map(PoLineId::new)?;
    let posting_date = stats.date(date_column, date)?;
    Some(PostingInput {
        po_line_id,
        posting_date,
        posting_qty: stats.decimal(qty_column, qty),
        posting_amount: stats.optional_decimal(amount_column, amount),
    })
}
