//! Typed rows exchanged between stages through `data/intermediate`.
//!
//! Column names follow the source extracts so the files stay readable next
//! to the raw tables.

use chrono::NaiveDate;
use poflow_core::cost_impact::CostImpactRecord;
use poflow_core::grir::GrirExposureRecord;
use poflow_core::po::{PoLine, PoLineDetails};
use poflow_core::posting::{Posting, PostingType};
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cleaned PO line (`intermediate/po_line_items.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoLineRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: PoLineId,
    #[serde(rename = "PO Number")]
    pub po_number: Option<String>,
    #[serde(rename = "PO Line")]
    pub po_line: Option<String>,
    #[serde(rename = "Main Vendor SLB Vendor Category")]
    pub vendor_category: String,
    #[serde(rename = "PO Account Assignment Category")]
    pub account_assignment_category: String,
    #[serde(rename = "Ordered Quantity")]
    pub ordered_quantity: Decimal,
    #[serde(rename = "Purchase Value USD")]
    pub order_value_usd: Decimal,
    #[serde(rename = "PO Receipt Status")]
    pub receipt_status: String,
    #[serde(rename = "PO Valuation Class")]
    pub valuation_class: Option<i64>,
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
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "PO Current Supplier Requested Delivery Date")]
    pub requested_delivery_date: Option<NaiveDate>,
    #[serde(rename = "PO Current Supplier Promised Date")]
    pub promised_delivery_date: Option<NaiveDate>,
    #[serde(rename = "Expected Delivery Date")]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(rename = "PO Document Date")]
    pub document_date: Option<NaiveDate>,
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

/// Header row of [`PoLineRow`].
pub const PO_LINE_COLUMNS: [&str; 27] = [
    "PO Line ID",
    "PO Number",
    "PO Line",
    "Main Vendor SLB Vendor Category",
    "PO Account Assignment Category",
    "Ordered Quantity",
    "Purchase Value USD",
    "PO Receipt Status",
    "PO Valuation Class",
    "NIS Level 0 Desc",
    "Main Vendor ID",
    "Main Vendor Name",
    "Ultimate Vendor Number",
    "Ultimate Vendor Name",
    "Plant Code",
    "Location",
    "PO Current Supplier Requested Delivery Date",
    "PO Current Supplier Promised Date",
    "Expected Delivery Date",
    "PO Document Date",
    "SL Sub-Business Line Code (BV Lvl 3)",
    "PO Material Number",
    "PO Material description",
    "PO Order Unit",
    "PO WBS Element",
    "PO Approval Status",
    "PO GTS Status",
];

impl From<&PoLine> for PoLineRow {
    fn from(line: &PoLine) -> Self {
        let d = line.details.clone();
        Self {
            po_line_id: line.po_line_id.clone(),
            po_number: d.po_number,
            po_line: d.po_line,
            vendor_category: line.vendor_category.clone(),
            account_assignment_category: line.account_assignment_category.clone(),
            ordered_quantity: line.ordered_quantity,
            order_value_usd: line.order_value_usd,
            receipt_status: line.receipt_status.clone(),
            valuation_class: d.valuation_class,
            nis_line: d.nis_line,
            main_vendor_id: d.main_vendor_id,
            main_vendor_name: d.main_vendor_name,
            ultimate_vendor_id: d.ultimate_vendor_id,
            ultimate_vendor_name: d.ultimate_vendor_name,
            plant_code: d.plant_code,
            location: d.location,
            requested_delivery_date: d.requested_delivery_date,
            promised_delivery_date: d.promised_delivery_date,
            expected_delivery_date: d.expected_delivery_date,
            document_date: d.document_date,
            sub_business_line: d.sub_business_line,
            material_number: d.material_number,
            material_description: d.material_description,
            order_unit: d.order_unit,
            wbs_element: d.wbs_element,
            approval_status: d.approval_status,
            gts_status: d.gts_status,
        }
    }
}

impl From<PoLineRow> for PoLine {
    fn from(row: PoLineRow) -> Self {
        Self {
            po_line_id: row.po_line_id,
            vendor_category: row.vendor_category,
            account_assignment_category: row.account_assignment_category,
            ordered_quantity: row.ordered_quantity,
            order_value_usd: row.order_value_usd,
            receipt_status: row.receipt_status,
            details: PoLineDetails {
                po_number: row.po_number,
                po_line: row.po_line,
                valuation_class: row.valuation_class,
                nis_line: row.nis_line,
                main_vendor_id: row.main_vendor_id,
                main_vendor_name: row.main_vendor_name,
                ultimate_vendor_id: row.ultimate_vendor_id,
                ultimate_vendor_name: row.ultimate_vendor_name,
                plant_code: row.plant_code,
                location: row.location,
                requested_delivery_date: row.requested_delivery_date,
                promised_delivery_date: row.promised_delivery_date,
                expected_delivery_date: row.expected_delivery_date,
                document_date: row.document_date,
                sub_business_line: row.sub_business_line,
                material_number: row.material_number,
                material_description: row.material_description,
                order_unit: row.order_unit,
                wbs_element: row.wbs_element,
                approval_status: row.approval_status,
                gts_status: row.gts_status,
            },
        }
    }
}

/// Cleaned goods receipt (`intermediate/gr_postings.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrPostingRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: PoLineId,
    #[serde(rename = "GR Posting Date")]
    pub posting_date: NaiveDate,
    #[serde(rename = "GR Effective Quantity")]
    pub quantity: Decimal,
    #[serde(rename = "GR Amount")]
    pub amount: Decimal,
}

/// Header row of [`GrPostingRow`].
pub const GR_POSTING_COLUMNS: [&str; 4] = [
    "PO Line ID",
    "GR Posting Date",
    "GR Effective Quantity",
    "GR Amount",
];

/// Cleaned invoice receipt (`intermediate/ir_postings.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrPostingRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: PoLineId,
    #[serde(rename = "Invoice Posting Date")]
    pub posting_date: NaiveDate,
    #[serde(rename = "IR Effective Quantity")]
    pub quantity: Decimal,
    #[serde(rename = "Invoice Amount")]
    pub amount: Decimal,
}

/// Header row of [`IrPostingRow`].
pub const IR_POSTING_COLUMNS: [&str; 4] = [
    "PO Line ID",
    "Invoice Posting Date",
    "IR Effective Quantity",
    "Invoice Amount",
];

impl From<&Posting> for GrPostingRow {
    fn from(p: &Posting) -> Self {
        Self {
            po_line_id: p.po_line_id.clone(),
            posting_date: p.posting_date,
            quantity: p.posting_qty,
            amount: p.posting_amount,
        }
    }
}

impl From<GrPostingRow> for Posting {
    fn from(row: GrPostingRow) -> Self {
        Self::gr(row.po_line_id, row.posting_date, row.quantity, row.amount)
    }
}

impl From<&Posting> for IrPostingRow {
    fn from(p: &Posting) -> Self {
        Self {
            po_line_id: p.po_line_id.clone(),
            posting_date: p.posting_date,
            quantity: p.posting_qty,
            amount: p.posting_amount,
        }
    }
}

impl From<IrPostingRow> for Posting {
    fn from(row: IrPostingRow) -> Self {
        Self::ir(row.po_line_id, row.posting_date, row.quantity, row.amount)
    }
}

/// Cost impact record (`intermediate/cost_impact.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostImpactRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: PoLineId,
    #[serde(rename = "Posting Date")]
    pub posting_date: NaiveDate,
    #[serde(rename = "Posting Type")]
    pub posting_type: PostingType,
    #[serde(rename = "Posting Qty")]
    pub posting_qty: Decimal,
    #[serde(rename = "Cost Impact Qty")]
    pub cost_impact_qty: Decimal,
    #[serde(rename = "Cost Impact Amount")]
    pub cost_impact_amount: Decimal,
}

/// Header row of [`CostImpactRow`].
pub const COST_IMPACT_COLUMNS: [&str; 6] = [
    "PO Line ID",
    "Posting Date",
    "Posting Type",
    "Posting Qty",
    "Cost Impact Qty",
    "Cost Impact Amount",
];

impl From<&CostImpactRecord> for CostImpactRow {
    fn from(r: &CostImpactRecord) -> Self {
        Self {
            po_line_id: r.po_line_id.clone(),
            posting_date: r.posting_date,
            posting_type: r.posting_type,
            posting_qty: r.posting_qty,
            cost_impact_qty: r.cost_impact_qty,
            cost_impact_amount: r.cost_impact_amount,
        }
    }
}

impl From<CostImpactRow> for CostImpactRecord {
    fn from(row: CostImpactRow) -> Self {
        Self {
            po_line_id: row.po_line_id,
            posting_date: row.posting_date,
            posting_type: row.posting_type,
            posting_qty: row.posting_qty,
            cost_impact_qty: row.cost_impact_qty,
            cost_impact_amount: row.cost_impact_amount,
        }
    }
}

/// GRIR exposure (`intermediate/grir_exposures.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrirExposureRow {
    #[serde(rename = "PO Line ID")]
    pub po_line_id: PoLineId,
    #[serde(rename = "GRIR Qty")]
    pub grir_qty: Decimal,
    #[serde(rename = "GRIR Value")]
    pub grir_value: Decimal,
    #[serde(rename = "First Exposure Date")]
    pub first_exposure_date: Option<NaiveDate>,
    #[serde(rename = "Days Open")]
    pub days_open: i64,
    #[serde(rename = "Time Bucket")]
    pub time_bucket: String,
    #[serde(rename = "Snapshot Date")]
    pub snapshot_date: NaiveDate,
}

/// Header row of [`GrirExposureRow`].
pub const GRIR_COLUMNS: [&str; 7] = [
    "PO Line ID",
    "GRIR Qty",
    "GRIR Value",
    "First Exposure Date",
    "Days Open",
    "Time Bucket",
    "Snapshot Date",
];

impl From<&GrirExposureRecord> for GrirExposureRow {
    fn from(r: &GrirExposureRecord) -> Self {
        Self {
            po_line_id: r.po_line_id.clone(),
            grir_qty: r.grir_qty,
            grir_value: r.grir_value,
            first_exposure_date: r.first_exposure_date,
            days_open: r.days_open,
            time_bucket: r.time_bucket.clone(),
            snapshot_date: r.snapshot_date,
        }
    }
}

impl From<GrirExposureRow> for GrirExposureRecord {
    fn from(row: GrirExposureRow) -> Self {
        Self {
            po_line_id: row.po_line_id,
            grir_qty: row.grir_qty,
            grir_value: row.grir_value,
            first_exposure_date: row.first_exposure_date,
            days_open: row.days_open,
            time_bucket: row.time_bucket,
            snapshot_date: row.snapshot_date,
        }
    }
}
