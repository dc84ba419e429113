//! PO line domain types.

use chrono::NaiveDate;
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchasable line on a purchase order.
///
/// Immutable while the engines run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoLine {
    /// `{PO Number}-{PO Line}`.
    pub po_line_id: PoLineId,
    /// Main vendor category (e.g. "GLD", "3rd Party", "OPS").
    pub vendor_category: String,
    /// Single-letter account assignment category.
    pub account_assignment_category: String,
    /// Ordered quantity, may be zero.
    pub ordered_quantity: Decimal,
    /// Order value in USD.
    pub order_value_usd: Decimal,
    /// Receipt status; the closed sentinel marks a fully settled line.
    pub receipt_status: String,
    /// Descriptive attributes carried through to the import-ready output.
    #[serde(default)]
    pub details: PoLineDetails,
}

impl PoLine {
    /// Creates a PO line with empty descriptive attributes.
    #[must_use]
    pub fn new(
        po_line_id: PoLineId,
        vendor_category: impl Into<String>,
        account_assignment_category: impl Into<String>,
        ordered_quantity: Decimal,
        order_value_usd: Decimal,
        receipt_status: impl Into<String>,
    ) -> Self {
        Self {
            po_line_id,
            vendor_category: vendor_category.into(),
            account_assignment_category: account_assignment_category.into(),
            ordered_quantity,
            order_value_usd,
            receipt_status: receipt_status.into(),
            details: PoLineDetails::default(),
        }
    }
}

/// Descriptive PO line attributes touched only by cleaning and preparation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoLineDetails {
    /// PO document number.
    pub po_number: Option<String>,
    /// Line number within the PO.
    pub po_line: Option<String>,
    /// Numeric valuation class.
    pub valuation_class: Option<i64>,
    /// NIS level description.
    pub nis_line: Option<String>,
    /// Main vendor id.
    pub main_vendor_id: Option<String>,
    /// Main vendor name.
    pub main_vendor_name: Option<String>,
    /// Ultimate vendor id.
    pub ultimate_vendor_id: Option<String>,
    /// Ultimate vendor name.
    pub ultimate_vendor_name: Option<String>,
    /// Plant code.
    pub plant_code: Option<String>,
    /// Location derived from the plant code.
    pub location: Option<String>,
    /// Supplier requested delivery date.
    pub requested_delivery_date: Option<NaiveDate>,
    /// Supplier promised delivery date.
    pub promised_delivery_date: Option<NaiveDate>,
    /// Promised date if present, else requested date.
    pub expected_delivery_date: Option<NaiveDate>,
    /// PO document date.
    pub document_date: Option<NaiveDate>,
    /// Sub-business line code.
    pub sub_business_line: Option<String>,
    /// Material number.
    pub material_number: Option<String>,
    /// Material description.
    pub material_description: Option<String>,
    /// Order unit of measure.
    pub order_unit: Option<String>,
    /// WBS element.
    pub wbs_element: Option<String>,
    /// Approval status.
    pub approval_status: Option<String>,
    /// GTS status.
    pub gts_status: Option<String>,
}

/// Cost-recognition class of a PO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoClass {
    /// GLD vendor with a K/P/S/V account category: cost recognized at GR.
    Simple,
    /// Everything else: high-water mark over GR and IR.
    Complex,
}

impl std::fmt::Display for PoClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Complex => write!(f, "complex"),
        }
    }
}

/// Result of classifying one PO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Assigned class.
    pub class: PoClass,
    /// True when a classifying field was empty and the line defaulted to Complex.
    pub ambiguous: bool,
    /// True when the receipt status is the closed sentinel.
    pub closed: bool,
}

impl Classification {
    /// Only open Simple lines enter the GRIR engine.
    #[must_use]
    pub fn is_grir_eligible(&self) -> bool {
        self.class == PoClass::Simple && !self.closed
    }
}
