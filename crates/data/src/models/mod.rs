//! CSV row models.
//!
//! - `raw`: rows of the source extracts, read fail-soft through coercion
//! - `intermediate`: typed rows exchanged between stages
//! - `import_ready`: rows shaped for the downstream database import

pub mod import_ready;
pub mod intermediate;
pub mod raw;

pub use import_ready::{
    GRIR_EXPOSURE_COLUMNS, PO_LINE_ITEM_COLUMNS, PO_TRANSACTION_COLUMNS, PoLineItemRow,
};
pub use intermediate::{
    COST_IMPACT_COLUMNS, CostImpactRow, GR_POSTING_COLUMNS, GRIR_COLUMNS, GrPostingRow,
    GrirExposureRow, IR_POSTING_COLUMNS, IrPostingRow, PO_LINE_COLUMNS, PoLineRow,
};
pub use raw::{
    GR_REQUIRED_COLUMNS, IR_REQUIRED_COLUMNS, PO_REQUIRED_COLUMNS, RawGrRow, RawIrRow,
    RawPoLineRow,
};
