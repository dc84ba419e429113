//! Repository abstractions for pipeline tables.
//!
//! Repositories own the file layout under the configured directories and
//! hide the CSV details from the pipeline stages.

mod csv_file;

pub mod cost_impact;
pub mod grir;
pub mod po_line;
pub mod posting;

pub use cost_impact::{COST_IMPACT_FILE, CostImpactRepository, PO_TRANSACTIONS_FILE};
pub use grir::{GRIR_EXPOSURES_FILE, GrirRepository};
pub use po_line::{PO_LINE_ITEMS_FILE, PoLineRepository};
pub use posting::{GR_POSTINGS_FILE, IR_POSTINGS_FILE, PostingRepository};
