//! Cost impact and PO transaction repository.

use std::path::PathBuf;

use poflow_core::cost_impact::CostImpactRecord;
use poflow_core::prepare::PoTransaction;
use poflow_shared::config::PathsConfig;
use tracing::{debug, info};

use super::csv_file::{read_rows, write_rows};
use crate::error::DataError;
use crate::models::{COST_IMPACT_COLUMNS, CostImpactRow, PO_TRANSACTION_COLUMNS};

/// Intermediate cost impact table name.
pub const COST_IMPACT_FILE: &str = "cost_impact.csv";
/// Import-ready transaction table name.
pub const PO_TRANSACTIONS_FILE: &str = "po_transactions.csv";

/// Reads and writes cost impact records.
#[derive(Debug, Clone)]
pub struct CostImpactRepository {
    paths: PathsConfig,
}

impl CostImpactRepository {
    /// Creates a repository over the configured directories.
    #[must_use]
    pub const fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    /// Path of the intermediate cost impact table.
    #[must_use]
    pub fn intermediate_path(&self) -> PathBuf {
        self.paths.intermediate_dir.join(COST_IMPACT_FILE)
    }

    /// Path of the import-ready transaction table.
    #[must_use]
    pub fn transactions_path(&self) -> PathBuf {
        self.paths.import_ready_dir.join(PO_TRANSACTIONS_FILE)
    }

    /// Writes cost impact records.
    pub fn save(&self, records: &[CostImpactRecord]) -> Result<usize, DataError> {
        let path = self.intermediate_path();
        let written = write_rows(&path, &COST_IMPACT_COLUMNS, records.iter().map(CostImpactRow::from))?;
        debug!(rows = written, path = %path.display(), "Wrote cost impact records");
        Ok(written)
    }

    /// Loads cost impact records written by [`Self::save`].
    pub fn load(&self) -> Result<Vec<CostImpactRecord>, DataError> {
        let path = self.intermediate_path();
        let rows: Vec<CostImpactRow> = read_rows(&path, &COST_IMPACT_COLUMNS)?;
        info!(rows = rows.len(), path = %path.display(), "Loaded cost impact records");
        Ok(rows.into_iter().map(CostImpactRecord::from).collect())
    }

    /// Writes the import-ready transaction table.
    pub fn save_transactions(&self, transactions: &[PoTransaction]) -> Result<usize, DataError> {
        let path = self.transactions_path();
        let written = write_rows(&path, &PO_TRANSACTION_COLUMNS, transactions)?;
        debug!(rows = written, path = %path.display(), "Wrote PO transactions");
        Ok(written)
    }
}
