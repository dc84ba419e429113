//! PO line repository.

use std::path::PathBuf;

use poflow_core::po::PoLine;
use poflow_core::prepare::PreparedPoLine;
use poflow_shared::config::PathsConfig;
use tracing::{debug, info, warn};

use super::csv_file::{read_rows, write_rows};
use crate::coerce::CoercionStats;
use crate::error::DataError;
use crate::models::{
    PO_LINE_COLUMNS, PO_LINE_ITEM_COLUMNS, PO_REQUIRED_COLUMNS, PoLineItemRow, PoLineRow,
    RawPoLineRow,
};

/// File name shared by the intermediate and import-ready PO line tables.
pub const PO_LINE_ITEMS_FILE: &str = "po_line_items.csv";

/// Reads and writes PO line tables.
#[derive(Debug, Clone)]
pub struct PoLineRepository {
    paths: PathsConfig,
}

impl PoLineRepository {
    /// Creates a repository over the configured directories.
    #[must_use]
    pub const fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    /// Path of the cleaned PO line table.
    #[must_use]
    pub fn intermediate_path(&self) -> PathBuf {
        self.paths.intermediate_dir.join(PO_LINE_ITEMS_FILE)
    }

    /// Path of the import-ready PO line table.
    #[must_use]
    pub fn import_ready_path(&self) -> PathBuf {
        self.paths.import_ready_dir.join(PO_LINE_ITEMS_FILE)
    }

    /// Loads the raw PO line extract.
    ///
    /// Malformed cells are coerced and counted in `stats`; rows without a PO
    /// line id are skipped.
    pub fn load_raw(&self, stats: &mut CoercionStats) -> Result<Vec<PoLine>, DataError> {
        let path = self.paths.raw_po_line_items();
        let rows: Vec<RawPoLineRow> = read_rows(&path, &PO_REQUIRED_COLUMNS)?;
        let total = rows.len();

        let lines: Vec<PoLine> = rows
            .into_iter()
            .filter_map(|row| row.into_po_line(stats))
            .collect();

        let skipped = total - lines.len();
        if skipped > 0 {
            warn!(skipped, path = %path.display(), "Skipped PO lines without a PO Line ID");
        }
        info!(rows = lines.len(), path = %path.display(), "Loaded raw PO lines");
        Ok(lines)
    }

    /// Writes the cleaned PO line table.
    pub fn save_cleaned(&self, lines: &[PoLine]) -> Result<usize, DataError> {
        let path = self.intermediate_path();
        let written = write_rows(&path, &PO_LINE_COLUMNS, lines.iter().map(PoLineRow::from))?;
        debug!(rows = written, path = %path.display(), "Wrote cleaned PO lines");
        Ok(written)
    }

    /// Loads the cleaned PO line table written by [`Self::save_cleaned`].
    pub fn load_cleaned(&self) -> Result<Vec<PoLine>, DataError> {
        let path = self.intermediate_path();
        let rows: Vec<PoLineRow> = read_rows(&path, &PO_REQUIRED_COLUMNS)?;
        info!(rows = rows.len(), path = %path.display(), "Loaded cleaned PO lines");
        Ok(rows.into_iter().map(PoLine::from).collect())
    }

    /// Writes the import-ready PO line table.
    pub fn save_import_ready(&self, lines: &[PreparedPoLine]) -> Result<usize, DataError> {
        let path = self.import_ready_path();
        let written = write_rows(
            &path,
            &PO_LINE_ITEM_COLUMNS,
            lines.iter().map(PoLineItemRow::from),
        )?;
        debug!(rows = written, path = %path.display(), "Wrote import-ready PO lines");
        Ok(written)
    }
}
