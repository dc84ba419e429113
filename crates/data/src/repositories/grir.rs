//! GRIR exposure repository.

use std::path::PathBuf;

use poflow_core::grir::GrirExposureRecord;
use poflow_shared::config::PathsConfig;
use tracing::{debug, info};

use super::csv_file::{read_rows, write_rows};
use crate::error::DataError;
use crate::models::{GRIR_COLUMNS, GRIR_EXPOSURE_COLUMNS, GrirExposureRow};

/// File name shared by the intermediate and import-ready exposure tables.
pub const GRIR_EXPOSURES_FILE: &str = "grir_exposures.csv";

/// Reads and writes GRIR exposure records.
#[derive(Debug, Clone)]
pub struct GrirRepository {
    paths: PathsConfig,
}

impl GrirRepository {
    /// Creates a repository over the configured directories.
    #[must_use]
    pub const fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    /// Path of the intermediate exposure table.
    #[must_use]
    pub fn intermediate_path(&self) -> PathBuf {
        self.paths.intermediate_dir.join(GRIR_EXPOSURES_FILE)
    }

    /// Path of the import-ready exposure table.
    #[must_use]
    pub fn import_ready_path(&self) -> PathBuf {
        self.paths.import_ready_dir.join(GRIR_EXPOSURES_FILE)
    }

    /// Writes exposure records. An empty set still produces a header row.
    pub fn save(&self, records: &[GrirExposureRecord]) -> Result<usize, DataError> {
        let path = self.intermediate_path();
        let written = write_rows(&path, &GRIR_COLUMNS, records.iter().map(GrirExposureRow::from))?;
        debug!(rows = written, path = %path.display(), "Wrote GRIR exposures");
        Ok(written)
    }

    /// Loads exposure records written by [`Self::save`].
    pub fn load(&self) -> Result<Vec<GrirExposureRecord>, DataError> {
        let path = self.intermediate_path();
        let rows: Vec<GrirExposureRow> = read_rows(&path, &GRIR_COLUMNS)?;
        info!(rows = rows.len(), path = %path.display(), "Loaded GRIR exposures");
        Ok(rows.into_iter().map(GrirExposureRecord::from).collect())
    }

    /// Writes the import-ready exposure table, header-only when empty.
    pub fn save_import_ready(&self, records: &[GrirExposureRecord]) -> Result<usize, DataError> {
        let path = self.import_ready_path();
        let written = write_rows(&path, &GRIR_EXPOSURE_COLUMNS, records)?;
        debug!(rows = written, path = %path.display(), "Wrote import-ready GRIR exposures");
        Ok(written)
    }
}
