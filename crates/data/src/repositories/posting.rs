//! GR and IR posting repository.

use std::path::PathBuf;

use poflow_core::cleaning::PostingInput;
use poflow_core::posting::{Posting, PostingType};
use poflow_shared::config::PathsConfig;
use tracing::{debug, info, warn};

use super::csv_file::{read_rows, write_rows};
use crate::coerce::CoercionStats;
use crate::error::DataError;
use crate::models::{
    GR_POSTING_COLUMNS, GR_REQUIRED_COLUMNS, GrPostingRow, IR_POSTING_COLUMNS,
    IR_REQUIRED_COLUMNS, IrPostingRow, RawGrRow, RawIrRow,
};

/// Cleaned GR table name.
pub const GR_POSTINGS_FILE: &str = "gr_postings.csv";
/// Cleaned IR table name.
pub const IR_POSTINGS_FILE: &str = "ir_postings.csv";

/// Reads and writes GR and IR posting tables.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    paths: PathsConfig,
}

impl PostingRepository {
    /// Creates a repository over the configured directories.
    #[must_use]
    pub const fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    /// Path of the raw extract for `kind`.
    #[must_use]
    pub fn raw_path(&self, kind: PostingType) -> PathBuf {
        match kind {
            PostingType::Gr => self.paths.raw_gr(),
            PostingType::Ir => self.paths.raw_ir(),
        }
    }

    /// Path of the cleaned table for `kind`.
    #[must_use]
    pub fn intermediate_path(&self, kind: PostingType) -> PathBuf {
        let file = match kind {
            PostingType::Gr => GR_POSTINGS_FILE,
            PostingType::Ir => IR_POSTINGS_FILE,
        };
        self.paths.intermediate_dir.join(file)
    }

    /// Loads a raw GR or IR extract.
    ///
    /// Rows with a blank PO line id or an unreadable posting date are skipped;
    /// malformed quantities and amounts are coerced and counted in `stats`.
    pub fn load_raw(
        &self,
        kind: PostingType,
        stats: &mut CoercionStats,
    ) -> Result<Vec<PostingInput>, DataError> {
        let path = self.raw_path(kind);
        let (total, inputs): (usize, Vec<PostingInput>) = match kind {
            PostingType::Gr => {
                let rows: Vec<RawGrRow> = read_rows(&path, &GR_REQUIRED_COLUMNS)?;
                (rows.len(), rows.into_iter().filter_map(|r| r.into_input(stats)).collect())
            }
            PostingType::Ir => {
                let rows: Vec<RawIrRow> = read_rows(&path, &IR_REQUIRED_COLUMNS)?;
                (rows.len(), rows.into_iter().filter_map(|r| r.into_input(stats)).collect())
            }
        };

        let skipped = total - inputs.len();
        if skipped > 0 {
            warn!(
                skipped,
                posting_type = %kind,
                "Skipped postings without a PO Line ID or a readable posting date"
            );
        }
        info!(rows = inputs.len(), posting_type = %kind, path = %path.display(), "Loaded raw postings");
        Ok(inputs)
    }

    /// Writes a cleaned posting table.
    ///
    /// Postings whose type differs from `kind` are not written.
    pub fn save_cleaned(&self, kind: PostingType, postings: &[Posting]) -> Result<usize, DataError> {
        let path = self.intermediate_path(kind);
        let own = postings.iter().filter(|p| p.posting_type == kind);
        let written = match kind {
            PostingType::Gr => write_rows(&path, &GR_POSTING_COLUMNS, own.map(GrPostingRow::from))?,
            PostingType::Ir => write_rows(&path, &IR_POSTING_COLUMNS, own.map(IrPostingRow::from))?,
        };
        debug!(rows = written, posting_type = %kind, path = %path.display(), "Wrote cleaned postings");
        Ok(written)
    }

    /// Loads a cleaned posting table written by [`Self::save_cleaned`].
    pub fn load_cleaned(&self, kind: PostingType) -> Result<Vec<Posting>, DataError> {
        let path = self.intermediate_path(kind);
        let postings: Vec<Posting> = match kind {
            PostingType::Gr => read_rows::<GrPostingRow>(&path, &GR_REQUIRED_COLUMNS)?
                .into_iter()
                .map(Posting::from)
                .collect(),
            PostingType::Ir => read_rows::<IrPostingRow>(&path, &IR_REQUIRED_COLUMNS)?
                .into_iter()
                .map(Posting::from)
                .collect(),
        };
        info!(rows = postings.len(), posting_type = %kind, "Loaded cleaned postings");
        Ok(postings)
    }
}
