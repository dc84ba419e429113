//! Batch types.

use chrono::NaiveDate;
use poflow_shared::config::{ClassificationConfig, PipelineConfig};
use poflow_shared::types::PoLineId;
use serde::Serialize;

use crate::cost_impact::CostImpactRecord;
use crate::grir::{GrirExposureRecord, TimeBuckets};

/// Parameters for one batch run.
#[derive(Debug, Clone)]
pub struct BatchParams {
    /// Classification rules.
    pub classification: ClassificationConfig,
    /// Aging buckets.
    pub buckets: TimeBuckets,
    /// As-of date for GRIR aging.
    pub snapshot_date: NaiveDate,
    /// Reduce lines on the rayon pool.
    pub parallel: bool,
}

impl BatchParams {
    /// Builds parameters from the pipeline configuration.
    #[must_use]
    pub fn from_config(config: &PipelineConfig, snapshot_date: NaiveDate) -> Self {
        Self {
            classification: config.classification.clone(),
            buckets: TimeBuckets::from_config(&config.grir),
            snapshot_date,
            parallel: config.parallel,
        }
    }
}

/// A PO line whose reduction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineFailure {
    /// PO line that failed.
    pub po_line_id: PoLineId,
    /// Engine that failed ("cost_impact" or "grir").
    pub engine: &'static str,
    /// Stable error code.
    pub error_code: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Row counts of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Distinct PO lines reduced.
    pub lines: usize,
    /// Simple lines.
    pub simple: usize,
    /// Complex lines.
    pub complex: usize,
    /// Lines defaulted to Complex for an empty classifying field.
    pub ambiguous: usize,
    /// Lines whose unit price fell back to 0.
    pub undefined_unit_price: usize,
    /// Open Simple lines evaluated by the GRIR engine.
    pub grir_eligible: usize,
    /// Later rows of a repeated `po_line_id` that were ignored.
    pub duplicate_lines: usize,
    /// Postings whose PO line is not in the master.
    pub orphan_postings: usize,
    /// Cost impact records emitted.
    pub cost_impact_records: usize,
    /// GRIR exposure records emitted.
    pub grir_records: usize,
    /// Lines that failed and contributed no rows to the failing engine's output.
    pub failures: Vec<LineFailure>,
}

/// Output of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Cost impact records, grouped by ascending PO line.
    pub cost_impact: Vec<CostImpactRecord>,
    /// GRIR exposures, in ascending PO line order.
    pub grir: Vec<GrirExposureRecord>,
    /// Counts.
    pub report: BatchReport,
}
