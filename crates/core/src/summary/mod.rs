//! End-of-run summary.
//!
//! Totals that double as regression signals between runs: recognized cost,
//! GRIR value, and the GRIR aging breakdown.

use poflow_shared::AppError;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::cost_impact::CostImpactRecord;
use crate::grir::{GrirExposureRecord, TimeBuckets};

/// Count and value of exposures in one aging bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    /// Bucket label.
    pub label: String,
    /// Number of exposures.
    pub count: usize,
    /// Sum of `grir_value`.
    pub value: Decimal,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Cost impact records.
    pub cost_impact_records: usize,
    /// GRIR exposure records.
    pub grir_records: usize,
    /// Sum of `cost_impact_amount`.
    pub total_recognized_cost: Decimal,
    /// Sum of `grir_value`.
    pub total_grir_value: Decimal,
    /// Per-bucket breakdown in configured order, overflow last.
    pub buckets: Vec<BucketSummary>,
}

/// A run total left the decimal range.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Run summary overflow in {0}")]
pub struct SummaryError(pub &'static str);

impl From<SummaryError> for AppError {
    fn from(err: SummaryError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl RunSummary {
    /// Builds the summary from engine outputs.
    pub fn build(
        cost_impact: &[CostImpactRecord],
        grir: &[GrirExposureRecord],
        buckets: &TimeBuckets,
    ) -> Result<Self, SummaryError> {
        let breakdown = buckets
            .labels()
            .map(|label| {
                let matching = grir.iter().filter(|record| record.time_bucket == label);
                Ok(BucketSummary {
                    label: label.to_string(),
                    count: matching.clone().count(),
                    value: checked_sum(matching.map(|r| r.grir_value))
                        .ok_or(SummaryError("bucket value"))?,
                })
            })
            .collect::<Result<_, SummaryError>>()?;

        Ok(Self {
            cost_impact_records: cost_impact.len(),
            grir_records: grir.len(),
            total_recognized_cost: checked_sum(cost_impact.iter().map(|r| r.cost_impact_amount))
                .ok_or(SummaryError("total recognized cost"))?,
            total_grir_value: checked_sum(grir.iter().map(|r| r.grir_value))
                .ok_or(SummaryError("total GRIR value"))?,
            buckets: breakdown,
        })
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, Decimal::checked_add)
}
