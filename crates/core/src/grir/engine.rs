//! GRIR exposure engine.

use chrono::NaiveDate;
use poflow_shared::types::round_amount;
use rust_decimal::Decimal;

use super::aging::TimeBuckets;
use super::error::GrirError;
use super::tracker::ExposureTracker;
use super::types::GrirExposureRecord;
use crate::posting::PostingStream;

/// Evaluates over-invoice exposure of eligible PO lines.
///
/// Eligibility (Simple and not closed) is decided by the caller; ineligible
/// lines must never be passed in.
pub struct GrirEngine;

impl GrirEngine {
    /// Folds one line's ordered postings and returns its exposure, if any.
    ///
    /// Returns `Ok(None)` when IR does not exceed GR at the end of the stream.
    pub fn evaluate(
        stream: &PostingStream,
        unit_price: Decimal,
        snapshot_date: NaiveDate,
        buckets: &TimeBuckets,
    ) -> Result<Option<GrirExposureRecord>, GrirError> {
        let mut tracker = ExposureTracker::new();

        for posting in stream {
            if posting.po_line_id != stream.po_line_id {
                return Err(GrirError::ForeignPosting {
                    expected: stream.po_line_id.clone(),
                    found: posting.po_line_id.clone(),
                });
            }
            tracker
                .apply(posting)
                .ok_or_else(|| GrirError::QuantityOverflow(stream.po_line_id.clone()))?;
        }

        let grir_qty = tracker
            .exposure()
            .ok_or_else(|| GrirError::QuantityOverflow(stream.po_line_id.clone()))?;
        if grir_qty <= Decimal::ZERO {
            return Ok(None);
        }

        let grir_value = grir_qty
            .checked_mul(unit_price)
            .ok_or_else(|| GrirError::ValueOverflow(stream.po_line_id.clone()))?;
        let days_open = TimeBuckets::days_open(snapshot_date, tracker.first_exposure_date);

        Ok(Some(GrirExposureRecord {
            po_line_id: stream.po_line_id.clone(),
            grir_qty,
            grir_value: round_amount(grir_value),
            first_exposure_date: tracker.first_exposure_date,
            days_open,
            time_bucket: buckets.label_for(days_open).to_string(),
            snapshot_date,
        }))
    }
}
