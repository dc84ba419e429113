//! Cost impact engine.

use poflow_shared::types::round_amount;
use rust_decimal::Decimal;

use super::error::CostImpactError;
use super::high_water::HighWaterMark;
use super::types::CostImpactRecord;
use crate::po::PoClass;
use crate::posting::{Posting, PostingStream, PostingType};

/// Converts ordered posting streams into cost impact records.
pub struct CostImpactEngine;

impl CostImpactEngine {
    /// Runs the algorithm matching the line's class.
    pub fn run(
        class: PoClass,
        stream: &PostingStream,
        unit_price: Decimal,
    ) -> Result<Vec<CostImpactRecord>, CostImpactError> {
        match class {
            PoClass::Simple => Self::simple(stream),
            PoClass::Complex => Self::complex(stream, unit_price),
        }
    }

    /// Simple lines: one record per GR posting carrying the posting's own
    /// quantity and amount. IR postings recognize nothing.
    ///
    /// The line's running sums must stay in range so downstream totals of
    /// one line never overflow.
    pub fn simple(stream: &PostingStream) -> Result<Vec<CostImpactRecord>, CostImpactError> {
        let mut records = Vec::new();
        let mut cum_qty = Decimal::ZERO;
        let mut cum_amount = Decimal::ZERO;

        for posting in stream {
            Self::check_owner(stream, posting)?;
            if posting.posting_type != PostingType::Gr {
                continue;
            }
            cum_qty = cum_qty
                .checked_add(posting.posting_qty)
                .ok_or_else(|| CostImpactError::QuantityOverflow(stream.po_line_id.clone()))?;
            cum_amount = cum_amount
                .checked_add(posting.posting_amount)
                .ok_or_else(|| CostImpactError::AmountOverflow(stream.po_line_id.clone()))?;

            records.push(CostImpactRecord {
                po_line_id: posting.po_line_id.clone(),
                posting_date: posting.posting_date,
                posting_type: posting.posting_type,
                posting_qty: posting.posting_qty,
                cost_impact_qty: posting.posting_qty,
                cost_impact_amount: posting.posting_amount,
            });
        }
        Ok(records)
    }

    /// Complex lines: one record per posting, GR and IR alike, with the
    /// quantity delta of the high-water mark priced at `unit_price`.
    ///
    /// Zero-delta records are emitted so every posting is represented.
    pub fn complex(
        stream: &PostingStream,
        unit_price: Decimal,
    ) -> Result<Vec<CostImpactRecord>, CostImpactError> {
        let mut state = HighWaterMark::new();
        let mut records = Vec::with_capacity(stream.len());

        for posting in stream {
            Self::check_owner(stream, posting)?;

            let delta = state
                .apply(posting.posting_type, posting.posting_qty)
                .ok_or_else(|| CostImpactError::QuantityOverflow(stream.po_line_id.clone()))?;
            let amount = delta
                .checked_mul(unit_price)
                .ok_or_else(|| CostImpactError::AmountOverflow(stream.po_line_id.clone()))?;

            records.push(CostImpactRecord {
                po_line_id: posting.po_line_id.clone(),
                posting_date: posting.posting_date,
                posting_type: posting.posting_type,
                posting_qty: posting.posting_qty,
                cost_impact_qty: delta,
                cost_impact_amount: round_amount(amount),
            });
        }

        Ok(records)
    }

    fn check_owner(stream: &PostingStream, posting: &Posting) -> Result<(), CostImpactError> {
        if posting.po_line_id == stream.po_line_id {
            Ok(())
        } else {
            Err(CostImpactError::ForeignPosting {
                expected: stream.po_line_id.clone(),
                found: posting.po_line_id.clone(),
            })
        }
    }
}
