//! Preparation service.

use std::collections::{BTreeMap, BTreeSet};

use poflow_shared::config::ClassificationConfig;
use poflow_shared::types::{PoLineId, round_amount, round_qty, round_ratio};
use rust_decimal::Decimal;

use super::error::PrepareError;
use super::types::{
    OpenPositionReport, PoLifecycleStatus, PoStatusFlags, PoTransaction, PreparedPoLine,
};
use crate::cost_impact::{CostImpactRecord, CostImpactTotals};
use crate::grir::GrirExposureRecord;
use crate::po::{PoClassifier, PoLine};

/// WBS prefix of capitalized projects.
const CAPEX_WBS_PREFIX: &str = "C.";

/// Lowercased GTS status fragment of a screening block.
const GTS_BLOCKED_MARKER: &str = "gts blocked";

/// Lowercased approval status fragment of a workflow block.
const APPROVAL_BLOCKED_MARKER: &str = "blocked";

/// Maps engine outputs into import-ready rows.
pub struct PreparationService;

impl PreparationService {
    /// Derives the open position, recognized cost, and status flags of every
    /// PO line.
    ///
    /// Lines without cost impact records are fully open. Closed lines are
    /// forced to zero. The first row of a repeated `po_line_id` wins.
    pub fn open_positions(
        lines: Vec<PoLine>,
        records: &[CostImpactRecord],
        config: &ClassificationConfig,
    ) -> Result<(Vec<PreparedPoLine>, OpenPositionReport), PrepareError> {
        let mut totals: BTreeMap<&PoLineId, CostImpactTotals> = BTreeMap::new();
        for record in records {
            let entry = totals.entry(&record.po_line_id).or_default();
            *entry = entry
                .checked_add(record)
                .ok_or_else(|| PrepareError::TotalsOverflow(record.po_line_id.clone()))?;
        }

        let known: BTreeSet<&PoLineId> = lines.iter().map(|line| &line.po_line_id).collect();
        let mut report = OpenPositionReport {
            unmatched_records: records
                .iter()
                .filter(|record| !known.contains(&record.po_line_id))
                .count(),
            ..OpenPositionReport::default()
        };

        let mut seen = BTreeSet::new();
        let mut prepared = Vec::with_capacity(lines.len());
        for line in lines {
            if !seen.insert(line.po_line_id.clone()) {
                report.duplicates_dropped += 1;
                continue;
            }
            let recognized = totals.get(&line.po_line_id).copied().unwrap_or_default();
            let row = Self::prepare_line(line, recognized, config)?;

            report.lines += 1;
            if PoClassifier::is_closed(&row.line, config) {
                report.closed_forced += 1;
            }
            if row.open_po_value > Decimal::ZERO {
                report.with_open_value += 1;
            }
            if row.flags.is_capex {
                report.capex += 1;
            }
            match row.lifecycle_status {
                PoLifecycleStatus::Closed => report.closed += 1,
                PoLifecycleStatus::GtsBlocked => report.gts_blocked += 1,
                PoLifecycleStatus::PendingApproval => report.pending_approval += 1,
                PoLifecycleStatus::Open => {}
            }
            prepared.push(row);
        }

        Ok((prepared, report))
    }

    fn prepare_line(
        line: PoLine,
        recognized: CostImpactTotals,
        config: &ClassificationConfig,
    ) -> Result<PreparedPoLine, PrepareError> {
        let closed = PoClassifier::is_closed(&line, config);
        let (open_po_qty, open_po_value) = if closed {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let overflow = || PrepareError::OpenPositionOverflow(line.po_line_id.clone());
            let qty = line
                .ordered_quantity
                .checked_sub(recognized.qty)
                .ok_or_else(overflow)?;
            let value = line
                .order_value_usd
                .checked_sub(recognized.amount)
                .ok_or_else(overflow)?;
            (round_qty(qty), round_amount(value))
        };

        let cost_impact_value = round_amount(recognized.amount);
        let cost_impact_pct = cost_impact_value
            .checked_div(line.order_value_usd)
            .map(round_ratio);

        let flags = PoStatusFlags {
            is_capex: Self::is_capex(&line),
            is_gts_blocked: Self::status_contains(
                line.details.gts_status.as_deref(),
                GTS_BLOCKED_MARKER,
            ),
            is_approval_blocked: Self::status_contains(
                line.details.approval_status.as_deref(),
                APPROVAL_BLOCKED_MARKER,
            ),
            is_effectively_closed: closed || (open_po_qty.is_zero() && open_po_value.is_zero()),
        };

        Ok(PreparedPoLine {
            line,
            open_po_qty,
            open_po_value,
            cost_impact_value,
            cost_impact_pct,
            lifecycle_status: flags.lifecycle_status(),
            flags,
            fmt_po: false,
        })
    }

    fn is_capex(line: &PoLine) -> bool {
        line.details
            .wbs_element
            .as_deref()
            .is_some_and(|wbs| wbs.trim_start().starts_with(CAPEX_WBS_PREFIX))
    }

    fn status_contains(status: Option<&str>, marker: &str) -> bool {
        status.is_some_and(|status| status.to_lowercase().contains(marker))
    }

    /// Maps cost impact records to PO transactions.
    #[must_use]
    pub fn transactions(records: &[CostImpactRecord]) -> Vec<PoTransaction> {
        records
            .iter()
            .map(|record| {
                let amount = round_amount(record.cost_impact_amount);
                PoTransaction {
                    po_line_id: record.po_line_id.clone(),
                    transaction_type: record.posting_type,
                    posting_date: record.posting_date,
                    quantity: round_qty(record.posting_qty),
                    cost_impact_qty: round_qty(record.cost_impact_qty),
                    cost_impact_amount: amount,
                    amount,
                }
            })
            .collect()
    }

    /// Rounds GRIR exposures to output precision.
    #[must_use]
    pub fn grir_exposures(records: &[GrirExposureRecord]) -> Vec<GrirExposureRecord> {
        records
            .iter()
            .map(|record| GrirExposureRecord {
                grir_qty: round_qty(record.grir_qty),
                grir_value: round_amount(record.grir_value),
                ..record.clone()
            })
            .collect()
    }
}
