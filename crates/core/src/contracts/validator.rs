//! Contract validation.

use std::collections::{BTreeMap, BTreeSet};

use poflow_shared::config::ClassificationConfig;
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ContractError;
use crate::grir::{GrirExposureRecord, TimeBuckets};
use crate::po::{PoClass, PoClassifier, PoLine};
use crate::prepare::{PoTransaction, PreparedPoLine};

/// Outcome of contract validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContractReport {
    /// Fatal violations.
    #[serde(skip)]
    pub violations: Vec<ContractError>,
    /// PO lines missing a PO number or line number (warning only).
    pub missing_identifiers: usize,
    /// Transactions checked.
    pub transactions_checked: usize,
    /// Exposures checked.
    pub exposures_checked: usize,
}

impl ContractReport {
    /// Returns true if no fatal violation was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks prepared outputs against the business rules.
pub struct ContractValidator;

impl ContractValidator {
    /// Validates all prepared outputs together.
    ///
    /// Transaction types are GR or IR by construction of `PostingType`. PO
    /// line ids must be unique.
    #[must_use]
    pub fn validate(
        lines: &[PreparedPoLine],
        transactions: &[PoTransaction],
        exposures: &[GrirExposureRecord],
        classification: &ClassificationConfig,
        buckets: &TimeBuckets,
    ) -> ContractReport {
        let by_id: BTreeMap<&PoLineId, &PoLine> = lines
            .iter()
            .map(|prepared| (&prepared.line.po_line_id, &prepared.line))
            .collect();

        let mut report = ContractReport {
            missing_identifiers: lines
                .iter()
                .filter(|p| {
                    let details = &p.line.details;
                    details.po_number.as_deref().is_none_or(str::is_empty)
                        || details.po_line.as_deref().is_none_or(str::is_empty)
                })
                .count(),
            transactions_checked: transactions.len(),
            exposures_checked: exposures.len(),
            ..ContractReport::default()
        };

        let mut seen_lines = BTreeSet::new();
        let mut reported_duplicate = BTreeSet::new();
        for prepared in lines {
            let id = &prepared.line.po_line_id;
            if !seen_lines.insert(id) && reported_duplicate.insert(id) {
                report.violations.push(ContractError::DuplicatePoLine(id.clone()));
            }
        }

        let mut reported_unknown = BTreeSet::new();
        for tx in transactions {
            if !by_id.contains_key(&tx.po_line_id) && reported_unknown.insert(&tx.po_line_id) {
                report
                    .violations
                    .push(ContractError::UnknownTransactionLine(tx.po_line_id.clone()));
            }
        }

        let mut seen = BTreeSet::new();
        for exposure in exposures {
            let id = &exposure.po_line_id;
            if !seen.insert(id) {
                report.violations.push(ContractError::DuplicateGrirLine(id.clone()));
            }
            if exposure.grir_qty <= Decimal::ZERO {
                report.violations.push(ContractError::NonPositiveGrirQty(id.clone()));
            }
            if exposure.grir_value < Decimal::ZERO {
                report.violations.push(ContractError::NegativeGrirValue(id.clone()));
            }
            if !buckets.contains(&exposure.time_bucket) {
                report.violations.push(ContractError::UnknownTimeBucket {
                    po_line_id: id.clone(),
                    bucket: exposure.time_bucket.clone(),
                });
            }
            if let Some(reason) = Self::ineligibility(by_id.get(id).copied(), classification) {
                report.violations.push(ContractError::IneligibleGrirLine {
                    po_line_id: id.clone(),
                    reason,
                });
            }
        }

        report
    }

    fn ineligibility(line: Option<&PoLine>, config: &ClassificationConfig) -> Option<&'static str> {
        let Some(line) = line else {
            return Some("unknown PO line");
        };
        let classification = PoClassifier::classify(line, config);
        if classification.closed {
            Some("receipt status is closed")
        } else if classification.class != PoClass::Simple {
            Some("not a Simple PO line")
        } else {
            None
        }
    }
}
