//! Batch engine.

use std::collections::BTreeMap;

use poflow_shared::types::PoLineId;
use rayon::prelude::*;

use super::types::{BatchOutcome, BatchParams, BatchReport, LineFailure};
use crate::cost_impact::{CostImpactEngine, CostImpactError, CostImpactRecord};
use crate::grir::{GrirEngine, GrirError, GrirExposureRecord};
use crate::po::{Classification, PoClass, PoClassifier, PoLine, UnitPriceResolver};
use crate::posting::PostingStream;

/// Result of reducing one PO line.
struct LineOutcome {
    classification: Classification,
    price_defined: bool,
    cost_impact: Result<Vec<CostImpactRecord>, CostImpactError>,
    grir: Option<Result<Option<GrirExposureRecord>, GrirError>>,
}

/// Runs both engines over every PO line.
pub struct BatchEngine;

impl BatchEngine {
    /// Reduces every PO line against its posting stream.
    ///
    /// The first row of a repeated `po_line_id` wins. Streams without a PO
    /// line are counted as orphans and never reduced. Lines without postings
    /// produce no rows.
    #[must_use]
    pub fn run(
        lines: &[PoLine],
        streams: &BTreeMap<PoLineId, PostingStream>,
        params: &BatchParams,
    ) -> BatchOutcome {
        let mut report = BatchReport::default();

        let mut unique: BTreeMap<&PoLineId, &PoLine> = BTreeMap::new();
        for line in lines {
            if unique.contains_key(&line.po_line_id) {
                report.duplicate_lines += 1;
            } else {
                unique.insert(&line.po_line_id, line);
            }
        }

        report.orphan_postings = streams
            .iter()
            .filter(|(id, _)| !unique.contains_key(id))
            .map(|(_, stream)| stream.len())
            .sum();

        let work: Vec<(&PoLine, Option<&PostingStream>)> = unique
            .values()
            .map(|line| (*line, streams.get(&line.po_line_id)))
            .collect();

        let outcomes: Vec<LineOutcome> = if params.parallel {
            work.par_iter()
                .map(|(line, stream)| Self::reduce_line(line, *stream, params))
                .collect()
        } else {
            work.iter()
                .map(|(line, stream)| Self::reduce_line(line, *stream, params))
                .collect()
        };

        let mut outcome = BatchOutcome::default();
        for ((line, _), result) in work.iter().zip(outcomes) {
            report.lines += 1;
            match result.classification.class {
                PoClass::Simple => report.simple += 1,
                PoClass::Complex => report.complex += 1,
            }
            if result.classification.ambiguous {
                report.ambiguous += 1;
            }
            if !result.price_defined {
                report.undefined_unit_price += 1;
            }

            match result.cost_impact {
                Ok(records) => outcome.cost_impact.extend(records),
                Err(err) => report.failures.push(LineFailure {
                    po_line_id: line.po_line_id.clone(),
                    engine: "cost_impact",
                    error_code: err.error_code(),
                    message: err.to_string(),
                }),
            }

            if let Some(grir) = result.grir {
                report.grir_eligible += 1;
                match grir {
                    Ok(Some(record)) => outcome.grir.push(record),
                    Ok(None) => {}
                    Err(err) => report.failures.push(LineFailure {
                        po_line_id: line.po_line_id.clone(),
                        engine: "grir",
                        error_code: err.error_code(),
                        message: err.to_string(),
                    }),
                }
            }
        }

        report.cost_impact_records = outcome.cost_impact.len();
        report.grir_records = outcome.grir.len();
        outcome.report = report;
        outcome
    }

    fn reduce_line(
        line: &PoLine,
        stream: Option<&PostingStream>,
        params: &BatchParams,
    ) -> LineOutcome {
        let classification = PoClassifier::classify(line, &params.classification);
        let price = UnitPriceResolver::resolve(line);

        let empty;
        let stream = match stream {
            Some(stream) => stream,
            None => {
                empty = PostingStream::empty(line.po_line_id.clone());
                &empty
            }
        };

        let cost_impact = CostImpactEngine::run(classification.class, stream, price.value);
        let grir = classification.is_grir_eligible().then(|| {
            GrirEngine::evaluate(stream, price.value, params.snapshot_date, &params.buckets)
        });

        LineOutcome {
            classification,
            price_defined: price.defined,
            cost_impact,
            grir,
        }
    }
}
