//! Property-based tests for the batch engine.
//!
//! - Parallel and sequential runs are identical
//! - GRIR exposures only for open Simple lines
//! - No cross-line leakage

use chrono::NaiveDate;
use poflow_shared::config::PipelineConfig;
use poflow_shared::types::PoLineId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::BatchEngine;
use super::types::BatchParams;
use crate::po::{PoClass, PoClassifier, PoLine};
use crate::posting::{Posting, PostingMerger};

/// Strategy to generate a PO line among ids L0..L7.
fn po_line() -> impl Strategy<Value = PoLine> {
    (
        0u8..8,
        prop_oneof![Just("GLD"), Just("OPS"), Just("3rd Party"), Just("")],
        prop_oneof![Just("K"), Just("P"), Just("S"), Just("V"), Just("F"), Just("")],
        prop_oneof![Just("OPEN"), Just("CLOSED PO")],
        0i64..100,
        0i64..100_000,
    )
        .prop_map(|(n, vendor, account, status, qty, value)| {
            PoLine::new(
                PoLineId::new(format!("L{n}")),
                vendor,
                account,
                Decimal::from(qty),
                Decimal::new(value, 2),
                status,
            )
        })
}

/// Strategy to generate a posting among ids L0..L9 (L8, L9 are orphans).
fn posting() -> impl Strategy<Value = Posting> {
    (0u8..10, 1u32..=28, prop::bool::ANY, -20i64..60).prop_map(|(n, d, is_gr, qty)| {
        let id = PoLineId::new(format!("L{n}"));
        let date = NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        let qty = Decimal::from(qty);
        if is_gr {
            Posting::gr(id, date, qty, qty)
        } else {
            Posting::ir(id, date, qty, qty)
        }
    })
}

fn params(parallel: bool) -> BatchParams {
    let mut config = PipelineConfig::default();
    config.parallel = parallel;
    BatchParams::from_config(&config, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A parallel run yields exactly the rows and counts of a sequential run.
    #[test]
    fn prop_parallel_equals_sequential(
        lines in prop::collection::vec(po_line(), 0..12),
        gr in prop::collection::vec(posting(), 0..30),
        ir in prop::collection::vec(posting(), 0..30),
    ) {
        let streams = PostingMerger::merge(gr, ir);
        let sequential = BatchEngine::run(&lines, &streams, &params(false));
        let parallel = BatchEngine::run(&lines, &streams, &params(true));
        prop_assert_eq!(sequential, parallel);
    }

    /// Every exposure belongs to an open Simple line and is positive.
    #[test]
    fn prop_grir_eligibility_and_positivity(
        lines in prop::collection::vec(po_line(), 0..12),
        postings in prop::collection::vec(posting(), 0..40),
    ) {
        let streams = PostingMerger::merge(postings, Vec::new());
        let params = params(false);
        let outcome = BatchEngine::run(&lines, &streams, &params);

        for record in &outcome.grir {
            prop_assert!(record.grir_qty > Decimal::ZERO);
            let line = lines.iter().find(|l| l.po_line_id == record.po_line_id).unwrap();
            let classification = PoClassifier::classify(line, &params.classification);
            prop_assert_eq!(classification.class, PoClass::Simple);
            prop_assert!(!classification.closed);
        }
    }

    /// Cost impact rows only reference known lines, and each line's rows
    /// mirror its own postings.
    #[test]
    fn prop_no_cross_line_leakage(
        lines in prop::collection::vec(po_line(), 0..12),
        gr in prop::collection::vec(posting(), 0..30),
        ir in prop::collection::vec(posting(), 0..30),
    ) {
        let streams = PostingMerger::merge(gr, ir);
        let outcome = BatchEngine::run(&lines, &streams, &params(false));

        for record in &outcome.cost_impact {
            prop_assert!(lines.iter().any(|l| l.po_line_id == record.po_line_id));
            let stream = &streams[&record.po_line_id];
            prop_assert!(stream.iter().any(|p| p.posting_date == record.posting_date
                && p.posting_type == record.posting_type
                && p.posting_qty == record.posting_qty));
        }
    }
}
