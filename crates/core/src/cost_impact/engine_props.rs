//! Property-based tests for the cost impact engine.
//!
//! - Cost conservation of the Complex high-water mark
//! - Simple-PO passthrough
//! - Determinism

use chrono::NaiveDate;
use poflow_shared::types::{PoLineId, round_amount};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::CostImpactEngine;
use super::types::CostImpactTotals;
use crate::posting::{Posting, PostingMerger, PostingStream, PostingType};

/// Strategy to generate signed quantities (-50.00 to 150.00).
fn signed_qty() -> impl Strategy<Value = Decimal> {
    (-5_000i64..15_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate unit prices (0.0000 to 500.0000).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate one posting of line "X-1".
fn posting() -> impl Strategy<Value = Posting> {
    (1u32..=28, prop::bool::ANY, signed_qty()).prop_map(|(d, is_gr, qty)| {
        let date = NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
        let id = PoLineId::from("X-1");
        if is_gr {
            Posting::gr(id, date, qty, round_amount(qty))
        } else {
            Posting::ir(id, date, qty, round_amount(qty))
        }
    })
}

/// Helper to merge generated postings into the single stream of "X-1".
fn merged(postings: Vec<Posting>) -> PostingStream {
    let (gr, ir): (Vec<_>, Vec<_>) = postings
        .into_iter()
        .partition(|p| p.posting_type == PostingType::Gr);
    PostingMerger::merge(gr, ir)
        .remove(&PoLineId::from("X-1"))
        .unwrap_or_else(|| PostingStream::empty(PoLineId::from("X-1")))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Cost conservation
    // =========================================================================

    /// The running sum of deltas equals max(cum_gr, cum_ir) after every event.
    #[test]
    fn prop_running_sum_tracks_high_water_mark(
        postings in prop::collection::vec(posting(), 0..40),
        price in unit_price(),
    ) {
        let stream = merged(postings);
        let records = CostImpactEngine::complex(&stream, price).unwrap();
        prop_assert_eq!(records.len(), stream.len());

        let mut cum_gr = Decimal::ZERO;
        let mut cum_ir = Decimal::ZERO;
        let mut running = Decimal::ZERO;
        for (posting, record) in stream.iter().zip(&records) {
            match posting.posting_type {
                PostingType::Gr => cum_gr += posting.posting_qty,
                PostingType::Ir => cum_ir += posting.posting_qty,
            }
            running += record.cost_impact_qty;
            prop_assert_eq!(running, cum_gr.max(cum_ir));
        }
    }

    /// Amounts sum to the priced total within one cent per record.
    #[test]
    fn prop_amounts_match_priced_quantity(
        postings in prop::collection::vec(posting(), 1..40),
        price in unit_price(),
    ) {
        let stream = merged(postings);
        let records = CostImpactEngine::complex(&stream, price).unwrap();
        let totals = CostImpactTotals::of(&records).unwrap();

        let expected = round_amount(totals.qty * price);
        let tolerance = Decimal::new(1, 2) * Decimal::from(records.len());
        prop_assert!((totals.amount - expected).abs() <= tolerance);
    }

    // =========================================================================
    // Simple passthrough
    // =========================================================================

    /// Recognized quantity of a Simple line equals the sum of its GR postings.
    #[test]
    fn prop_simple_recognizes_gr_quantity_exactly(
        postings in prop::collection::vec(posting(), 0..40),
    ) {
        let stream = merged(postings);
        let gr_total: Decimal = stream
            .iter()
            .filter(|p| p.posting_type == PostingType::Gr)
            .map(|p| p.posting_qty)
            .sum();

        let records = CostImpactEngine::simple(&stream).unwrap();
        prop_assert!(records.iter().all(|r| r.posting_type == PostingType::Gr));
        prop_assert_eq!(CostImpactTotals::of(&records).unwrap().qty, gr_total);
    }

    // =========================================================================
    // Determinism
    // =========================================================================

    /// Reducing the same stream twice yields identical records.
    #[test]
    fn prop_complex_is_deterministic(
        postings in prop::collection::vec(posting(), 0..40),
        price in unit_price(),
    ) {
        let first = CostImpactEngine::complex(&merged(postings.clone()), price).unwrap();
        let second = CostImpactEngine::complex(&merged(postings), price).unwrap();
        prop_assert_eq!(first, second);
    }
}
