//! Scenario tests for the GRIR exposure engine.

use chrono::NaiveDate;
use poflow_shared::config::{BucketThreshold, GrirConfig};
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::aging::TimeBuckets;
use super::engine::GrirEngine;
use super::error::GrirError;
use crate::posting::{Posting, PostingMerger, PostingStream};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn snapshot() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn stream(id: &str, gr: Vec<(u32, Decimal)>, ir: Vec<(u32, Decimal)>) -> PostingStream {
    let key = PoLineId::from(id);
    let gr = gr.into_iter().map(|(d, q)| Posting::gr(key.clone(), day(d), q, q));
    let ir = ir.into_iter().map(|(d, q)| Posting::ir(key.clone(), day(d), q, q));
    PostingMerger::merge(gr, ir)
        .remove(&key)
        .unwrap_or_else(|| PostingStream::empty(key))
}

#[test]
fn test_single_ir_opens_exposure() {
    let line = stream("B1", vec![], vec![(10, dec!(5))]);
    let record = GrirEngine::evaluate(&line, dec!(10), snapshot(), &TimeBuckets::default())
        .unwrap()
        .unwrap();

    assert_eq!(record.grir_qty, dec!(5));
    assert_eq!(record.grir_value, dec!(50.00));
    assert_eq!(record.first_exposure_date, Some(day(10)));
    assert_eq!(record.days_open, 51);
    assert_eq!(record.time_bucket, "1-3 months");
    assert_eq!(record.snapshot_date, snapshot());
}

#[test]
fn test_p2_reset_on_recovery() {
    let p2 = stream("P2", vec![(2, dec!(10))], vec![(1, dec!(10)), (3, dec!(3))]);
    let record = GrirEngine::evaluate(&p2, dec!(1), snapshot(), &TimeBuckets::default())
        .unwrap()
        .unwrap();

    assert_eq!(record.grir_qty, dec!(3));
    assert_eq!(record.grir_value, dec!(3));
    // Aged from the reopening on day 3, not the first exposure on day 1.
    assert_eq!(record.first_exposure_date, Some(day(3)));
}

#[test]
fn test_gr_only_line_has_no_exposure() {
    let line = stream("G1", vec![(1, dec!(4)), (2, dec!(6))], vec![]);
    let result = GrirEngine::evaluate(&line, dec!(1), snapshot(), &TimeBuckets::default());
    assert_eq!(result, Ok(None));
}

#[test]
fn test_balanced_line_has_no_exposure() {
    let line = stream("G2", vec![(1, dec!(4))], vec![(2, dec!(4))]);
    let result = GrirEngine::evaluate(&line, dec!(1), snapshot(), &TimeBuckets::default());
    assert_eq!(result, Ok(None));
}

#[test]
fn test_no_postings_no_exposure() {
    let empty = PostingStream::empty(PoLineId::from("E1"));
    let result = GrirEngine::evaluate(&empty, dec!(1), snapshot(), &TimeBuckets::default());
    assert_eq!(result, Ok(None));
}

#[test]
fn test_same_day_gr_and_ir_never_open_exposure_when_balanced() {
    // GR is applied first on a shared date, so IR never leads.
    let line = stream("T1", vec![(5, dec!(2))], vec![(5, dec!(2))]);
    let result = GrirEngine::evaluate(&line, dec!(1), snapshot(), &TimeBuckets::default());
    assert_eq!(result, Ok(None));
}

#[test]
fn test_value_rounds_to_cents() {
    let line = stream("R1", vec![], vec![(1, dec!(3))]);
    let record = GrirEngine::evaluate(&line, dec!(0.3335), snapshot(), &TimeBuckets::default())
        .unwrap()
        .unwrap();
    assert_eq!(record.grir_value, dec!(1.00));
}

#[test]
fn test_exposure_dated_after_snapshot_is_clamped() {
    let line = stream("F1", vec![], vec![(20, dec!(1))]);
    let early = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let record = GrirEngine::evaluate(&line, dec!(1), early, &TimeBuckets::default())
        .unwrap()
        .unwrap();
    assert_eq!(record.days_open, 0);
    assert_eq!(record.time_bucket, "<1 month");
}

#[test]
fn test_custom_buckets() {
    let config = GrirConfig {
        buckets: vec![BucketThreshold {
            max_days: 7,
            label: "week".to_string(),
        }],
        overflow_label: "older".to_string(),
    };
    let buckets = TimeBuckets::from_config(&config);
    let line = stream("C1", vec![], vec![(1, dec!(1))]);

    let record = GrirEngine::evaluate(&line, dec!(1), snapshot(), &buckets)
        .unwrap()
        .unwrap();
    assert_eq!(record.time_bucket, "older");
}

#[test]
fn test_foreign_posting_is_rejected() {
    let mut line = stream("A-1", vec![], vec![(1, dec!(1))]);
    line.postings
        .push(Posting::ir(PoLineId::from("B-1"), day(2), dec!(1), dec!(1)));
    let err = GrirEngine::evaluate(&line, dec!(1), snapshot(), &TimeBuckets::default());
    assert!(matches!(err, Err(GrirError::ForeignPosting { .. })));
}
