//! GR and IR posting cleaning.

use poflow_shared::types::round_amount;

use super::types::{PostingCleaningReport, PostingInput};
use crate::po::UnitPriceBook;
use crate::posting::{Posting, PostingType};

/// Joins raw postings to the PO line master and fills their amounts.
pub struct PostingCleaner;

impl PostingCleaner {
    /// Cleans one posting table.
    ///
    /// GR rows with a zero quantity are dropped. Rows referencing a PO line
    /// missing from `prices` are dropped (inner join). A missing amount is
    /// derived as `round(unit_price * qty, 2)`; rows whose derived amount
    /// leaves the decimal range are dropped.
    #[must_use]
    pub fn clean(
        posting_type: PostingType,
        rows: Vec<PostingInput>,
        prices: &UnitPriceBook,
    ) -> (Vec<Posting>, PostingCleaningReport) {
        let mut report = PostingCleaningReport {
            loaded: rows.len(),
            ..PostingCleaningReport::default()
        };
        let mut postings = Vec::with_capacity(rows.len());

        for row in rows {
            if posting_type == PostingType::Gr && row.posting_qty.is_zero() {
                report.zero_qty_dropped += 1;
                continue;
            }
            let Some(unit_price) = prices.get(&row.po_line_id) else {
                report.orphan_dropped += 1;
                continue;
            };

            let posting_amount = match row.posting_amount {
                Some(amount) => amount,
                None => match unit_price.checked_mul(row.posting_qty) {
                    Some(amount) => {
                        report.amount_derived += 1;
                        round_amount(amount)
                    }
                    None => {
                        report.amount_overflow_dropped += 1;
                        continue;
                    }
                },
            };

            postings.push(Posting {
                po_line_id: row.po_line_id,
                posting_date: row.posting_date,
                posting_type,
                posting_qty: row.posting_qty,
                posting_amount,
            });
        }

        report.kept = postings.len();
        (postings, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::po::PoLine;
    use chrono::NaiveDate;
    use poflow_shared::types::PoLineId;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn book() -> UnitPriceBook {
        UnitPriceBook::build(&[
            PoLine::new(PoLineId::from("A-1"), "GLD", "K", dec!(3), dec!(10), "OPEN"),
            PoLine::new(PoLineId::from("A-2"), "OPS", "F", Decimal::ZERO, dec!(10), "OPEN"),
        ])
    }

    fn row(id: &str, qty: Decimal, amount: Option<Decimal>) -> PostingInput {
        PostingInput {
            po_line_id: PoLineId::from(id),
            posting_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            posting_qty: qty,
            posting_amount: amount,
        }
    }

    #[test]
    fn test_gr_drops_zero_quantity_and_orphans() {
        let rows = vec![
            row("A-1", dec!(2), None),
            row("A-1", Decimal::ZERO, None),
            row("Z-9", dec!(1), None),
        ];
        let (postings, report) = PostingCleaner::clean(PostingType::Gr, rows, &book());

        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].posting_type, PostingType::Gr);
        assert_eq!(report.loaded, 3);
        assert_eq!(report.zero_qty_dropped, 1);
        assert_eq!(report.orphan_dropped, 1);
        assert_eq!(report.kept, 1);
    }

    #[test]
    fn test_ir_keeps_zero_quantity() {
        let (postings, report) = PostingCleaner::clean(
            PostingType::Ir,
            vec![row("A-1", Decimal::ZERO, None)],
            &book(),
        );
        assert_eq!(postings.len(), 1);
        assert_eq!(report.zero_qty_dropped, 0);
    }

    #[test]
    fn test_derives_missing_amount_from_unit_price() {
        let (postings, report) = PostingCleaner::clean(
            PostingType::Ir,
            vec![row("A-1", dec!(2), None), row("A-1", dec!(1), Some(dec!(9.99)))],
            &book(),
        );
        // 10 / 3 * 2 = 6.666.. -> 6.67
        assert_eq!(postings[0].posting_amount, dec!(6.67));
        assert_eq!(postings[1].posting_amount, dec!(9.99));
        assert_eq!(report.amount_derived, 1);
    }

    #[test]
    fn test_overflowing_derived_amount_is_dropped_and_counted() {
        let prices = UnitPriceBook::build(&[PoLine::new(
            PoLineId::from("A-3"),
            "GLD",
            "K",
            dec!(1),
            dec!(10),
            "OPEN",
        )]);
        let rows = vec![
            row("A-3", Decimal::MAX, None),
            row("A-3", Decimal::MAX, Some(dec!(1))),
            row("A-3", dec!(2), None),
        ];
        let (postings, report) = PostingCleaner::clean(PostingType::Gr, rows, &prices);

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].posting_amount, dec!(1));
        assert_eq!(postings[1].posting_amount, dec!(20));
        assert_eq!(report.amount_overflow_dropped, 1);
        assert_eq!(report.amount_derived, 1);
        assert_eq!(report.kept, 2);
    }

    #[test]
    fn test_zero_quantity_line_derives_zero_amount() {
        let (postings, _) =
            PostingCleaner::clean(PostingType::Gr, vec![row("A-2", dec!(4), None)], &book());
        assert_eq!(postings[0].posting_amount, Decimal::ZERO);
    }
}
