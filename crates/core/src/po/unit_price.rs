//! Unit price resolution.
//!
//! `unit_price = order_value_usd / ordered_quantity`. A zero ordered quantity
//! never yields an infinite price: the price is 0 and flagged undefined.

use std::collections::BTreeMap;

use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;

use super::types::PoLine;

/// Resolved unit price of a PO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPrice {
    /// Price per ordered unit in USD (0 when undefined).
    pub value: Decimal,
    /// False when the ordered quantity was zero.
    pub defined: bool,
}

/// Derives unit prices from PO lines.
pub struct UnitPriceResolver;

impl UnitPriceResolver {
    /// Resolves the unit price of one PO line.
    #[must_use]
    pub fn resolve(line: &PoLine) -> UnitPrice {
        match line.order_value_usd.checked_div(line.ordered_quantity) {
            Some(value) => UnitPrice {
                value,
                defined: true,
            },
            None => UnitPrice {
                value: Decimal::ZERO,
                defined: false,
            },
        }
    }
}

/// Unit prices keyed by PO line, built once per run.
#[derive(Debug, Clone, Default)]
pub struct UnitPriceBook {
    prices: BTreeMap<PoLineId, Decimal>,
    undefined: usize,
}

impl UnitPriceBook {
    /// Builds the book from the PO line master. The first row of a repeated
    /// `po_line_id` wins.
    #[must_use]
    pub fn build(lines: &[PoLine]) -> Self {
        let mut book = Self::default();
        for line in lines {
            let price = UnitPriceResolver::resolve(line);
            if !price.defined {
                book.undefined += 1;
            }
            book.prices.entry(line.po_line_id.clone()).or_insert(price.value);
        }
        book
    }

    /// Unit price of a known PO line.
    #[must_use]
    pub fn get(&self, po_line_id: &PoLineId) -> Option<Decimal> {
        self.prices.get(po_line_id).copied()
    }

    /// Returns true if the PO line exists in the master.
    #[must_use]
    pub fn contains(&self, po_line_id: &PoLineId) -> bool {
        self.prices.contains_key(po_line_id)
    }

    /// Number of lines whose price fell back to 0.
    #[must_use]
    pub fn undefined_count(&self) -> usize {
        self.undefined
    }

    /// Number of priced lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(id: &str, qty: Decimal, value: Decimal) -> PoLine {
        PoLine::new(PoLineId::from(id), "GLD", "K", qty, value, "OPEN")
    }

    #[test]
    fn test_resolve_divides_value_by_quantity() {
        let price = UnitPriceResolver::resolve(&line("A-1", dec!(4), dec!(10)));
        assert_eq!(price.value, dec!(2.5));
        assert!(price.defined);
    }

    #[test]
    fn test_zero_quantity_yields_zero_price() {
        let price = UnitPriceResolver::resolve(&line("A-1", Decimal::ZERO, dec!(10)));
        assert_eq!(price.value, Decimal::ZERO);
        assert!(!price.defined);
    }

    #[test]
    fn test_book_counts_undefined_prices() {
        let book = UnitPriceBook::build(&[
            line("A-1", dec!(2), dec!(10)),
            line("A-2", Decimal::ZERO, dec!(10)),
            line("A-3", Decimal::ZERO, Decimal::ZERO),
        ]);
        assert_eq!(book.len(), 3);
        assert_eq!(book.undefined_count(), 2);
        assert_eq!(book.get(&PoLineId::from("A-1")), Some(dec!(5)));
        assert_eq!(book.get(&PoLineId::from("A-2")), Some(Decimal::ZERO));
        assert_eq!(book.get(&PoLineId::from("B-9")), None);
        assert!(book.contains(&PoLineId::from("A-3")));
    }
}
