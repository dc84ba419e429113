//! High-water-mark fold state for Complex lines.

use rust_decimal::Decimal;

use crate::posting::PostingType;

/// Running counters of the Complex cost-recognition fold.
///
/// Invariant: after every `apply`, `last_recognized == max(cum_gr, cum_ir)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighWaterMark {
    /// Cumulative GR quantity.
    pub cum_gr: Decimal,
    /// Cumulative IR quantity.
    pub cum_ir: Decimal,
    /// Quantity recognized so far.
    pub last_recognized: Decimal,
}

impl HighWaterMark {
    /// Creates a fresh fold state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one posting and returns the recognized quantity delta.
    ///
    /// Returns `None` if a counter overflows; the state is left untouched in
    /// that case.
    pub fn apply(&mut self, posting_type: PostingType, qty: Decimal) -> Option<Decimal> {
        let (own, other) = match posting_type {
            PostingType::Gr => (self.cum_gr.checked_add(qty)?, self.cum_ir),
            PostingType::Ir => (self.cum_ir.checked_add(qty)?, self.cum_gr),
        };

        // Ahead, the posting side claims its own cumulative; behind, it
        // catches up to the side that is ahead. Either way the high-water mark.
        let reference = own.max(other);
        let delta = reference.checked_sub(self.last_recognized)?;

        match posting_type {
            PostingType::Gr => self.cum_gr = own,
            PostingType::Ir => self.cum_ir = own,
        }
        self.last_recognized = reference;
        Some(delta)
    }

    /// Current high-water mark.
    #[must_use]
    pub fn reference(&self) -> Decimal {
        self.cum_gr.max(self.cum_ir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_own_side_ahead_claims_own_cumulative() {
        let mut hwm = HighWaterMark::new();
        assert_eq!(hwm.apply(PostingType::Gr, dec!(10)), Some(dec!(10)));
        assert_eq!(hwm.apply(PostingType::Ir, dec!(15)), Some(dec!(5)));
        assert_eq!(hwm.last_recognized, dec!(15));
    }

    #[test]
    fn test_lagging_side_recognizes_nothing() {
        let mut hwm = HighWaterMark::new();
        hwm.apply(PostingType::Ir, dec!(8));
        assert_eq!(hwm.apply(PostingType::Gr, dec!(3)), Some(Decimal::ZERO));
        assert_eq!(hwm.reference(), dec!(8));
    }

    #[test]
    fn test_reversal_below_other_side_is_absorbed() {
        let mut hwm = HighWaterMark::new();
        hwm.apply(PostingType::Gr, dec!(10));
        hwm.apply(PostingType::Ir, dec!(10));
        assert_eq!(hwm.apply(PostingType::Ir, dec!(-4)), Some(Decimal::ZERO));
        assert_eq!(hwm.last_recognized, dec!(10));
    }

    #[test]
    fn test_reversal_of_leading_side_is_negative() {
        let mut hwm = HighWaterMark::new();
        hwm.apply(PostingType::Gr, dec!(10));
        assert_eq!(hwm.apply(PostingType::Gr, dec!(-10)), Some(dec!(-10)));
        assert_eq!(hwm.last_recognized, Decimal::ZERO);
    }

    #[test]
    fn test_overflow_leaves_state_untouched() {
        let mut hwm = HighWaterMark::new();
        hwm.apply(PostingType::Gr, Decimal::MAX);
        let before = hwm;
        assert_eq!(hwm.apply(PostingType::Gr, Decimal::MAX), None);
        assert_eq!(hwm, before);
    }
}
