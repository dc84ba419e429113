//! Decimal rounding rules for quantities and USD amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Quantities and amounts are `rust_decimal::Decimal` end to end and are only
//! rounded when written out.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of USD amounts in outputs.
pub const AMOUNT_DP: u32 = 2;

/// Decimal places of quantities in outputs.
pub const QTY_DP: u32 = 4;

/// Decimal places of ratios (e.g. cost impact share of order value).
pub const RATIO_DP: u32 = 4;

/// Rounds a USD amount to 2 decimal places using banker's rounding.
#[must_use]
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::MidpointNearestEven)
}

/// Rounds a quantity to 4 decimal places using banker's rounding.
#[must_use]
pub fn round_qty(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(QTY_DP, RoundingStrategy::MidpointNearestEven)
        .normalize()
}

/// Rounds a ratio to 4 decimal places using banker's rounding.
#[must_use]
pub fn round_ratio(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(RATIO_DP, RoundingStrategy::MidpointNearestEven)
        .normalize()
}
