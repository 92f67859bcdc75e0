//! Money helpers shared by the engine and its callers

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Decimal places kept on every displayed price
pub const MONEY_DP: u32 = 2;

/// Two prices closer than this are the same price
pub const PRICE_TOLERANCE: Decimal = dec!(0.01);

/// Round to cents, half away from zero (`11.375 -> 11.38`, `-0.005 -> -0.01`)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether `a` and `b` fall within [`PRICE_TOLERANCE`] of each other
#[inline]
pub fn same_price(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < PRICE_TOLERANCE
}
