use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{
    Decimal,
    RoundingStrategy
};

/// Digits a customer-facing price is quoted at.
pub const PRICE_DIGITS: u32 = 2;

/// Rounds `x` to `digits` decimal places, halves away from zero.
///
/// The rounding happens in `Decimal` so that values such as `0.125` land on
/// the expected side. `None` for NaN, infinities and magnitudes `Decimal`
/// cannot hold.
pub fn round_decimal(x: f64, digits: u32) -> Option<Decimal> {
    Decimal::from_f64(x)
        .map(|d| d.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero))
}
