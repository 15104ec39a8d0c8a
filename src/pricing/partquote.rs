use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::RoundingStrategy;
use thiserror::Error;

use crate::markup::markuptable::MarkupTable;
use crate::math::round::round_decimal;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("unit cost {0} is not a non-negative amount")]
    InvalidUnitCost(f64),
    #[error("quantity {0} is not a non-negative amount")]
    InvalidQuantity(f64),
    #[error("price amount overflows the supported range")]
    AmountOverflow,
}

/// Customer price of a part line: the unit cost marked up through the markup
/// table, then multiplied out by quantity. Both prices are rounded to
/// `digits` places, the extended price from the already rounded unit price so
/// that the line adds up on the estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct PartQuote {
    unit_cost: f64,
    quantity: f64,
    multiplier: f64,
    unit_price: Decimal,
    extended_price: Decimal,
}

impl PartQuote {
    pub fn new(table: &MarkupTable,
               unit_cost: f64,
               quantity: f64,
               digits: u32) -> Result<PartQuote, PricingError> {
        if !(unit_cost >= 0.0 && unit_cost.is_finite()) {
            return Err(PricingError::InvalidUnitCost(unit_cost));
        }
        let quantity_dec = Decimal::from_f64(quantity)
            .filter(|q| !q.is_sign_negative() || q.is_zero())
            .ok_or(PricingError::InvalidQuantity(quantity))?;
        let marked_up = table
            .apply(unit_cost)
            .map_err(|_| PricingError::AmountOverflow)?;
        let unit_price = round_decimal(marked_up, digits)
            .ok_or(PricingError::AmountOverflow)?;
        let extended_price = unit_price
            .checked_mul(quantity_dec)
            .ok_or(PricingError::AmountOverflow)?
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
        Ok(PartQuote {
            unit_cost,
            quantity,
            multiplier: table.multiplier(unit_cost),
            unit_price,
            extended_price,
        })
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn extended_price(&self) -> Decimal {
        self.extended_price
    }

    /// Sum of the extended prices of several lines.
    pub fn total(quotes: &[PartQuote]) -> Decimal {
        quotes.iter().map(PartQuote::extended_price).sum()
    }
}
