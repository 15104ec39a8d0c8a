use thiserror::Error;

/// A markup table that cannot be interpolated over.
///
/// Every variant is an operator mistake in the configured breakpoints, never a
/// per-request input problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("markup table has no breakpoints")]
    EmptyTable,
    #[error("markup table has more than one breakpoint at threshold {0}")]
    DuplicateThreshold(f64),
    #[error("breakpoint threshold {0} is not a non-negative number")]
    InvalidThreshold(f64),
    #[error("breakpoint multiplier {0} is not a finite number")]
    InvalidMultiplier(f64),
    #[error("breakpoint multiplier {0} is below 1")]
    MultiplierBelowOne(f64),
    #[error("multipliers {0} and {1} are too far apart to interpolate between")]
    MultiplierSpanOverflow(f64, f64),
    #[error("marking up {0} overflows")]
    AmountOverflow(f64),
}
