use crate::math::curve::curve::Curve;
use crate::math::curve::piecewiselinear::PiecewiseLinear;
use crate::math::curve::point2d::Point2D;

use super::breakpoint::{
    Breakpoint,
    MarkupInput
};
use super::configurationerror::ConfigurationError;

// ─────────────────────────────────────────────────────────────────────────────
// MarkupTable
// ─────────────────────────────────────────────────────────────────────────────

/// Validated, threshold-sorted breakpoints together with the curve built from
/// them.
///
/// Lookup rules, for an input magnitude `x` (unit cost or price):
///
/// - `x` at or below the smallest threshold, including `x <= 0`, gets the
///   smallest threshold's multiplier.
/// - `x` at or above the largest finite threshold gets the multiplier of the
///   largest threshold overall. With an unbounded breakpoint present that is
///   the unbounded one, so the curve steps at the last finite threshold.
/// - Anything in between is linearly interpolated between its two neighbours.
///
/// Neighbouring finite multipliers must differ by a finite amount, so every
/// multiplier the table hands out is finite.
pub struct MarkupTable {
    breakpoints: Vec<Breakpoint>,
    curve: PiecewiseLinear
}

impl MarkupTable {
    /// Copies and sorts `breakpoints`; the caller's slice is left as is.
    pub fn new(breakpoints: &[Breakpoint]) -> Result<MarkupTable, ConfigurationError> {
        if breakpoints.is_empty() {
            return Err(ConfigurationError::EmptyTable);
        }

        let mut sorted = breakpoints.to_vec();
        sorted.sort_by(|lhs, rhs| lhs.threshold().total_cmp(&rhs.threshold()));
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].threshold() == pair[1].threshold()) {
            return Err(ConfigurationError::DuplicateThreshold(pair[0].threshold()));
        }

        let (finite, unbounded): (Vec<Breakpoint>, Vec<Breakpoint>) = sorted
            .iter()
            .partition(|breakpoint| !breakpoint.is_unbounded());
        let points: Vec<Point2D> = finite
            .iter()
            .map(|breakpoint| Point2D::new(breakpoint.threshold(), breakpoint.multiplier()))
            .collect();
        if let Some(pair) = points.windows(2).find(|pair| !(pair[1].y() - pair[0].y()).is_finite()) {
            return Err(ConfigurationError::MultiplierSpanOverflow(pair[0].y(), pair[1].y()));
        }
        let curve = match unbounded.first() {
            Some(breakpoint) => PiecewiseLinear::new_with_upper_value(points, breakpoint.multiplier()),
            None => PiecewiseLinear::new(points),
        }
        // validated, sorted and de-duplicated above, so only emptiness is left
        .ok_or(ConfigurationError::EmptyTable)?;

        Ok(MarkupTable { breakpoints: sorted, curve })
    }

    /// Builds a table from admin-side inputs, applying `MarkupInput::validate`
    /// to every entry.
    pub fn from_inputs(inputs: &[MarkupInput]) -> Result<MarkupTable, ConfigurationError> {
        let breakpoints = inputs
            .iter()
            .map(MarkupInput::validate)
            .collect::<Result<Vec<Breakpoint>, ConfigurationError>>()?;
        MarkupTable::new(&breakpoints)
    }

    /// Breakpoints in ascending threshold order.
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Multiplier that applies to `x`.
    pub fn multiplier(&self, x: f64) -> f64 {
        self.curve.value(x)
    }

    /// `x` marked up by `multiplier(x)`. Nothing is charged for a non-positive
    /// or non-finite `x`; a product outside the `f64` range is an error.
    pub fn apply(&self, x: f64) -> Result<f64, ConfigurationError> {
        if !(x > 0.0 && x.is_finite()) {
            return Ok(0.0);
        }
        let amount = x * self.multiplier(x);
        if !amount.is_finite() {
            return Err(ConfigurationError::AmountOverflow(x));
        }
        Ok(amount)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Free functions over raw breakpoint slices
// ─────────────────────────────────────────────────────────────────────────────

pub fn interpolate_multiplier(table: &[Breakpoint], x: f64) -> Result<f64, ConfigurationError> {
    Ok(MarkupTable::new(table)?.multiplier(x))
}

pub fn apply_markup(table: &[Breakpoint], x: f64) -> Result<f64, ConfigurationError> {
    MarkupTable::new(table)?.apply(x)
}
