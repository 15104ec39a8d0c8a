use crate::math::curve::curve::Curve;
use crate::math::curve::point2d::Point2D;

// ─────────────────────────────────────────────
// PiecewiseLinear
// ─────────────────────────────────────────────
//
// Flat below the first node, linear between nodes, and clamped to
// `upper_value` at or above the last node:
//
//   f(x) = y[0]                                             x <= x[0]
//   f(x) = y[i] + (y[i+1]-y[i]) * (x-x[i]) / (x[i+1]-x[i])  x[i] <= x < x[i+1]
//   f(x) = upper_value                                      x >= x[n]
//
// `upper_value` defaults to y[n]. A different value models a breakpoint at
// +inf: everything past the last finite node takes that value.

pub struct PiecewiseLinear {
    points: Vec<Point2D>,
    upper_value: f64,
}

impl PiecewiseLinear {
    /// Nodes must have finite, strictly increasing x and finite y, with finite
    /// differences between neighbouring y.
    pub fn new(points: Vec<Point2D>) -> Option<PiecewiseLinear> {
        let upper_value = points.last()?.y();
        Self::new_inner(points, upper_value)
    }

    /// Same as `new`, with an explicit value for x at or above the last node.
    ///
    /// `points` may be empty here, in which case the curve is the constant
    /// `upper_value`.
    pub fn new_with_upper_value(points: Vec<Point2D>, upper_value: f64) -> Option<PiecewiseLinear> {
        Self::new_inner(points, upper_value)
    }

    fn new_inner(points: Vec<Point2D>, upper_value: f64) -> Option<PiecewiseLinear> {
        if !upper_value.is_finite() {
            return None;
        }
        if points.iter().any(|pt| !pt.x().is_finite() || !pt.y().is_finite()) {
            return None;
        }
        if points.windows(2).any(|pair| pair[0].x() >= pair[1].x()) {
            return None;
        }
        if points.windows(2).any(|pair| !(pair[1].y() - pair[0].y()).is_finite()) {
            return None;
        }
        Some(PiecewiseLinear { points, upper_value })
    }
}

impl Curve for PiecewiseLinear {
    fn value(&self, x: f64) -> f64 {
        let Some(first) = self.points.first() else {
            return self.upper_value;
        };
        // NaN falls through to the lower boundary as well
        if !(x > first.x()) {
            return first.y();
        }
        if x >= self.max_x() {
            return self.upper_value;
        }
        // first.x() < x < last.x(), so 1 <= i < len
        let i = self.points.partition_point(|pt| pt.x() <= x);
        Point2D::lerp(&self.points[i - 1], &self.points[i], x)
    }

    fn max_x(&self) -> f64 {
        self.points.last().map_or(f64::INFINITY, |pt| pt.x())
    }
}
