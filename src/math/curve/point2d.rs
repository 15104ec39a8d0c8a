
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Straight-line value between `lhs_pt` and `rhs_pt` at `x`.
    ///
    /// Evaluated as `y0 + (y1 - y0) * ((x - x0) / (x1 - x0))`. For `x` inside
    /// the span the ratio stays in `[0, 1]`, so the result is finite whenever
    /// `y1 - y0` is.
    pub fn lerp(lhs_pt: &Point2D, rhs_pt: &Point2D, x: f64) -> f64 {
        let ratio = (x - lhs_pt.x) / (rhs_pt.x - lhs_pt.x);
        lhs_pt.y + (rhs_pt.y - lhs_pt.y) * ratio
    }
}
