
pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn max_x(&self) -> f64;
}
