use serde::{
    Deserialize,
    Serialize
};

use super::configurationerror::ConfigurationError;

/// One point of the markup curve: inputs at `threshold` get `multiplier`.
///
/// A threshold of `f64::INFINITY` stands for "no upper limit".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    threshold: f64,
    multiplier: f64
}

impl Breakpoint {
    pub fn new(threshold: f64, multiplier: f64) -> Result<Breakpoint, ConfigurationError> {
        // rejects NaN too
        if !(threshold >= 0.0) {
            return Err(ConfigurationError::InvalidThreshold(threshold));
        }
        if !multiplier.is_finite() {
            return Err(ConfigurationError::InvalidMultiplier(multiplier));
        }
        Ok(Breakpoint { threshold, multiplier })
    }

    pub fn unbounded(multiplier: f64) -> Result<Breakpoint, ConfigurationError> {
        Breakpoint::new(f64::INFINITY, multiplier)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_unbounded(&self) -> bool {
        self.threshold == f64::INFINITY
    }
}

/// Unvalidated breakpoint as it arrives from a request body, a JSON file or a
/// store row. `value: null` is the unbounded threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkupInput {
    pub value: Option<f64>,
    pub multiplier: f64
}

impl MarkupInput {
    pub fn new(value: Option<f64>, multiplier: f64) -> MarkupInput {
        MarkupInput { value, multiplier }
    }

    /// Admin-side validation: on top of `Breakpoint::new`, a configured
    /// multiplier may not discount below cost.
    pub fn validate(&self) -> Result<Breakpoint, ConfigurationError> {
        let breakpoint = Breakpoint::new(self.value.unwrap_or(f64::INFINITY), self.multiplier)?;
        if breakpoint.multiplier() < 1.0 {
            return Err(ConfigurationError::MultiplierBelowOne(breakpoint.multiplier()));
        }
        Ok(breakpoint)
    }
}

impl From<Breakpoint> for MarkupInput {
    fn from(breakpoint: Breakpoint) -> MarkupInput {
        let value = if breakpoint.is_unbounded() { None } else { Some(breakpoint.threshold()) };
        MarkupInput::new(value, breakpoint.multiplier())
    }
}
