use serde::{
    Deserialize,
    Serialize
};

use crate::markup::breakpoint::MarkupInput;

/// A persisted markup breakpoint. `value: None` is the unbounded threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkupRow {
    id: i64,
    value: Option<f64>,
    multiplier: f64
}

impl MarkupRow {
    pub fn new(id: i64, input: MarkupInput) -> MarkupRow {
        MarkupRow { id, value: input.value, multiplier: input.multiplier }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn input(&self) -> MarkupInput {
        MarkupInput::new(self.value, self.multiplier)
    }
}
