use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// A percentage delta versus a prior period. Negative values represent
/// decline; display rounds to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::MustBeFinite);
        }
        Ok(Percent(value))
    }

    pub fn zero() -> Self {
        Percent(0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 >= 0.0 {
            write!(f, "+{:.1}%", self.0)
        } else {
            write!(f, "{:.1}%", self.0)
        }
    }
}
