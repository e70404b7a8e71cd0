use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// A non-negative, finite performance measure (reach, clicks, ROI, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValue(f64);

impl MetricValue {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::MustBeFinite);
        }
        if value < 0.0 {
            return Err(ValidationError::MustBeNonNegative);
        }
        Ok(MetricValue(value))
    }

    /// Zero, for absent or degenerate measures.
    pub fn zero() -> Self {
        MetricValue(0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_value_new_valid() {
        let v = MetricValue::new(1250.0);
        assert!(v.is_ok());
        assert_eq!(v.unwrap().value(), 1250.0);
    }

    #[test]
    fn test_metric_value_new_zero() {
        let v = MetricValue::new(0.0);
        assert!(v.is_ok());
        assert_eq!(v.unwrap().value(), 0.0);
    }

    #[test]
    fn test_metric_value_new_negative() {
        let v = MetricValue::new(-3.5);
        assert!(v.is_err());
    }

    #[test]
    fn test_metric_value_new_nan() {
        let v = MetricValue::new(f64::NAN);
        assert!(v.is_err());
    }
}
