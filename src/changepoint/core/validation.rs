//! Parameter and observation guards for change detectors.
use crate::changepoint::errors::{DetectorError, DetectorResult};

pub fn validate_observation(value: f64) -> DetectorResult<()> {
    if !value.is_finite() {
        return Err(DetectorError::NonFiniteObservation { value });
    }
    Ok(())
}

pub fn require_finite(name: &'static str, value: f64) -> DetectorResult<()> {
    if !value.is_finite() {
        return Err(DetectorError::InvalidParameter { name, value, reason: "Must be finite." });
    }
    Ok(())
}

pub fn require_positive(name: &'static str, value: f64) -> DetectorResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DetectorError::InvalidParameter {
            name,
            value,
            reason: "Must be finite and strictly positive.",
        });
    }
    Ok(())
}

pub fn require_non_negative(name: &'static str, value: f64) -> DetectorResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DetectorError::InvalidParameter {
            name,
            value,
            reason: "Must be finite and non-negative.",
        });
    }
    Ok(())
}

/// Open unit interval `(0, 1)`.
pub fn require_probability(name: &'static str, value: f64) -> DetectorResult<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(DetectorError::InvalidParameter {
            name,
            value,
            reason: "Must lie strictly between 0 and 1.",
        });
    }
    Ok(())
}
