//! Shared input checks for calibration data.
use crate::conformal::errors::{ConformalError, ConformalResult};

pub fn validate_alpha(alpha: f64) -> ConformalResult<f64> {
    if alpha > 0.0 && alpha < 1.0 { Ok(alpha) } else { Err(ConformalError::InvalidAlpha { alpha }) }
}

pub fn validate_finite(what: &'static str, values: &[f64]) -> ConformalResult<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(ConformalError::NonFiniteValue { what, index, value }),
        None => Ok(()),
    }
}

pub fn validate_len(what: &'static str, expected: usize, found: usize) -> ConformalResult<()> {
    if expected != found {
        return Err(ConformalError::LengthMismatch { what, expected, found });
    }
    Ok(())
}

pub fn validate_scales(scales: &[f64]) -> ConformalResult<()> {
    match scales.iter().enumerate().find(|(_, s)| !(s.is_finite() && **s > 0.0)) {
        Some((index, &value)) => Err(ConformalError::InvalidScale { index, value }),
        None => Ok(()),
    }
}

pub fn validate_weights(weights: &[f64]) -> ConformalResult<()> {
    match weights.iter().enumerate().find(|(_, w)| !(w.is_finite() && **w >= 0.0)) {
        Some((index, &value)) => Err(ConformalError::InvalidWeight { index, value }),
        None => Ok(()),
    }
}

pub fn validate_probabilities(probs: &[f64]) -> ConformalResult<()> {
    match probs.iter().enumerate().find(|(_, p)| !(0.0..=1.0).contains(*p)) {
        Some((index, &value)) => Err(ConformalError::InvalidProbability { index, value }),
        None => Ok(()),
    }
}
