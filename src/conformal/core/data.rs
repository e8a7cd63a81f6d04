//! Calibration data for split conformal prediction.
use crate::conformal::{
    core::validation::{validate_finite, validate_len, validate_scales},
    errors::{ConformalError, ConformalResult},
};

/// Held-out `(y, ŷ)` pairs, optionally with per-example scales for the
/// normalized score.
///
/// Invariants: `len(y_true) == len(y_pred) ≥ 1`, all values finite, scales
/// (when present) finite, positive and of the same length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationSet {
    y_true: Vec<f64>,
    y_pred: Vec<f64>,
    scales: Option<Vec<f64>>,
}

impl CalibrationSet {
    /// # Errors
    /// `EmptyCalibration`, `LengthMismatch` or `NonFiniteValue`.
    pub fn new(y_true: Vec<f64>, y_pred: Vec<f64>) -> ConformalResult<Self> {
        if y_true.is_empty() {
            return Err(ConformalError::EmptyCalibration);
        }
        validate_len("y_pred", y_true.len(), y_pred.len())?;
        validate_finite("y_true", &y_true)?;
        validate_finite("y_pred", &y_pred)?;
        Ok(Self { y_true, y_pred, scales: None })
    }

    /// Attach per-example scales `s_i > 0`.
    pub fn with_scales(mut self, scales: Vec<f64>) -> ConformalResult<Self> {
        validate_len("scales", self.y_true.len(), scales.len())?;
        validate_scales(&scales)?;
        self.scales = Some(scales);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.y_true.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_true.is_empty()
    }

    pub fn y_true(&self) -> &[f64] {
        &self.y_true
    }

    pub fn y_pred(&self) -> &[f64] {
        &self.y_pred
    }

    pub fn scales(&self) -> Option<&[f64]> {
        self.scales.as_deref()
    }
}
