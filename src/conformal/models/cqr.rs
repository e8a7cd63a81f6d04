//! Conformalized quantile regression.
use tracing::debug;

use crate::conformal::{
    core::{
        quantile::{sorted, upper_quantile},
        scores,
        validation::{validate_alpha, validate_finite, validate_len},
    },
    errors::{ConformalError, ConformalResult},
    models::interval::PredictionInterval,
};

/// Widens (or narrows, when `q̂ < 0`) a quantile-regression band
/// `[lo, hi]` to `[lo − q̂, hi + q̂]` using the score `max(lo − y, y − hi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConformalizedQuantileRegression {
    alpha: f64,
    q: f64,
    n: usize,
}

impl ConformalizedQuantileRegression {
    /// # Errors
    /// `EmptyCalibration`, `LengthMismatch`, `NonFiniteValue`,
    /// `CrossedQuantiles` for `lo > hi`, or `InvalidAlpha`.
    pub fn calibrate(y: &[f64], lo: &[f64], hi: &[f64], alpha: f64) -> ConformalResult<Self> {
        validate_alpha(alpha)?;
        if y.is_empty() {
            return Err(ConformalError::EmptyCalibration);
        }
        validate_len("lower", y.len(), lo.len())?;
        validate_len("upper", y.len(), hi.len())?;
        validate_finite("y_true", y)?;
        validate_finite("lower", lo)?;
        validate_finite("upper", hi)?;
        if let Some(index) = (0..y.len()).find(|&i| lo[i] > hi[i]) {
            return Err(ConformalError::CrossedQuantiles { index, lower: lo[index], upper: hi[index] });
        }
        let s: Vec<f64> = (0..y.len()).map(|i| scores::quantile_band(y[i], lo[i], hi[i])).collect();
        let q = upper_quantile(&sorted(&s), alpha);
        debug!(n = y.len(), alpha, q, "cqr calibration");
        Ok(Self { alpha, q, n: y.len() })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn quantile(&self) -> f64 {
        self.q
    }

    pub fn n_calibration(&self) -> usize {
        self.n
    }

    /// `[lo − q̂, hi + q̂]`.
    ///
    /// # Errors
    /// `NonFiniteValue` for a non-finite bound, `CrossedQuantiles` for
    /// `lo > hi`.
    pub fn predict(&self, lo: f64, hi: f64) -> ConformalResult<PredictionInterval> {
        validate_finite("lower", &[lo])?;
        validate_finite("upper", &[hi])?;
        if lo > hi {
            return Err(ConformalError::CrossedQuantiles { index: 0, lower: lo, upper: hi });
        }
        Ok(PredictionInterval::new(lo - self.q, hi + self.q))
    }
}
