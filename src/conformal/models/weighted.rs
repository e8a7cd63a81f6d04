//! Weighted split conformal prediction under covariate shift.
//!
//! Calibration scores carry likelihood-ratio weights `w_i`; the test point
//! brings its own weight `w_{n+1}`, placed at `+∞`. The interval half-width
//! is the smallest score whose normalized cumulative weight reaches `1 − α`.
use crate::conformal::{
    core::{
        CalibrationSet,
        quantile::weighted_upper_quantile,
        scores,
        validation::{validate_alpha, validate_finite, validate_len, validate_weights},
    },
    errors::{ConformalError, ConformalResult},
    models::interval::PredictionInterval,
};

/// Absolute-score conformal predictor with per-example weights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedConformal {
    alpha: f64,
    /// `(score, weight)` sorted by score.
    pairs: Vec<(f64, f64)>,
}

impl WeightedConformal {
    /// # Errors
    /// `InvalidAlpha`, `LengthMismatch`, or `InvalidWeight` for negative or
    /// non-finite weights.
    pub fn calibrate(set: &CalibrationSet, weights: &[f64], alpha: f64) -> ConformalResult<Self> {
        validate_alpha(alpha)?;
        validate_len("weights", set.len(), weights.len())?;
        validate_weights(weights)?;
        let mut pairs: Vec<(f64, f64)> = set
            .y_true()
            .iter()
            .zip(set.y_pred())
            .zip(weights)
            .map(|((&y, &p), &w)| (scores::absolute(y, p), w))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { alpha, pairs })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Half-width for a test point of weight `test_weight`.
    pub fn quantile(&self, test_weight: f64) -> ConformalResult<f64> {
        if !(test_weight.is_finite() && test_weight >= 0.0) {
            return Err(ConformalError::InvalidWeight { index: self.pairs.len(), value: test_weight });
        }
        Ok(weighted_upper_quantile(&self.pairs, test_weight, self.alpha))
    }

    /// `[ŷ − q̂, ŷ + q̂]` with `q̂ = quantile(test_weight)`.
    ///
    /// # Errors
    /// `NonFiniteValue` for `y_hat`, `InvalidWeight` for `test_weight`.
    pub fn predict(&self, y_hat: f64, test_weight: f64) -> ConformalResult<PredictionInterval> {
        validate_finite("y_hat", &[y_hat])?;
        let q = self.quantile(test_weight)?;
        Ok(PredictionInterval::new(y_hat - q, y_hat + q))
    }
}
