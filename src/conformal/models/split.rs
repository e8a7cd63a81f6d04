//! Split conformal regression.
use tracing::debug;

use crate::conformal::{
    core::{
        CalibrationSet, ConformalOptions, ScoreKind,
        quantile::{lower_quantile, sorted, upper_quantile},
        scores,
        validation::{validate_alpha, validate_finite, validate_scales},
    },
    errors::{ConformalError, ConformalResult},
    models::interval::PredictionInterval,
};

/// Calibrated split conformal regressor.
///
/// Holds `q̂` for the absolute and normalized scores, or `(q̂_lo, q̂_hi)` for
/// the signed score. Immutable; recalibrate to update.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitConformal {
    opts: ConformalOptions,
    q_lo: f64,
    q_hi: f64,
    n: usize,
}

impl SplitConformal {
    /// # Errors
    /// - `InvalidAlpha` for `alpha ∉ (0, 1)`.
    /// - `MissingScales` for the normalized score without scales.
    pub fn calibrate(set: &CalibrationSet, opts: ConformalOptions) -> ConformalResult<Self> {
        validate_alpha(opts.alpha)?;
        let pairs = set.y_true().iter().zip(set.y_pred());
        let (q_lo, q_hi) = match opts.score {
            ScoreKind::Absolute => {
                let s: Vec<f64> = pairs.map(|(&y, &p)| scores::absolute(y, p)).collect();
                let q = upper_quantile(&sorted(&s), opts.alpha);
                (-q, q)
            }
            ScoreKind::Signed => {
                let s = sorted(&pairs.map(|(&y, &p)| scores::signed(y, p)).collect::<Vec<_>>());
                let half = 0.5 * opts.alpha;
                (lower_quantile(&s, half), upper_quantile(&s, half))
            }
            ScoreKind::Normalized => {
                let scales = set.scales().ok_or(ConformalError::MissingScales)?;
                let s: Vec<f64> = pairs
                    .zip(scales)
                    .map(|((&y, &p), &sc)| scores::normalized(y, p, sc))
                    .collect();
                let q = upper_quantile(&sorted(&s), opts.alpha);
                (-q, q)
            }
        };
        debug!(n = set.len(), alpha = opts.alpha, score = ?opts.score, q_lo, q_hi, "split conformal");
        Ok(Self { opts, q_lo, q_hi, n: set.len() })
    }

    pub fn options(&self) -> ConformalOptions {
        self.opts
    }

    pub fn n_calibration(&self) -> usize {
        self.n
    }

    /// `q̂` (the upper quantile for the signed score).
    pub fn quantile(&self) -> f64 {
        self.q_hi
    }

    /// `(q̂_lo, q̂_hi)` offsets added to the point prediction.
    pub fn quantiles(&self) -> (f64, f64) {
        (self.q_lo, self.q_hi)
    }

    /// `[ŷ + q̂_lo, ŷ + q̂_hi]`; the normalized score uses a unit scale.
    ///
    /// # Errors
    /// `NonFiniteValue` for a NaN or infinite `y_hat`.
    pub fn predict(&self, y_hat: f64) -> ConformalResult<PredictionInterval> {
        validate_finite("y_hat", &[y_hat])?;
        Ok(self.interval(y_hat))
    }

    /// `[ŷ − q̂·s, ŷ + q̂·s]` for the normalized score; other scores ignore
    /// `scale` after validating it.
    ///
    /// # Errors
    /// `NonFiniteValue` for `y_hat`, `InvalidScale` for `scale`.
    pub fn predict_scaled(&self, y_hat: f64, scale: f64) -> ConformalResult<PredictionInterval> {
        validate_finite("y_hat", &[y_hat])?;
        validate_scales(&[scale])?;
        if self.opts.score != ScoreKind::Normalized {
            return Ok(self.interval(y_hat));
        }
        Ok(PredictionInterval::new(y_hat + self.q_lo * scale, y_hat + self.q_hi * scale))
    }

    /// One interval per point prediction.
    ///
    /// # Errors
    /// `NonFiniteValue` at the first invalid prediction.
    pub fn predict_many(&self, y_hat: &[f64]) -> ConformalResult<Vec<PredictionInterval>> {
        validate_finite("y_hat", y_hat)?;
        Ok(y_hat.iter().map(|&p| self.interval(p)).collect())
    }

    fn interval(&self, y_hat: f64) -> PredictionInterval {
        PredictionInterval::new(y_hat + self.q_lo, y_hat + self.q_hi)
    }
}
