//! Split conformal classification with the `1 − p̂(y | x)` score.
use tracing::debug;

use crate::conformal::{
    core::{
        quantile::{sorted, upper_quantile},
        scores,
        validation::{validate_alpha, validate_probabilities},
    },
    errors::{ConformalError, ConformalResult},
    models::interval::PredictionSet,
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConformalClassifier {
    alpha: f64,
    q: f64,
    n: usize,
}

impl ConformalClassifier {
    /// Calibrate from the predicted probability of each example's true
    /// label.
    ///
    /// # Errors
    /// `EmptyCalibration`, `InvalidProbability` or `InvalidAlpha`.
    pub fn calibrate(probabilities_of_true_label: &[f64], alpha: f64) -> ConformalResult<Self> {
        validate_alpha(alpha)?;
        if probabilities_of_true_label.is_empty() {
            return Err(ConformalError::EmptyCalibration);
        }
        validate_probabilities(probabilities_of_true_label)?;
        let s: Vec<f64> =
            probabilities_of_true_label.iter().map(|&p| scores::classification(p)).collect();
        let q = upper_quantile(&sorted(&s), alpha);
        debug!(n = s.len(), alpha, q, "conformal classifier");
        Ok(Self { alpha, q, n: s.len() })
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

    /// Labels `c` with `1 − p̂(c | x) ≤ q̂`, in index order.
    pub fn predict_set(&self, probabilities: &[f64]) -> ConformalResult<PredictionSet> {
        validate_probabilities(probabilities)?;
        let labels = probabilities
            .iter()
            .enumerate()
            .filter(|&(_, &p)| scores::classification(p) <= self.q)
            .map(|(c, _)| c)
            .collect();
        Ok(PredictionSet { labels })
    }
}
