//! Validated loss samples and threshold exceedances.
use crate::evt::errors::{EvtError, EvtResult};

/// Reject empty samples and non-finite losses.
pub fn validate_losses(losses: &[f64]) -> EvtResult<()> {
    if losses.is_empty() {
        return Err(EvtError::EmptySample);
    }
    if let Some((index, &value)) = losses.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(EvtError::NonFiniteLoss { index, value });
    }
    Ok(())
}

/// Excesses `y = x − u > 0` of the losses strictly above `u`.
///
/// Keeps the total sample size `n` so tail probabilities can be scaled by
/// the exceedance rate `n_u / n`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exceedances {
    threshold: f64,
    excesses: Vec<f64>,
    n: usize,
}

impl Exceedances {
    /// # Errors
    /// - [`EvtError::InvalidThreshold`] for a non-finite `u`.
    /// - [`EvtError::InsufficientExceedances`] when fewer than two losses
    ///   exceed `u`.
    pub fn new(losses: &[f64], threshold: f64) -> EvtResult<Self> {
        if !threshold.is_finite() {
            return Err(EvtError::InvalidThreshold { value: threshold });
        }
        let excesses: Vec<f64> =
            losses.iter().filter(|&&x| x > threshold).map(|&x| x - threshold).collect();
        Self::from_excesses(excesses, threshold, losses.len())
    }

    /// Build directly from excesses, e.g. a bootstrap resample.
    pub fn from_excesses(excesses: Vec<f64>, threshold: f64, n: usize) -> EvtResult<Self> {
        if excesses.len() < 2 {
            return Err(EvtError::InsufficientExceedances { threshold, found: excesses.len() });
        }
        Ok(Self { threshold, excesses, n })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn excesses(&self) -> &[f64] {
        &self.excesses
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn n_exceed(&self) -> usize {
        self.excesses.len()
    }

    pub fn max_excess(&self) -> f64 {
        self.excesses.iter().copied().fold(0.0, f64::max)
    }

    /// Sample mean and unbiased variance of the excesses.
    pub fn moments(&self) -> (f64, f64) {
        let k = self.excesses.len() as f64;
        let mean = self.excesses.iter().sum::<f64>() / k;
        let var = self.excesses.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / (k - 1.0);
        (mean, var)
    }
}
