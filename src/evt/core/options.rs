//! evt::core::options — threshold rules, estimator and bootstrap options.
use crate::{
    evt::errors::{EvtError, EvtResult},
    optimization::loglik_optimizer::MLEOptions,
};

/// How the peaks-over-threshold level `u` is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdRule {
    /// Use `u` as given.
    Fixed(f64),
    /// Empirical `p`-quantile of the losses (linear interpolation).
    Quantile(f64),
    /// Fit the GPD on an evenly spaced quantile grid and take the lowest
    /// threshold whose next `window` shape estimates have the smallest
    /// sample variance (ties go to the lower threshold). Grid points with
    /// fewer than `min_exceedances` exceedances or a failed fit are skipped.
    Stability {
        lower_quantile: f64,
        upper_quantile: f64,
        steps: usize,
        window: usize,
        min_exceedances: usize,
    },
}

impl ThresholdRule {
    /// Stability rule over the 80th to 98th percentiles.
    pub fn stability() -> Self {
        ThresholdRule::Stability {
            lower_quantile: 0.80,
            upper_quantile: 0.98,
            steps: 10,
            window: 3,
            min_exceedances: 20,
        }
    }

    /// # Errors
    /// [`EvtError::InvalidThreshold`], [`EvtError::InvalidQuantile`] or
    /// [`EvtError::InvalidThresholdRule`] for malformed rules.
    pub fn validate(&self) -> EvtResult<()> {
        let check_p = |p: f64| {
            if p > 0.0 && p < 1.0 { Ok(()) } else { Err(EvtError::InvalidQuantile { value: p }) }
        };
        match *self {
            ThresholdRule::Fixed(u) if !u.is_finite() => {
                Err(EvtError::InvalidThreshold { value: u })
            }
            ThresholdRule::Fixed(_) => Ok(()),
            ThresholdRule::Quantile(p) => check_p(p),
            ThresholdRule::Stability { lower_quantile, upper_quantile, steps, window, .. } => {
                check_p(lower_quantile)?;
                check_p(upper_quantile)?;
                if lower_quantile >= upper_quantile {
                    return Err(EvtError::InvalidThresholdRule {
                        reason: "lower_quantile must be below upper_quantile",
                    });
                }
                if window < 2 {
                    return Err(EvtError::InvalidThresholdRule {
                        reason: "window must hold at least 2 grid points",
                    });
                }
                if steps < window {
                    return Err(EvtError::InvalidThresholdRule {
                        reason: "steps must be at least window",
                    });
                }
                Ok(())
            }
        }
    }
}

/// Options for [`TailRiskEstimator`](crate::evt::TailRiskEstimator).
///
/// Defaults: 95th-percentile threshold and the default [`MLEOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvtOptions {
    pub threshold: ThresholdRule,
    pub mle: MLEOptions,
}

impl EvtOptions {
    pub fn new(threshold: ThresholdRule, mle: MLEOptions) -> EvtResult<Self> {
        threshold.validate()?;
        Ok(Self { threshold, mle })
    }
}

impl Default for EvtOptions {
    fn default() -> Self {
        Self { threshold: ThresholdRule::Quantile(0.95), mle: MLEOptions::default() }
    }
}

/// Percentile bootstrap settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapOptions {
    pub replicates: usize,
    /// Two-sided confidence level, e.g. 0.95.
    pub confidence: f64,
    pub seed: u64,
}

impl BootstrapOptions {
    /// # Errors
    /// [`EvtError::InvalidBootstrap`] unless `replicates ≥ 2` and
    /// `0 < confidence < 1`.
    pub fn new(replicates: usize, confidence: f64, seed: u64) -> EvtResult<Self> {
        if replicates < 2 {
            return Err(EvtError::InvalidBootstrap { reason: "need at least 2 replicates" });
        }
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(EvtError::InvalidBootstrap {
                reason: "confidence must lie strictly between 0 and 1",
            });
        }
        Ok(Self { replicates, confidence, seed })
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self { replicates: 200, confidence: 0.95, seed: 0 }
    }
}
