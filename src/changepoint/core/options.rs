//! changepoint::core::options — validated detector configurations.
//!
//! Each config is built through `new(...) -> DetectorResult<Self>` so a
//! detector constructed from it never has to re-check its parameters.
//! [`DetectorConfig`] pairs one algorithm config with a [`ResetPolicy`] and
//! is the value shared by every entity in an
//! [`EntityMonitor`](crate::changepoint::EntityMonitor).
use crate::changepoint::{
    core::validation::{
        require_finite, require_non_negative, require_positive, require_probability,
    },
    errors::{DetectorError, DetectorResult},
};

/// Siegmund's additive correction for the overshoot of a Gaussian CUSUM.
const SIEGMUND_OVERSHOOT: f64 = 1.166;

/// What happens to the running statistics when an alarm fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetPolicy {
    /// Clear statistics immediately and keep monitoring.
    #[default]
    Automatic,
    /// Latch in `Alarmed` until the caller invokes `reset()`.
    Manual,
}

/// Two-sided tabular CUSUM around a target mean.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CusumConfig {
    /// Target (in-control) mean `μ0`.
    pub mu0: f64,
    /// Slack `k`, typically half the shift to detect.
    pub k: f64,
    /// Decision threshold `h`.
    pub h: f64,
}

impl CusumConfig {
    /// # Errors
    /// [`DetectorError::InvalidParameter`] unless `μ0` is finite, `k ≥ 0`
    /// and `h > 0`.
    pub fn new(mu0: f64, k: f64, h: f64) -> DetectorResult<Self> {
        require_finite("mu0", mu0)?;
        require_non_negative("k", k)?;
        require_positive("h", h)?;
        Ok(Self { mu0, k, h })
    }

    /// Siegmund approximation of the in-control average run length of the
    /// two-sided scheme for Gaussian data with standard deviation `sigma`.
    ///
    /// One side has `ARL = (e^{-2Δb} + 2Δb − 1) / (2Δ²)` with `Δ = −k/σ`
    /// and `b = h/σ + 1.166` (`b²` when `k = 0`); the two symmetric sides
    /// combine to half of that.
    pub fn arl0_siegmund(&self, sigma: f64) -> DetectorResult<f64> {
        require_positive("sigma", sigma)?;
        let delta = -self.k / sigma;
        let b = self.h / sigma + SIEGMUND_OVERSHOOT;
        let one_sided = if delta.abs() < 1e-12 {
            b * b
        } else {
            ((-2.0 * delta * b).exp() + 2.0 * delta * b - 1.0) / (2.0 * delta * delta)
        };
        Ok(0.5 * one_sided)
    }
}

/// Noise family of the observations under both SPRT hypotheses.
///
/// The hypothesised values `mu0`/`mu1` of [`SprtConfig`] are the Gaussian
/// mean, the Poisson rate, or the Bernoulli success probability.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseModel {
    Gaussian { sigma: f64 },
    Poisson,
    Bernoulli,
}

impl NoiseModel {
    pub fn family(&self) -> &'static str {
        match self {
            NoiseModel::Gaussian { .. } => "Gaussian",
            NoiseModel::Poisson => "Poisson",
            NoiseModel::Bernoulli => "Bernoulli",
        }
    }

    fn validate_hypothesis(&self, name: &'static str, value: f64) -> DetectorResult<()> {
        match self {
            NoiseModel::Gaussian { .. } => require_finite(name, value),
            NoiseModel::Poisson => require_positive(name, value),
            NoiseModel::Bernoulli => require_probability(name, value),
        }
    }
}

/// Wald's sequential probability ratio test of `H0: mu0` against `H1: mu1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SprtConfig {
    pub mu0: f64,
    pub mu1: f64,
    /// Target type-I error rate.
    pub alpha: f64,
    /// Target type-II error rate.
    pub beta: f64,
    pub noise: NoiseModel,
}

impl SprtConfig {
    /// # Errors
    /// - [`DetectorError::InvalidErrorRates`] unless `0 < α, β < 1` and
    ///   `α + β < 1`.
    /// - [`DetectorError::IdenticalHypotheses`] if `mu0 == mu1`.
    /// - [`DetectorError::InvalidParameter`] for hypotheses or σ outside
    ///   the noise family's domain.
    pub fn new(
        mu0: f64, mu1: f64, alpha: f64, beta: f64, noise: NoiseModel,
    ) -> DetectorResult<Self> {
        let rates_ok = alpha > 0.0 && alpha < 1.0 && beta > 0.0 && beta < 1.0;
        if !rates_ok || alpha + beta >= 1.0 {
            return Err(DetectorError::InvalidErrorRates { alpha, beta });
        }
        if let NoiseModel::Gaussian { sigma } = noise {
            require_positive("sigma", sigma)?;
        }
        noise.validate_hypothesis("mu0", mu0)?;
        noise.validate_hypothesis("mu1", mu1)?;
        if mu0 == mu1 {
            return Err(DetectorError::IdenticalHypotheses { value: mu0 });
        }
        Ok(Self { mu0, mu1, alpha, beta, noise })
    }

    /// Lower boundary `A = ln(β / (1 − α))`.
    pub fn lower_boundary(&self) -> f64 {
        (self.beta / (1.0 - self.alpha)).ln()
    }

    /// Upper boundary `B = ln((1 − β) / α)`.
    pub fn upper_boundary(&self) -> f64 {
        ((1.0 - self.beta) / self.alpha).ln()
    }
}

/// ADWIN2 adaptive windowing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdwinConfig {
    /// Confidence parameter `δ` of the cut bound.
    pub delta: f64,
    /// Buckets kept per row before the two oldest are merged (`M`).
    pub max_buckets: usize,
    /// Smallest sub-window tested on either side of a cut.
    pub min_window: u64,
}

impl AdwinConfig {
    /// # Errors
    /// [`DetectorError::InvalidParameter`] unless `0 < δ < 1`,
    /// `max_buckets ≥ 2` and `min_window ≥ 1`.
    pub fn new(delta: f64, max_buckets: usize, min_window: u64) -> DetectorResult<Self> {
        require_probability("delta", delta)?;
        if max_buckets < 2 {
            return Err(DetectorError::InvalidParameter {
                name: "max_buckets",
                value: max_buckets as f64,
                reason: "Need at least 2 buckets per row.",
            });
        }
        if min_window == 0 {
            return Err(DetectorError::InvalidParameter {
                name: "min_window",
                value: 0.0,
                reason: "Minimum sub-window must hold at least one observation.",
            });
        }
        Ok(Self { delta, max_buckets, min_window })
    }
}

impl Default for AdwinConfig {
    fn default() -> Self {
        Self { delta: 0.002, max_buckets: 5, min_window: 5 }
    }
}

/// Algorithm tag selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectorKind {
    Cusum(CusumConfig),
    Sprt(SprtConfig),
    Adwin(AdwinConfig),
}

/// Full detector configuration: algorithm plus reset policy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    pub kind: DetectorKind,
    pub policy: ResetPolicy,
}

impl DetectorConfig {
    pub fn cusum(cfg: CusumConfig) -> Self {
        Self { kind: DetectorKind::Cusum(cfg), policy: ResetPolicy::default() }
    }

    pub fn sprt(cfg: SprtConfig) -> Self {
        Self { kind: DetectorKind::Sprt(cfg), policy: ResetPolicy::default() }
    }

    pub fn adwin(cfg: AdwinConfig) -> Self {
        Self { kind: DetectorKind::Adwin(cfg), policy: ResetPolicy::default() }
    }

    pub fn with_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }
}
