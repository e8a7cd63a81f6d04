//! One-sample Kolmogorov–Smirnov goodness-of-fit test.
//!
//! Given a sample `x₁..xₙ` and a continuous reference CDF `F`, the statistic
//! is `Dₙ = supₓ |Fₙ(x) − F(x)|`. The p-value uses the asymptotic Kolmogorov
//! distribution with Stephens' small-sample correction
//! `λ = (√n + 0.12 + 0.11/√n)·Dₙ`, `Q(λ) = 2 Σ_{k≥1} (−1)^{k−1} e^{−2k²λ²}`.
//!
//! The Hawkes module uses [`KSOutcome::unit_exponential`] on compensator
//! residual gaps, which are i.i.d. Exp(1) under a correctly specified model.
use crate::statistical_tests::errors::{KSError, KSResult};
use crate::statistical_tests::validation::validate_input;
use statrs::distribution::{ContinuousCDF, Exp};

const MAX_SERIES_TERMS: usize = 100;

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KSOutcome {
    n: usize,
    stat: f64,
    p_value: f64,
}

impl KSOutcome {
    /// Test `data` against the continuous distribution `dist`.
    ///
    /// # Errors
    /// [`KSError::InsufficientData`] for an empty sample and
    /// [`KSError::InvalidData`] for non-finite values.
    pub fn one_sample<D: ContinuousCDF<f64, f64>>(data: &[f64], dist: &D) -> KSResult<Self> {
        validate_input(data)?;
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let nf = n as f64;
        let stat = sorted.iter().enumerate().fold(0.0_f64, |d, (i, &x)| {
            let f = dist.cdf(x);
            let above = (i + 1) as f64 / nf - f;
            let below = f - i as f64 / nf;
            d.max(above).max(below)
        });
        let sqrt_n = nf.sqrt();
        let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * stat;
        Ok(Self { n, stat, p_value: kolmogorov_survival(lambda) })
    }

    /// Test `data` against Exp(1).
    pub fn unit_exponential(data: &[f64]) -> KSResult<Self> {
        let dist = Exp::new(1.0).map_err(|e| KSError::InvalidDistribution(e.to_string()))?;
        Self::one_sample(data, &dist)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Statistic `Dₙ`.
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// Asymptotic p-value of [`stat`](Self::stat).
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// `true` when the null is rejected at level `alpha`.
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// `P(K > λ)` for the Kolmogorov distribution, clamped to `[0, 1]`.
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=MAX_SERIES_TERMS {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * lambda * lambda).exp();
        sum += sign * term;
        if term < 1e-16 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}
