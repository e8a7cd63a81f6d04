//! Generalized Pareto distribution for threshold excesses.
//!
//! `F(y) = 1 − (1 + ξy/σ)^(−1/ξ)` for `y ≥ 0` with `1 + ξy/σ > 0`, and the
//! exponential limit `1 − e^{−y/σ}` at `ξ = 0`. Below [`XI_ZERO_TOL`] the
//! limit forms are used.
use crate::evt::errors::{EvtError, EvtResult};

/// `|ξ|` below which the exponential limit is used.
pub const XI_ZERO_TOL: f64 = 1e-9;

/// Shape and scale of a GPD.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpdParams {
    pub xi: f64,
    pub sigma: f64,
}

impl GpdParams {
    /// # Errors
    /// [`EvtError::InvalidShape`] for non-finite `ξ`, [`EvtError::InvalidScale`]
    /// unless `σ` is finite and positive.
    pub fn new(xi: f64, sigma: f64) -> EvtResult<Self> {
        if !xi.is_finite() {
            return Err(EvtError::InvalidShape { value: xi });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(EvtError::InvalidScale { value: sigma });
        }
        Ok(Self { xi, sigma })
    }

    /// Finite upper endpoint `σ/(−ξ)` when `ξ < 0`.
    pub fn upper_endpoint(&self) -> Option<f64> {
        (self.xi < 0.0).then(|| self.sigma / -self.xi)
    }

    /// `P(Y > y)`.
    pub fn survival(&self, y: f64) -> f64 {
        if y <= 0.0 {
            return 1.0;
        }
        if self.xi.abs() < XI_ZERO_TOL {
            return (-y / self.sigma).exp();
        }
        let z = 1.0 + self.xi * y / self.sigma;
        if z <= 0.0 { 0.0 } else { z.powf(-1.0 / self.xi) }
    }

    /// Inverse survival: the `y` with `P(Y > y) = s`, for `s ∈ (0, 1]`.
    pub fn inverse_survival(&self, s: f64) -> f64 {
        if self.xi.abs() < XI_ZERO_TOL {
            -self.sigma * s.ln()
        } else {
            self.sigma / self.xi * (s.powf(-self.xi) - 1.0)
        }
    }

    /// Log-density of one excess.
    ///
    /// # Errors
    /// [`EvtError::OutsideSupport`] (reported at `index`) when `y < 0` or
    /// `y` is beyond the upper endpoint.
    pub fn ln_pdf(&self, index: usize, y: f64) -> EvtResult<f64> {
        if y < 0.0 {
            return Err(EvtError::OutsideSupport { index, value: y });
        }
        if self.xi.abs() < XI_ZERO_TOL {
            return Ok(-self.sigma.ln() - y / self.sigma);
        }
        let t = self.xi * y / self.sigma;
        if t <= -1.0 {
            return Err(EvtError::OutsideSupport { index, value: y });
        }
        Ok(-self.sigma.ln() - (1.0 + 1.0 / self.xi) * t.ln_1p())
    }

    /// Log-likelihood of a sample of excesses.
    pub fn log_likelihood(&self, excesses: &[f64]) -> EvtResult<f64> {
        excesses.iter().enumerate().try_fold(0.0, |acc, (i, &y)| Ok(acc + self.ln_pdf(i, y)?))
    }

    /// Score `(∂ℓ/∂ξ, ∂ℓ/∂σ)` of one excess.
    ///
    /// With `u = y/σ` and `t = ξu`:
    ///
    /// - `∂ℓ/∂σ = −1/σ + (1 + ξ)u / (σ(1 + t))`;
    /// - `∂ℓ/∂ξ = u²φ(t) − u/(1 + t)`, `φ(t) = (ln(1 + t) − t/(1 + t))/t²`.
    ///
    /// `φ` switches to its Taylor series near `t = 0`, so the score is
    /// smooth through the exponential case.
    ///
    /// # Errors
    /// [`EvtError::OutsideSupport`] as for [`ln_pdf`](Self::ln_pdf).
    pub fn score(&self, index: usize, y: f64) -> EvtResult<[f64; 2]> {
        let u = y / self.sigma;
        let t = self.xi * u;
        if y < 0.0 || t <= -1.0 {
            return Err(EvtError::OutsideSupport { index, value: y });
        }
        let phi = if t.abs() < 1e-4 {
            0.5 - 2.0 * t / 3.0 + 0.75 * t * t
        } else {
            (t.ln_1p() - t / (1.0 + t)) / (t * t)
        };
        let d_xi = u * u * phi - u / (1.0 + t);
        let d_sigma = (-1.0 + (1.0 + self.xi) * u / (1.0 + t)) / self.sigma;
        Ok([d_xi, d_sigma])
    }

    /// Average [`score`](Self::score) over a sample of excesses.
    ///
    /// # Errors
    /// The first excess outside the support.
    pub fn mean_score(&self, excesses: &[f64]) -> EvtResult<[f64; 2]> {
        let mut total = [0.0, 0.0];
        for (i, &y) in excesses.iter().enumerate() {
            let [d_xi, d_sigma] = self.score(i, y)?;
            total[0] += d_xi;
            total[1] += d_sigma;
        }
        let n = excesses.len().max(1) as f64;
        Ok([total[0] / n, total[1] / n])
    }

    /// Method-of-moments start `ξ = ½(1 − m²/v)`, `σ = ½m(m²/v + 1)`,
    /// with `ξ` clamped to `[−0.5, 0.45]` where the moments exist.
    pub fn method_of_moments(mean: f64, var: f64) -> Self {
        if !(var > 0.0) {
            return Self { xi: 0.0, sigma: mean.max(f64::MIN_POSITIVE) };
        }
        let ratio = mean * mean / var;
        let xi = (0.5 * (1.0 - ratio)).clamp(-0.5, 0.45);
        let sigma = (0.5 * mean * (ratio + 1.0)).max(f64::MIN_POSITIVE);
        Self { xi, sigma }
    }
}
