//! TailRiskEstimator and the fitted TailModel.
use tracing::{debug, warn};

use crate::{
    evt::{
        core::{
            EvtOptions, Exceedances, GpdParams, ThresholdRule, empirical_quantile,
            sorted_quantile, threshold::{most_stable_window, quantile_grid},
            validate_losses,
        },
        errors::{EvtError, EvtResult},
        models::fit::{GpdFit, fit_gpd},
    },
    inference::calc_standard_errors,
    optimization::{errors::OptError, loglik_optimizer::MLEOptions},
};

/// Peaks-over-threshold estimator: picks `u` by its [`ThresholdRule`] and
/// fits a GPD to the excesses by maximum likelihood.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TailRiskEstimator {
    opts: EvtOptions,
}

impl TailRiskEstimator {
    /// # Errors
    /// Propagates [`ThresholdRule::validate`].
    pub fn new(opts: EvtOptions) -> EvtResult<Self> {
        opts.threshold.validate()?;
        Ok(Self { opts })
    }

    pub fn options(&self) -> &EvtOptions {
        &self.opts
    }

    /// Choose the threshold by the configured rule and fit.
    ///
    /// # Arguments
    /// - `losses`: the full loss sample, positive values in the right tail.
    ///
    /// # Returns
    /// A [`TailModel`] holding the chosen threshold, its excesses and the
    /// fitted GPD.
    ///
    /// # Errors
    /// - [`EvtError::EmptySample`] / [`EvtError::NonFiniteLoss`] for bad input.
    /// - [`EvtError::InsufficientExceedances`] when fewer than two losses
    ///   exceed `u`.
    /// - [`EvtError::NoStableThreshold`] when the stability grid has fewer
    ///   successful fits than its window.
    /// - [`EvtError::FitNotConverged`] / [`EvtError::OptimizationFailed`]
    ///   from the optimizer.
    pub fn fit(&self, losses: &[f64]) -> EvtResult<TailModel> {
        validate_losses(losses)?;
        match self.opts.threshold {
            ThresholdRule::Fixed(u) => self.fit_with_threshold(losses, u),
            ThresholdRule::Quantile(p) => {
                let u = empirical_quantile(losses, p)?;
                self.fit_with_threshold(losses, u)
            }
            ThresholdRule::Stability {
                lower_quantile,
                upper_quantile,
                steps,
                window,
                min_exceedances,
            } => {
                let mut sorted = losses.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mut candidates: Vec<(Exceedances, GpdFit)> = Vec::with_capacity(steps);
                for p in quantile_grid(lower_quantile, upper_quantile, steps) {
                    let u = sorted_quantile(&sorted, p);
                    let exceedances = match Exceedances::new(losses, u) {
                        Ok(exc) if exc.n_exceed() >= min_exceedances => exc,
                        Ok(exc) => {
                            warn!(threshold = u, n_exceed = exc.n_exceed(), "too few exceedances");
                            continue;
                        }
                        Err(err) => {
                            warn!(threshold = u, %err, "skipping threshold");
                            continue;
                        }
                    };
                    match fit_gpd(&exceedances, &self.opts.mle) {
                        Ok(fit) => candidates.push((exceedances, fit)),
                        Err(err) => warn!(threshold = u, %err, "gpd fit failed"),
                    }
                }
                let shapes: Vec<f64> = candidates.iter().map(|(_, fit)| fit.params.xi).collect();
                let start = most_stable_window(&shapes, window).ok_or(
                    EvtError::NoStableThreshold { fitted: candidates.len(), window },
                )?;
                let (exceedances, fit) = candidates.swap_remove(start);
                debug!(threshold = exceedances.threshold(), fitted = shapes.len(), "stable threshold");
                Ok(TailModel::from_fit(exceedances, fit, self.opts.mle.clone()))
            }
        }
    }

    /// Fit the excesses over a caller-chosen threshold `u`.
    ///
    /// # Arguments
    /// - `losses`: the full loss sample.
    /// - `u`: threshold; losses strictly above it are the exceedances.
    ///
    /// # Returns
    /// The fitted [`TailModel`] at `u`.
    ///
    /// # Errors
    /// - [`EvtError::EmptySample`] / [`EvtError::NonFiniteLoss`] for bad input.
    /// - [`EvtError::InvalidThreshold`] for a non-finite `u`.
    /// - [`EvtError::InsufficientExceedances`] below two exceedances.
    /// - [`EvtError::FitNotConverged`] / [`EvtError::OptimizationFailed`]
    ///   from the optimizer.
    pub fn fit_with_threshold(&self, losses: &[f64], u: f64) -> EvtResult<TailModel> {
        validate_losses(losses)?;
        let exceedances = Exceedances::new(losses, u)?;
        let fit = fit_gpd(&exceedances, &self.opts.mle)?;
        Ok(TailModel::from_fit(exceedances, fit, self.opts.mle.clone()))
    }
}

/// Point summary of a tail model at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TailMetrics {
    pub xi: f64,
    pub sigma: f64,
    pub threshold: f64,
    pub n: usize,
    pub n_exceed: usize,
    pub p: f64,
    pub var: f64,
    /// `None` when `ξ ≥ 1`.
    pub es: Option<f64>,
}

/// Standard errors of the GPD parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpdStandardErrors {
    pub xi: f64,
    pub sigma: f64,
}

/// Fitted peaks-over-threshold model `(u, ξ, σ, n, n_u)`.
///
/// Immutable; queries are O(1). Probabilities below `1 − n_u/n` fall
/// outside the modeled tail and are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct TailModel {
    params: GpdParams,
    exceedances: Exceedances,
    log_likelihood: f64,
    iterations: usize,
    mle: MLEOptions,
}

impl TailModel {
    pub(crate) fn from_fit(exceedances: Exceedances, fit: GpdFit, mle: MLEOptions) -> Self {
        Self {
            params: fit.params,
            exceedances,
            log_likelihood: fit.log_likelihood,
            iterations: fit.iterations,
            mle,
        }
    }

    pub fn xi(&self) -> f64 {
        self.params.xi
    }

    pub fn sigma(&self) -> f64 {
        self.params.sigma
    }

    pub fn params(&self) -> GpdParams {
        self.params
    }

    pub fn threshold(&self) -> f64 {
        self.exceedances.threshold()
    }

    pub fn n(&self) -> usize {
        self.exceedances.n()
    }

    pub fn n_exceed(&self) -> usize {
        self.exceedances.n_exceed()
    }

    pub fn exceedances(&self) -> &Exceedances {
        &self.exceedances
    }

    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub(crate) fn mle_options(&self) -> &MLEOptions {
        &self.mle
    }

    /// Exceedance rate `n_u / n`.
    pub fn exceedance_rate(&self) -> f64 {
        self.n_exceed() as f64 / self.n() as f64
    }

    /// Loss level exceeded with probability `1 − p`.
    ///
    /// # Arguments
    /// - `p`: confidence level, e.g. `0.99`.
    ///
    /// # Returns
    /// `u + (σ/ξ)(((1 − p)/ζ)^{−ξ} − 1)` with `ζ = n_u/n` (the log form at
    /// `ξ = 0`).
    ///
    /// # Errors
    /// - [`EvtError::InvalidProbability`] for `p ∉ (0, 1)`.
    /// - [`EvtError::ProbabilityBelowThreshold`] for `p < 1 − n_u/n`.
    pub fn value_at_risk(&self, p: f64) -> EvtResult<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(EvtError::InvalidProbability { p });
        }
        let rate = self.exceedance_rate();
        let min = 1.0 - rate;
        if p < min {
            return Err(EvtError::ProbabilityBelowThreshold { p, min });
        }
        Ok(self.threshold() + self.params.inverse_survival((1.0 - p) / rate))
    }

    /// Mean loss beyond `VaR_p`.
    ///
    /// # Errors
    /// [`EvtError::UndefinedExpectedShortfall`] when `ξ ≥ 1`, otherwise as
    /// [`value_at_risk`](Self::value_at_risk).
    pub fn expected_shortfall(&self, p: f64) -> EvtResult<f64> {
        let xi = self.params.xi;
        if xi >= 1.0 {
            return Err(EvtError::UndefinedExpectedShortfall { xi });
        }
        let var = self.value_at_risk(p)?;
        Ok(var / (1.0 - xi) + (self.params.sigma - xi * self.threshold()) / (1.0 - xi))
    }

    /// `P(X > x)` for `x` above the threshold; `None` at or below it.
    pub fn tail_probability(&self, x: f64) -> Option<f64> {
        let u = self.threshold();
        (x > u).then(|| self.exceedance_rate() * self.params.survival(x - u))
    }

    /// Mean excess `E[X − x | X > x] = (σ + ξ(x − u))/(1 − ξ)` for `x ≥ u`.
    ///
    /// `None` below the threshold or when `ξ ≥ 1`; zero past a finite
    /// upper endpoint.
    pub fn mean_excess(&self, x: f64) -> Option<f64> {
        let (xi, sigma) = (self.params.xi, self.params.sigma);
        let y = x - self.threshold();
        if y < 0.0 || xi >= 1.0 {
            return None;
        }
        Some(((sigma + xi * y) / (1.0 - xi)).max(0.0))
    }

    /// All point metrics at level `p`.
    ///
    /// # Returns
    /// [`TailMetrics`] with `es: None` when the shortfall is undefined.
    ///
    /// # Errors
    /// As [`value_at_risk`](Self::value_at_risk).
    pub fn metrics(&self, p: f64) -> EvtResult<TailMetrics> {
        let var = self.value_at_risk(p)?;
        let es = match self.expected_shortfall(p) {
            Ok(es) => Some(es),
            Err(EvtError::UndefinedExpectedShortfall { .. }) => None,
            Err(err) => return Err(err),
        };
        Ok(TailMetrics {
            xi: self.xi(),
            sigma: self.sigma(),
            threshold: self.threshold(),
            n: self.n(),
            n_exceed: self.n_exceed(),
            p,
            var,
            es,
        })
    }

    /// Standard errors of `(ξ, σ)` from the observed information at the MLE.
    ///
    /// The information is the Jacobian of the analytic mean score
    /// ([`GpdParams::mean_score`]) scaled by the number of excesses, so
    /// for a well-specified fit `SE(ξ̂) ≈ (1 + ξ)/√n_u`.
    ///
    /// # Returns
    /// [`GpdStandardErrors`] on the natural `(ξ, σ)` scale.
    ///
    /// # Errors
    /// [`EvtError::OptimizationFailed`] when the Hessian cannot be formed,
    /// e.g. a finite-difference step leaves the support.
    pub fn standard_errors(&self) -> EvtResult<GpdStandardErrors> {
        let excesses = self.exceedances.excesses();
        let score = |theta: &ndarray::Array1<f64>| {
            GpdParams::new(theta[0], theta[1])
                .and_then(|p| p.mean_score(excesses))
                .map(|[d_xi, d_sigma]| ndarray::array![d_xi, d_sigma])
                .map_err(OptError::from)
        };
        let theta_hat = ndarray::array![self.params.xi, self.params.sigma];
        let se = calc_standard_errors(&score, &theta_hat, excesses.len())?;
        Ok(GpdStandardErrors { xi: se[0], sigma: se[1] })
    }
}
