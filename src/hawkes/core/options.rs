//! hawkes::core::options — fit and simulation settings.
use crate::{
    hawkes::errors::{HawkesError, HawkesResult},
    optimization::loglik_optimizer::{MLEOptions, Tolerances},
};

/// Estimator that produced a [`HawkesFit`](crate::hawkes::HawkesFit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMethod {
    /// L-BFGS maximum likelihood.
    Mle,
    /// Expectation–maximization over latent branching.
    Em,
}

/// EM stopping rule: at most `max_iter` sweeps, stop once every parameter
/// moves by less than `tol` relative to its previous value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmOptions {
    pub max_iter: usize,
    pub tol: f64,
}

impl EmOptions {
    pub fn new(max_iter: usize, tol: f64) -> HawkesResult<Self> {
        if max_iter == 0 {
            return Err(HawkesError::InvalidOptions { reason: "EM max_iter must be positive" });
        }
        if !tol.is_finite() || tol <= 0.0 {
            return Err(HawkesError::InvalidOptions {
                reason: "EM tolerance must be finite and positive",
            });
        }
        Ok(Self { max_iter, tol })
    }
}

impl Default for EmOptions {
    fn default() -> Self {
        Self { max_iter: 500, tol: 1e-6 }
    }
}

/// Options for [`HawkesProcess`](crate::hawkes::HawkesProcess).
///
/// Defaults: L-BFGS with `tol_grad = 1e-6`, `max_iter = 500` (no wall-clock
/// cap) and [`EmOptions::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesOptions {
    pub mle: MLEOptions,
    pub em: EmOptions,
}

impl HawkesOptions {
    pub fn new(mle: MLEOptions, em: EmOptions) -> Self {
        Self { mle, em }
    }
}

impl Default for HawkesOptions {
    fn default() -> Self {
        let tols = Tolerances { max_iter: Some(500), ..Tolerances::default() };
        let mle = MLEOptions { tols, ..MLEOptions::default() };
        Self { mle, em: EmOptions::default() }
    }
}

/// Simulation settings for Ogata thinning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimOpts {
    pub horizon: f64,
    pub seed: u64,
    /// Abort with `SimulationOverflow` past this many events.
    pub max_events: usize,
}

impl SimOpts {
    /// Default cap on simulated events.
    pub const DEFAULT_MAX_EVENTS: usize = 1_000_000;

    pub fn new(horizon: f64, seed: u64) -> HawkesResult<Self> {
        Self::with_max_events(horizon, seed, Self::DEFAULT_MAX_EVENTS)
    }

    /// # Errors
    /// [`HawkesError::InvalidHorizon`] unless `horizon` is finite and > 0;
    /// [`HawkesError::InvalidOptions`] for `max_events == 0`.
    pub fn with_max_events(horizon: f64, seed: u64, max_events: usize) -> HawkesResult<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(HawkesError::InvalidHorizon { value: horizon });
        }
        if max_events == 0 {
            return Err(HawkesError::InvalidOptions { reason: "max_events must be positive" });
        }
        Ok(Self { horizon, seed, max_events })
    }
}
