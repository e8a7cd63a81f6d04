//! Expectation–maximization for the exponential-kernel Hawkes process.
//!
//! Writing `g(t) = nβe^{−βt}`, each event is either background or the
//! child of one earlier event. The E-step computes the soft branching
//! probabilities
//!
//! - `p_ii = μ/λ(t_i)` (background),
//! - `p_ij = nβe^{−β(t_i − t_j)}/λ(t_i)` for `j < i`,
//!
//! and the M-step updates, with the boundary terms of the finite window
//! `[0, T]`,
//!
//! - `μ = Σ p_ii / T`,
//! - `n = Σ p_ij / Σ_j (1 − e^{−β(T − t_j)})`,
//! - `β = Σ p_ij / (Σ p_ij (t_i − t_j) + n Σ_j (T − t_j) e^{−β(T − t_j)})`.
//!
//! Parent sums skip lags with `β(t_i − t_j) > MAX_DECAY`.
use tracing::debug;

use crate::hawkes::{
    core::{EventSequence, ExcitationKernel, ExponentialKernel, FitMethod},
    errors::{HawkesError, HawkesResult},
    models::{
        model::HawkesModel,
        process::{HawkesFit, HawkesProcess},
    },
};

/// Lags beyond `MAX_DECAY/β` contribute less than `e^{−50}`.
const MAX_DECAY: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct EmState {
    mu: f64,
    n: f64,
    beta: f64,
}

impl EmState {
    fn max_relative_change(&self, other: &EmState) -> f64 {
        [(self.mu, other.mu), (self.n, other.n), (self.beta, other.beta)]
            .into_iter()
            .map(|(old, new)| (new - old).abs() / old.abs().max(f64::MIN_POSITIVE))
            .fold(0.0, f64::max)
    }
}

fn em_step(state: &EmState, times: &[f64], horizon: f64) -> EmState {
    let EmState { mu, n, beta } = *state;
    let mut background = 0.0;
    let mut offspring = 0.0;
    let mut offspring_lag = 0.0;

    for (i, &ti) in times.iter().enumerate() {
        let mut lambda = mu;
        let mut weight = 0.0;
        let mut weighted_lag = 0.0;
        for &tj in times[..i].iter().rev() {
            let lag = ti - tj;
            if beta * lag > MAX_DECAY {
                break;
            }
            let g = n * beta * (-beta * lag).exp();
            lambda += g;
            weight += g;
            weighted_lag += g * lag;
        }
        background += mu / lambda;
        offspring += weight / lambda;
        offspring_lag += weighted_lag / lambda;
    }

    let mut mass = 0.0;
    let mut boundary_lag = 0.0;
    for &tj in times {
        let rest = horizon - tj;
        let decay = (-beta * rest).exp();
        mass += 1.0 - decay;
        boundary_lag += rest * decay;
    }

    let next_n = if mass > 0.0 { offspring / mass } else { 0.0 };
    let denom = offspring_lag + n * boundary_lag;
    let next_beta = if offspring > 0.0 && denom > 0.0 { offspring / denom } else { beta };
    EmState { mu: background / horizon, n: next_n, beta: next_beta }
}

impl HawkesProcess<ExponentialKernel> {
    /// EM fit of `(μ, α, β)` from the template's `β` and branching ratio
    /// (clamped to `[0.05, 0.9]`).
    ///
    /// # Arguments
    /// - `events`: strictly increasing event times on `[0, T]`.
    ///
    /// # Returns
    /// A [`HawkesFit`] with method [`FitMethod::Em`] and the number of
    /// sweeps used.
    ///
    /// # Errors
    /// - [`HawkesError::TooFewEvents`] below two events.
    /// - [`HawkesError::FitNotConverged`] after `max_iter` sweeps without
    ///   meeting the relative tolerance.
    pub fn fit_em(&self, events: &EventSequence) -> HawkesResult<HawkesFit<ExponentialKernel>> {
        Self::check_events(events)?;
        let em = self.options().em;
        let times = events.times();
        let horizon = events.horizon();
        let n0 = self.template().branching_ratio().clamp(0.05, 0.9);
        let mut state = EmState { mu: events.rate() * (1.0 - n0), n: n0, beta: self.template().beta };

        for iteration in 1..=em.max_iter {
            let next = em_step(&state, times, horizon);
            let change = state.max_relative_change(&next);
            state = next;
            if change < em.tol {
                debug!(iteration, change, "em converged");
                let kernel = ExponentialKernel::new(state.n * state.beta, state.beta)?;
                let model = HawkesModel::new(state.mu, kernel)?;
                return HawkesFit::new(model, events.clone(), FitMethod::Em, iteration);
            }
        }
        Err(HawkesError::FitNotConverged {
            status: "EM reached max_iter".to_string(),
            iterations: em.max_iter,
        })
    }
}
