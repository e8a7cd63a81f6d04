//! HawkesProcess estimator and the fitted HawkesFit.
use ndarray::Array1;
use tracing::{debug, warn};

use crate::{
    hawkes::{
        core::{EventSequence, ExcitationKernel, FitMethod, HawkesOptions},
        errors::{HawkesError, HawkesResult},
        models::{decluster::Declustering, likelihood::HawkesLikelihood, model::HawkesModel},
    },
    inference::{calc_standard_errors, calc_standard_errors_from_value},
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::maximize,
    },
    statistical_tests::KSOutcome,
};

/// Minimum number of events for a fit.
pub const MIN_FIT_EVENTS: usize = 2;

/// Hawkes estimator for a kernel family.
///
/// The kernel passed at construction fixes the family and supplies the
/// starting kernel parameters; the start for `μ` is the event rate scaled
/// by `1 − n` of the template.
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesProcess<K> {
    template: K,
    opts: HawkesOptions,
}

impl<K: ExcitationKernel + 'static> HawkesProcess<K> {
    pub fn new(template: K, opts: HawkesOptions) -> Self {
        Self { template, opts }
    }

    pub fn options(&self) -> &HawkesOptions {
        &self.opts
    }

    pub fn template(&self) -> &K {
        &self.template
    }

    pub(crate) fn check_events(events: &EventSequence) -> HawkesResult<()> {
        if events.len() < MIN_FIT_EVENTS {
            return Err(HawkesError::TooFewEvents { found: events.len(), min: MIN_FIT_EVENTS });
        }
        Ok(())
    }

    /// Maximum-likelihood fit with L-BFGS.
    ///
    /// # Arguments
    /// - `events`: strictly increasing event times on `[0, T]`.
    ///
    /// # Returns
    /// A [`HawkesFit`] in the template's kernel family. Supercritical
    /// estimates are returned with `stable() == false`.
    ///
    /// # Errors
    /// - [`HawkesError::TooFewEvents`] below two events.
    /// - [`HawkesError::FitNotConverged`] when the optimizer stops on a cap.
    /// - [`HawkesError::OptimizationFailed`] for optimizer failures.
    pub fn fit(&self, events: &EventSequence) -> HawkesResult<HawkesFit<K>> {
        Self::check_events(events)?;
        let n0 = self.template.branching_ratio();
        let mu0 = events.rate() * (1.0 - n0).max(0.1);
        let likelihood = HawkesLikelihood::new(HawkesModel::new(mu0, self.template.clone())?);

        let outcome = maximize(&likelihood, likelihood.initial_theta(), events, &self.opts.mle)?;
        if !outcome.converged {
            return Err(HawkesError::FitNotConverged {
                status: outcome.status,
                iterations: outcome.iterations,
            });
        }
        let model = likelihood.model_from_theta(&outcome.theta_hat)?;
        HawkesFit::new(model, events.clone(), FitMethod::Mle, outcome.iterations)
    }
}

/// Fitted Hawkes model with its data and diagnostics.
///
/// `branching_ratio` is always reported; `stable` is `false` when it is at
/// least one, in which case a `warn` event is emitted at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesFit<K> {
    model: HawkesModel<K>,
    events: EventSequence,
    log_likelihood: f64,
    branching_ratio: f64,
    stable: bool,
    method: FitMethod,
    iterations: usize,
}

impl<K: ExcitationKernel> HawkesFit<K> {
    pub(crate) fn new(
        model: HawkesModel<K>, events: EventSequence, method: FitMethod, iterations: usize,
    ) -> HawkesResult<Self> {
        let log_likelihood = model.log_likelihood(&events)?;
        let branching_ratio = model.branching_ratio();
        let stable = branching_ratio < 1.0;
        if !stable {
            warn!(branching_ratio, ?method, "non-stationary Hawkes fit");
        }
        debug!(
            mu = model.mu(),
            kernel = ?model.kernel(),
            branching_ratio,
            log_likelihood,
            iterations,
            events = events.len(),
            "hawkes fit"
        );
        Ok(Self { model, events, log_likelihood, branching_ratio, stable, method, iterations })
    }

    pub fn model(&self) -> &HawkesModel<K> {
        &self.model
    }

    pub fn mu(&self) -> f64 {
        self.model.mu()
    }

    pub fn kernel(&self) -> &K {
        self.model.kernel()
    }

    pub fn events(&self) -> &EventSequence {
        &self.events
    }

    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    pub fn branching_ratio(&self) -> f64 {
        self.branching_ratio
    }

    pub fn stable(&self) -> bool {
        self.stable
    }

    pub fn method(&self) -> FitMethod {
        self.method
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn stationary_intensity(&self) -> Option<f64> {
        self.model.stationary_intensity()
    }

    pub fn expected_count(&self, horizon: f64) -> Option<f64> {
        self.model.expected_count(horizon)
    }

    /// `λ(t)` given the fitted events.
    pub fn intensity(&self, t: f64) -> f64 {
        self.model.intensity(&self.events, t)
    }

    /// `Λ(t)` given the fitted events.
    pub fn compensator(&self, t: f64) -> f64 {
        self.model.compensator(&self.events, t)
    }

    pub fn residuals(&self) -> Vec<f64> {
        self.model.residuals(&self.events)
    }

    pub fn residual_gaps(&self) -> Vec<f64> {
        self.model.residual_gaps(&self.events)
    }

    /// Time-rescaling test: KS of the residual gaps against Exp(1).
    ///
    /// # Returns
    /// The [`KSOutcome`]; a small p-value rejects the fitted model.
    ///
    /// # Errors
    /// [`HawkesError::GoodnessOfFit`] for an empty sequence.
    pub fn goodness_of_fit(&self) -> HawkesResult<KSOutcome> {
        self.model.goodness_of_fit(&self.events)
    }

    pub fn decluster(&self) -> Declustering {
        self.model.decluster(&self.events)
    }

    /// Standard errors of `[μ, kernel params...]` (see
    /// [`HawkesModel::param_names`]) from the observed information.
    ///
    /// Kernels with a closed-form score use the Jacobian of the mean score
    /// ([`HawkesModel::score`]); the others fall back to a second-order
    /// stencil on the log-likelihood.
    ///
    /// # Returns
    /// One standard error per natural parameter.
    ///
    /// # Errors
    /// [`HawkesError::OptimizationFailed`] when the Hessian cannot be formed,
    /// e.g. a finite-difference step leaves the parameter domain.
    pub fn standard_errors(&self) -> HawkesResult<Array1<f64>> {
        let theta_hat = Array1::from(self.model.params());
        let n = self.events.len();
        if self.model.score(&self.events)?.is_some() {
            let score_mean = |theta: &Array1<f64>| -> OptResult<Array1<f64>> {
                let model = self.model.with_params(&theta.to_vec())?;
                let score = model.score(&self.events)?.ok_or(OptError::GradientNotImplemented)?;
                Ok(score.into_iter().map(|s| s / n.max(1) as f64).collect())
            };
            return Ok(calc_standard_errors(&score_mean, &theta_hat, n)?);
        }
        let loglik = |theta: &Array1<f64>| {
            self.model
                .with_params(&theta.to_vec())
                .and_then(|m| m.log_likelihood(&self.events))
                .map_err(OptError::from)
        };
        Ok(calc_standard_errors_from_value(&loglik, &theta_hat)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hawkes::core::ExponentialKernel;

    #[test]
    // Purpose
    // -------
    // A supercritical model is flagged unstable but still reported.
    //
    // Given
    // -----
    // - μ = 0.5, α = 1.5, β = 1 and a short event sequence.
    //
    // Expect
    // ------
    // - branching_ratio 1.5, stable false, no stationary intensity.
    fn supercritical_fit_is_flagged() {
        let model = HawkesModel::new(0.5, ExponentialKernel::new(1.5, 1.0).unwrap()).unwrap();
        let events = EventSequence::new(vec![0.2, 0.3, 0.9, 1.0, 1.1], 2.0).unwrap();

        let fit = HawkesFit::new(model, events, FitMethod::Mle, 0).unwrap();

        assert_eq!(fit.branching_ratio(), 1.5);
        assert!(!fit.stable());
        assert_eq!(fit.stationary_intensity(), None);
    }

    #[test]
    // Purpose
    // -------
    // Fits need at least two events.
    //
    // Given
    // -----
    // - A single event.
    //
    // Expect
    // ------
    // - `TooFewEvents { found: 1, min: 2 }`.
    fn fit_requires_two_events() {
        let process = HawkesProcess::new(
            ExponentialKernel::new(0.5, 1.0).unwrap(),
            HawkesOptions::default(),
        );
        let events = EventSequence::new(vec![1.0], 2.0).unwrap();

        assert_eq!(process.fit(&events), Err(HawkesError::TooFewEvents { found: 1, min: 2 }));
    }
}
