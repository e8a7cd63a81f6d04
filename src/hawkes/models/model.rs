//! Parametrized Hawkes model: intensity, compensator, likelihood and
//! time-rescaled residuals.
//!
//! Conventions
//! -----------
//! - The intensity is left-continuous: `λ(t) = μ + Σ_{t_i < t} g(t − t_i)`.
//! - `Λ(t) = μt + Σ_{t_i < t} G(t − t_i)` is the compensator, so residuals
//!   `τ_i = Λ(t_i)` form a unit-rate Poisson process under the true model.
use crate::{
    hawkes::{
        core::{EventSequence, ExcitationKernel},
        errors::{HawkesError, HawkesResult},
    },
    statistical_tests::KSOutcome,
};

/// Background rate `μ` plus an excitation kernel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HawkesModel<K> {
    mu: f64,
    kernel: K,
}

impl<K: ExcitationKernel> HawkesModel<K> {
    /// # Errors
    /// [`HawkesError::InvalidParameter`] unless `μ` is finite and positive.
    pub fn new(mu: f64, kernel: K) -> HawkesResult<Self> {
        if !mu.is_finite() || mu <= 0.0 {
            return Err(HawkesError::InvalidParameter {
                name: "mu",
                value: mu,
                reason: "must be finite and strictly positive",
            });
        }
        Ok(Self { mu, kernel })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// `[μ, kernel params...]`.
    pub fn params(&self) -> Vec<f64> {
        let mut out = vec![self.mu];
        out.extend(self.kernel.params());
        out
    }

    pub fn param_names(&self) -> Vec<&'static str> {
        let mut out = vec!["mu"];
        out.extend_from_slice(self.kernel.param_names());
        out
    }

    /// Rebuild from `[μ, kernel params...]`.
    pub fn with_params(&self, params: &[f64]) -> HawkesResult<Self> {
        let expected = 1 + self.kernel.params().len();
        if params.len() != expected {
            return Err(HawkesError::ThetaLengthMismatch { expected, actual: params.len() });
        }
        Self::new(params[0], self.kernel.with_params(&params[1..])?)
    }

    pub fn branching_ratio(&self) -> f64 {
        self.kernel.branching_ratio()
    }

    pub fn is_stable(&self) -> bool {
        self.branching_ratio() < 1.0
    }

    /// Long-run event rate `μ/(1 − n)`; `None` when `n ≥ 1`.
    pub fn stationary_intensity(&self) -> Option<f64> {
        self.is_stable().then(|| self.mu / (1.0 - self.branching_ratio()))
    }

    /// Expected number of events on a window of length `horizon` under the
    /// stationary regime; `None` when `n ≥ 1`.
    pub fn expected_count(&self, horizon: f64) -> Option<f64> {
        self.stationary_intensity().map(|rate| rate * horizon)
    }

    /// `λ(t)` given the history in `events`.
    pub fn intensity(&self, events: &EventSequence, t: f64) -> f64 {
        self.mu + events.before(t).iter().map(|&s| self.kernel.value(t - s)).sum::<f64>()
    }

    /// `Λ(t)` given the history in `events`.
    pub fn compensator(&self, events: &EventSequence, t: f64) -> f64 {
        self.mu * t + events.before(t).iter().map(|&s| self.kernel.integral(t - s)).sum::<f64>()
    }

    /// `Σ log λ(t_i) − Λ(T)`.
    ///
    /// # Arguments
    /// - `events`: the observed sequence; its horizon is `T`.
    ///
    /// # Returns
    /// The total log-likelihood.
    ///
    /// # Errors
    /// [`HawkesError::NonPositiveIntensity`] at the first event whose
    /// intensity is not positive.
    pub fn log_likelihood(&self, events: &EventSequence) -> HawkesResult<f64> {
        let times = events.times();
        let horizon = events.horizon();
        let mut log_sum = 0.0;
        for (index, ex) in self.kernel.excitations(times).into_iter().enumerate() {
            let lambda = self.mu + ex;
            if !(lambda > 0.0) {
                return Err(HawkesError::NonPositiveIntensity { index, value: lambda });
            }
            log_sum += lambda.ln();
        }
        let compensator = self.mu * horizon
            + times.iter().map(|&t| self.kernel.integral(horizon - t)).sum::<f64>();
        Ok(log_sum - compensator)
    }

    /// Score `∇ℓ` in the natural parameters `[μ, kernel params...]`.
    ///
    /// `∂ℓ/∂μ = Σ 1/λ_i − T` and, for a kernel parameter `p`,
    /// `∂ℓ/∂p = Σ (∂e_i/∂p)/λ_i − Σ ∂G(T − t_i)/∂p`.
    ///
    /// # Returns
    /// `Ok(None)` when the kernel has no closed-form derivatives.
    ///
    /// # Errors
    /// [`HawkesError::NonPositiveIntensity`] as for
    /// [`log_likelihood`](Self::log_likelihood).
    pub fn score(&self, events: &EventSequence) -> HawkesResult<Option<Vec<f64>>> {
        let times = events.times();
        let horizon = events.horizon();
        let Some(ex_grads) = self.kernel.excitation_gradients(times) else {
            return Ok(None);
        };
        let mut score = vec![0.0; 1 + self.kernel.params().len()];
        let excitations = self.kernel.excitations(times);
        for (index, (ex, grad)) in excitations.into_iter().zip(&ex_grads).enumerate() {
            let lambda = self.mu + ex;
            if !(lambda > 0.0) {
                return Err(HawkesError::NonPositiveIntensity { index, value: lambda });
            }
            score[0] += 1.0 / lambda;
            for (s, g) in score[1..].iter_mut().zip(grad) {
                *s += g / lambda;
            }
        }
        score[0] -= horizon;
        for &t in times {
            let Some(int_grad) = self.kernel.integral_gradient(horizon - t) else {
                return Ok(None);
            };
            for (s, g) in score[1..].iter_mut().zip(&int_grad) {
                *s -= g;
            }
        }
        Ok(Some(score))
    }

    /// Time-rescaled event times `τ_i = Λ(t_i)`.
    pub fn residuals(&self, events: &EventSequence) -> Vec<f64> {
        let times = events.times();
        self.kernel
            .integrated_excitations(times)
            .into_iter()
            .zip(times)
            .map(|(integrated, &t)| self.mu * t + integrated)
            .collect()
    }

    /// Gaps `τ_i − τ_{i−1}` (with `τ_0 = 0`), i.i.d. Exp(1) under the model.
    pub fn residual_gaps(&self, events: &EventSequence) -> Vec<f64> {
        let mut prev = 0.0;
        self.residuals(events)
            .into_iter()
            .map(|tau| {
                let gap = tau - prev;
                prev = tau;
                gap
            })
            .collect()
    }

    /// Kolmogorov–Smirnov test of the residual gaps against Exp(1).
    ///
    /// # Errors
    /// [`HawkesError::GoodnessOfFit`] for an empty sequence.
    pub fn goodness_of_fit(&self, events: &EventSequence) -> HawkesResult<KSOutcome> {
        Ok(KSOutcome::unit_exponential(&self.residual_gaps(events))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hawkes::core::ExponentialKernel;
    use approx::assert_abs_diff_eq;

    fn model() -> HawkesModel<ExponentialKernel> {
        HawkesModel::new(0.2, ExponentialKernel::new(0.6, 1.5).unwrap()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Intensity and compensator follow their defining sums.
    //
    // Given
    // -----
    // - μ = 0.2, α = 0.6, β = 1.5 and events {1, 2}.
    //
    // Expect
    // ------
    // - λ(2) counts only the event at 1 (left-continuity);
    //   Λ(3) = 0.6 + G(2) + G(1).
    fn intensity_and_compensator_match_sums() {
        let m = model();
        let events = EventSequence::new(vec![1.0, 2.0], 3.0).unwrap();
        let g = |t: f64| 0.6 * (-1.5 * t).exp();
        let big_g = |t: f64| 0.4 * (1.0 - (-1.5 * t).exp());

        assert_abs_diff_eq!(m.intensity(&events, 2.0), 0.2 + g(1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            m.compensator(&events, 3.0),
            0.6 + big_g(2.0) + big_g(1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // The log-likelihood combines event log-intensities and Λ(T).
    //
    // Given
    // -----
    // - The same model and events over T = 3.
    //
    // Expect
    // ------
    // - ln λ(1) + ln λ(2) − Λ(3); residuals equal Λ at each event.
    fn log_likelihood_and_residuals() {
        let m = model();
        let events = EventSequence::new(vec![1.0, 2.0], 3.0).unwrap();
        let expected = m.intensity(&events, 1.0).ln() + m.intensity(&events, 2.0).ln()
            - m.compensator(&events, 3.0);

        assert_abs_diff_eq!(m.log_likelihood(&events).unwrap(), expected, epsilon = 1e-12);
        let tau = m.residuals(&events);
        assert_abs_diff_eq!(tau[0], m.compensator(&events, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(tau[1], m.compensator(&events, 2.0), epsilon = 1e-12);
        let gaps = m.residual_gaps(&events);
        assert_abs_diff_eq!(gaps[1], tau[1] - tau[0], epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Stationary quantities exist only below the critical branching ratio.
    //
    // Given
    // -----
    // - n = 0.4 and n = 1.2.
    //
    // Expect
    // ------
    // - μ/(1 − n) and μT/(1 − n) for the stable model; None otherwise.
    fn stationary_quantities_require_subcritical() {
        let stable = model();
        let explosive =
            HawkesModel::new(0.2, ExponentialKernel::new(1.2, 1.0).unwrap()).unwrap();

        assert_abs_diff_eq!(stable.stationary_intensity().unwrap(), 0.2 / 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(stable.expected_count(30.0).unwrap(), 10.0, epsilon = 1e-9);
        assert!(!explosive.is_stable());
        assert_eq!(explosive.stationary_intensity(), None);
        assert!(HawkesModel::new(0.0, ExponentialKernel::new(0.1, 1.0).unwrap()).is_err());
    }

    #[test]
    // Purpose
    // -------
    // The natural-parameter score is the gradient of the log-likelihood.
    //
    // Given
    // -----
    // - μ = 0.2, α = 0.6, β = 1.5 and irregular events over T = 8.
    //
    // Expect
    // ------
    // - Each component matches a central difference of ℓ to 1e-6.
    fn score_matches_finite_differences() {
        let m = model();
        let events =
            EventSequence::new(vec![0.3, 0.35, 1.2, 2.0, 2.1, 2.15, 4.4, 7.0], 8.0).unwrap();
        let h = 1e-6;

        let score = m.score(&events).unwrap().unwrap();

        let base = m.params();
        for k in 0..base.len() {
            let mut up = base.clone();
            let mut down = base.clone();
            up[k] += h;
            down[k] -= h;
            let fd = (m.with_params(&up).unwrap().log_likelihood(&events).unwrap()
                - m.with_params(&down).unwrap().log_likelihood(&events).unwrap())
                / (2.0 * h);

            assert_abs_diff_eq!(score[k], fd, epsilon = 1e-6);
        }
    }
}
