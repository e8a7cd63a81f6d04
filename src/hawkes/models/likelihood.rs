//! Hawkes log-likelihood over softplus-mapped parameters.
use crate::{
    hawkes::{
        core::{EventSequence, ExcitationKernel},
        errors::HawkesResult,
        models::model::HawkesModel,
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Cost, Grad, LogLikelihood, Theta},
        numerical_stability::{safe_logistic, safe_softplus, safe_softplus_inv},
    },
};

/// Smallest natural value used when mapping a start point into θ-space.
const START_FLOOR: f64 = 1e-3;

/// Every natural parameter `p = softplus(θ)`, so `μ, β, τ, θ > 0` and
/// `α ≥ 0` for any `θ ∈ ℝᵈ`. The objective is the log-likelihood per event.
/// Kernels with closed-form derivatives get an analytic gradient; the rest
/// are differenced by the optimizer.
#[derive(Debug, Clone)]
pub struct HawkesLikelihood<K> {
    template: HawkesModel<K>,
}

impl<K: ExcitationKernel> HawkesLikelihood<K> {
    pub fn new(template: HawkesModel<K>) -> Self {
        Self { template }
    }

    pub fn dim(&self) -> usize {
        self.template.params().len()
    }

    pub fn model_from_theta(&self, theta: &Theta) -> HawkesResult<HawkesModel<K>> {
        let natural: Vec<f64> = theta.iter().map(|&x| safe_softplus(x)).collect();
        self.template.with_params(&natural)
    }

    /// θ for the template; zero entries start at a small positive value.
    pub fn initial_theta(&self) -> Theta {
        self.template.params().into_iter().map(|p| safe_softplus_inv(p.max(START_FLOOR))).collect()
    }
}

impl<K: ExcitationKernel + 'static> LogLikelihood for HawkesLikelihood<K> {
    type Data = EventSequence;

    fn value(&self, theta: &Theta, data: &EventSequence) -> OptResult<Cost> {
        let model = self.model_from_theta(theta)?;
        Ok(model.log_likelihood(data)? / data.len().max(1) as f64)
    }

    fn grad(&self, theta: &Theta, data: &EventSequence) -> OptResult<Grad> {
        let model = self.model_from_theta(theta)?;
        let score = model.score(data)?.ok_or(OptError::GradientNotImplemented)?;
        let n = data.len().max(1) as f64;
        Ok(score.iter().zip(theta).map(|(s, &x)| s / n * safe_logistic(x)).collect())
    }

    fn check(&self, theta: &Theta, _data: &EventSequence) -> OptResult<()> {
        if theta.len() != self.dim() {
            return Err(OptError::ThetaLengthMismatch { expected: self.dim(), actual: theta.len() });
        }
        if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(OptError::InvalidThetaInput { index, value });
        }
        Ok(())
    }
}
