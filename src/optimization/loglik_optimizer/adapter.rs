//! Bridge from a [`LogLikelihood`] to Argmin's `CostFunction` / `Gradient`.
//!
//! The cost is `c(θ) = -ℓ(θ)`. Analytic gradients are negated; when the
//! model has none, finite differences are taken on the cost itself.
//!
//! A non-finite `ℓ` is an infeasible trial point, not a failure: its cost
//! is `+∞` and its gradient is `θ − θ_f`, where `θ_f` is the last point
//! whose gradient was finite. Line searches move from `θ_f` outward, so the
//! directional derivative at an infeasible step is positive and both
//! More–Thuente and Hager–Zhang shrink the bracket back toward `θ_f`.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
    last_finite: RefCell<Option<Theta>>,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data, last_finite: RefCell::new(None) }
    }

    fn infeasible_gradient(&self, theta: &Theta) -> Grad {
        match self.last_finite.borrow().as_ref() {
            Some(anchor) if anchor.len() == theta.len() => theta - anchor,
            _ => Grad::zeros(theta.len()),
        }
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.f.value(theta, self.data)?;
        if !value.is_finite() {
            return Ok(f64::INFINITY);
        }
        Ok(-value)
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Analytic gradient when available, otherwise central differences of
    /// the cost with a forward-difference retry.
    ///
    /// The FD closure has to return `f64`, so the first cost error is
    /// parked in `closure_err` and the closure yields `NaN`. A parked error
    /// or an invalid central gradient triggers the forward retry, whose
    /// own errors are returned as-is.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        if !self.cost(theta)?.is_finite() {
            return Ok(self.infeasible_gradient(theta));
        }
        let grad = self.finite_gradient(theta)?;
        self.last_finite.replace(Some(theta.clone()));
        Ok(grad)
    }
}

impl<F: LogLikelihood> ArgMinAdapter<'_, F> {
    fn finite_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_fn = |x: &Theta| -> f64 {
                    self.cost(x).unwrap_or_else(|e| {
                        let mut slot = closure_err.borrow_mut();
                        if slot.is_none() {
                            *slot = Some(e);
                        }
                        f64::NAN
                    })
                };
                let central = theta.central_diff(&cost_fn);
                if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
                    return Ok(central);
                }
                Ok(run_fd_diff(theta, &cost_fn, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}
