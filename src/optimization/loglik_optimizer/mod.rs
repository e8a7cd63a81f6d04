//! loglik_optimizer — Argmin-backed maximum-likelihood optimizer.
//!
//! Purpose
//! -------
//! Fit the crate's parametric models (the generalized Pareto tail and the
//! Hawkes process) by maximizing a log-likelihood `ℓ(θ)` over an
//! unconstrained parameter vector. Models implement [`LogLikelihood`] and
//! call [`maximize`].
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes `c(θ) = -ℓ(θ)` to Argmin, with a
//!   finite-difference gradient when the model has no analytic one.
//! - [`builders`] constructs L-BFGS with Hager–Zhang or More–Thuente line
//!   search; [`run::run_lbfgs`] applies iteration and wall-clock caps.
//! - [`finite_diff`] provides validated FD gradients and Hessians; the
//!   Hessians feed observed-information standard errors.
//!
//! Conventions
//! -----------
//! - Constrained model parameters are mapped to `θ` in the model layer.
//! - Reported values are log-likelihoods, never costs.
//! - A capped run returns its best iterate with `converged == false`;
//!   callers decide whether that is fatal.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::finite_diff::{compute_hessian, hessian_from_grad, hessian_from_value};
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
