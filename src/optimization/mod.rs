//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the maximum-likelihood machinery shared by the batch estimators
//! of this crate (GPD tail fits in `evt`, Hawkes fits in `hawkes`). Callers
//! implement a log-likelihood in unconstrained parameter space, pick
//! tolerances and an iteration/time budget, and obtain fitted parameters plus
//! diagnostics without touching Argmin directly.
//!
//! Key behaviors
//! -------------
//! - [`loglik_optimizer`]: L-BFGS with More–Thuente or Hager–Zhang line
//!   search, finite-difference gradient fallback, bounded iteration count and
//!   optional wall-clock cap.
//! - [`numerical_stability`]: guarded softplus transforms used to map
//!   unconstrained `θ` into strictly positive model parameters.
//! - [`errors`]: [`OptError`](errors::OptError) and the `OptResult<T>` alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers always maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`.
//! - Domain violations inside an objective are recoverable `OptError`s,
//!   never panics.
//! - A run that stops on its iteration or time budget is reported with
//!   `converged = false`; model layers turn this into an explicit fit
//!   failure.
//!
//! Conventions
//! -----------
//! - Parameters, gradients, and Hessians are `ndarray` aliases (`Theta`,
//!   `Grad`, `Hessian`).
//! - This layer does not log on its own; with the `obs_slog` feature and
//!   `MLEOptions::verbose` an Argmin terminal observer is attached.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_riskquant::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
