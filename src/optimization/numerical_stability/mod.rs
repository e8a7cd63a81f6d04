//! numerical_stability — guarded scalar transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Keep the parameter maps used by the estimators in one place. GPD and
//! Hawkes fits optimize over unconstrained `θ ∈ ℝᵈ` and map each coordinate
//! into its admissible region (`σ > 0`, `β > 0`, `ξ > -1`, ...) with the
//! softplus family implemented here.
//!
//! Key behaviors
//! -------------
//! - [`safe_softplus`] / [`safe_softplus_inv`]: ℝ ↔ (0, ∞) without overflow.
//! - [`safe_logistic`]: the softplus derivative, for chain-rule gradients.
//! - [`EIGEN_EPS`], [`POSITIVE_FLOOR`]: tolerances shared by inference and
//!   model code.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare the guarded transforms with
//!   naïve formulas on a safe grid and check the tails.

pub mod transformations;

pub use self::transformations::{
    EIGEN_EPS, POSITIVE_FLOOR, safe_logistic, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, POSITIVE_FLOOR, safe_logistic, safe_softplus, safe_softplus_inv,
    };
}
