//! inference — post-estimation uncertainty for maximum-likelihood fits.
//!
//! Classical standard errors from the observed information matrix, computed
//! by finite differences and an eigen-based pseudoinverse. Used by the
//! generalized Pareto tail fit and the Hawkes fit to report parameter
//! standard errors alongside point estimates.

pub mod hessian;

pub use self::hessian::{
    calc_covariance, calc_standard_errors, calc_standard_errors_from_value, pseudo_inverse,
};
