//! statistical_tests — goodness-of-fit diagnostics.
//!
//! Purpose
//! -------
//! Provide the one-sample Kolmogorov–Smirnov test used to check fitted
//! models against their implied reference distribution. The Hawkes module
//! runs it on time-rescaled residual gaps, which are Exp(1) when the model
//! is correctly specified.
//!
//! Key behaviors
//! -------------
//! - [`KSOutcome::one_sample`] against any `statrs` continuous CDF.
//! - [`KSOutcome::unit_exponential`] convenience for Exp(1).
//! - [`validate_input`] rejects empty or non-finite samples before any
//!   sorting happens.
//!
//! Conventions
//! -----------
//! - p-values are asymptotic with Stephens' finite-sample correction, and
//!   are conservative for very small `n`.

pub mod errors;
pub mod kolmogorov_smirnov;
pub mod validation;

pub use self::errors::{KSError, KSResult};
pub use self::kolmogorov_smirnov::KSOutcome;
pub use self::validation::validate_input;
