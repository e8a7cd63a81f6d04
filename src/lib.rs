//! rust_riskquant — streaming risk quantification and anomaly detection.
//!
//! Purpose
//! -------
//! Serve as the crate root for four independent estimators that share one
//! numerical core:
//!
//! - [`changepoint`]: online CUSUM, SPRT and ADWIN change detectors behind
//!   the `ChangeDetector` contract, plus a keyed per-entity monitor.
//! - [`evt`]: peaks-over-threshold tail risk with a generalized Pareto fit
//!   (VaR, expected shortfall, tail probabilities, bootstrap intervals).
//! - [`hawkes`]: self-exciting point processes with pluggable kernels (MLE,
//!   EM, Ogata simulation, declustering, residual diagnostics).
//! - [`conformal`]: split, weighted, quantile-regression and classification
//!   conformal prediction.
//!
//! Key behaviors
//! -------------
//! - Likelihood-based fits (`evt`, `hawkes`) run through
//!   [`optimization::loglik_optimizer::maximize`] (argmin L-BFGS) and get
//!   standard errors from [`inference`].
//! - Residual diagnostics use the Kolmogorov–Smirnov test in
//!   [`statistical_tests`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every model and detector is a plain owned value with a single logical
//!   owner; nothing is shared or global, so distinct streams can be
//!   processed on distinct threads without locks.
//! - All randomness is seeded explicitly (`StdRng::seed_from_u64`).
//! - Configuration is validated at construction; fitted models are
//!   immutable.
//!
//! Conventions
//! -----------
//! - Each module owns one error enum with a `Result` alias; optimizer errors
//!   convert into the model's `OptimizationFailed` variant.
//! - Diagnostics are emitted as `tracing` events; the crate never installs a
//!   subscriber.
//! - With the `serde` feature, configs and value objects derive
//!   `Serialize`/`Deserialize`.

pub mod changepoint;
pub mod conformal;
pub mod evt;
pub mod hawkes;
pub mod inference;
pub mod optimization;
pub mod statistical_tests;
