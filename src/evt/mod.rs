//! evt — peaks-over-threshold tail risk.
//!
//! Purpose
//! -------
//! Estimate extreme quantiles of a loss distribution from the losses that
//! exceed a high threshold `u`, modeling the excesses with a generalized
//! Pareto distribution (Pickands–Balkema–de Haan).
//!
//! Key behaviors
//! -------------
//! - [`TailRiskEstimator`] selects `u` with a [`ThresholdRule`] (fixed,
//!   empirical quantile, or shape-stability over a quantile grid) and fits
//!   `(ξ, σ)` by maximum likelihood through the shared L-BFGS optimizer.
//! - [`TailModel`] answers VaR, expected shortfall, tail probability and
//!   mean-excess queries in O(1), and bootstrap percentile intervals for
//!   any metric.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer runs in unconstrained coordinates that keep `ξ > −1`
//!   and every excess inside the support.
//! - Queries below the modeled tail (`p < 1 − n_u/n`) are rejected rather
//!   than extrapolated.
//! - Bootstrap replicates are drawn from an explicitly seeded `StdRng`.
//!
//! Conventions
//! -----------
//! - Fits log a `debug` summary; skipped grid points and failed bootstrap
//!   replicates log at `warn`.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{BootstrapOptions, EvtOptions, Exceedances, GpdParams, ThresholdRule};
pub use self::errors::{EvtError, EvtResult};
pub use self::models::{
    BootstrapInterval, GpdStandardErrors, TailMetrics, TailModel, TailRiskEstimator,
};

pub mod prelude {
    pub use super::core::{BootstrapOptions, EvtOptions, ThresholdRule};
    pub use super::errors::{EvtError, EvtResult};
    pub use super::models::{TailMetrics, TailModel, TailRiskEstimator};
}
