//! evt::errors — error type for tail estimation.
//!
//! [`EvtError`] groups input validation, fit failures, query-domain errors
//! and bootstrap failures. Optimizer errors are normalised into
//! [`EvtError::OptimizationFailed`] at the model boundary.
use crate::optimization::errors::OptError;

pub type EvtResult<T> = Result<T, EvtError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EvtError {
    // ---- Input validation ----
    /// Loss sample is empty.
    EmptySample,

    /// A loss is NaN or ±inf.
    NonFiniteLoss { index: usize, value: f64 },

    /// Threshold must be finite.
    InvalidThreshold { value: f64 },

    /// Threshold-rule quantiles must lie in (0, 1) with lower < upper.
    InvalidQuantile { value: f64 },

    /// Threshold-rule grid is malformed.
    InvalidThresholdRule { reason: &'static str },

    /// Bootstrap settings are malformed.
    InvalidBootstrap { reason: &'static str },

    // ---- Model domain ----
    /// Shape parameter outside the admissible region.
    InvalidShape { value: f64 },

    /// Scale parameter must be finite and positive.
    InvalidScale { value: f64 },

    /// An excess lies beyond the finite upper endpoint.
    OutsideSupport { index: usize, value: f64 },

    // ---- Fitting ----
    /// Fewer than two exceedances over the threshold.
    InsufficientExceedances { threshold: f64, found: usize },

    /// No grid threshold yielded enough successful fits.
    NoStableThreshold { fitted: usize, window: usize },

    /// Optimizer stopped on its iteration or time cap.
    FitNotConverged { status: String, iterations: usize },

    /// Optimizer failed outright.
    OptimizationFailed { text: String },

    // ---- Queries ----
    /// Probability outside (0, 1).
    InvalidProbability { p: f64 },

    /// Probability below the tail model's range `1 − n_u/n`.
    ProbabilityBelowThreshold { p: f64, min: f64 },

    /// Expected shortfall requires ξ < 1.
    UndefinedExpectedShortfall { xi: f64 },

    // ---- Bootstrap ----
    /// Fewer than half of the replicates produced a metric.
    BootstrapFailed { successes: usize, replicates: usize },
}

impl std::error::Error for EvtError {}

impl std::fmt::Display for EvtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input validation ----
            EvtError::EmptySample => write!(f, "Loss sample is empty."),
            EvtError::NonFiniteLoss { index, value } => {
                write!(f, "Loss at index {index} is non-finite: {value}")
            }
            EvtError::InvalidThreshold { value } => {
                write!(f, "Threshold must be finite; got {value}")
            }
            EvtError::InvalidQuantile { value } => {
                write!(f, "Threshold quantile {value} must lie strictly between 0 and 1")
            }
            EvtError::InvalidThresholdRule { reason } => {
                write!(f, "Invalid threshold rule: {reason}")
            }
            EvtError::InvalidBootstrap { reason } => {
                write!(f, "Invalid bootstrap options: {reason}")
            }

            // ---- Model domain ----
            EvtError::InvalidShape { value } => {
                write!(f, "GPD shape xi = {value} is outside the admissible region")
            }
            EvtError::InvalidScale { value } => {
                write!(f, "GPD scale sigma = {value} must be finite and positive")
            }
            EvtError::OutsideSupport { index, value } => {
                write!(f, "Excess {value} at index {index} lies outside the GPD support")
            }

            // ---- Fitting ----
            EvtError::InsufficientExceedances { threshold, found } => {
                write!(f, "Need at least 2 exceedances over threshold {threshold}; found {found}")
            }
            EvtError::NoStableThreshold { fitted, window } => {
                write!(
                    f,
                    "Threshold stability rule fitted {fitted} grid points; need at least {window}"
                )
            }
            EvtError::FitNotConverged { status, iterations } => {
                write!(f, "GPD fit did not converge after {iterations} iterations ({status})")
            }
            EvtError::OptimizationFailed { text } => {
                write!(f, "GPD optimization failed: {text}")
            }

            // ---- Queries ----
            EvtError::InvalidProbability { p } => {
                write!(f, "Probability {p} must lie strictly between 0 and 1")
            }
            EvtError::ProbabilityBelowThreshold { p, min } => {
                write!(f, "Probability {p} is below the tail model's range (p >= {min})")
            }
            EvtError::UndefinedExpectedShortfall { xi } => {
                write!(f, "Expected shortfall is undefined for xi = {xi} >= 1")
            }

            // ---- Bootstrap ----
            EvtError::BootstrapFailed { successes, replicates } => {
                write!(f, "Only {successes} of {replicates} bootstrap replicates succeeded")
            }
        }
    }
}

impl From<OptError> for EvtError {
    fn from(err: OptError) -> Self {
        EvtError::OptimizationFailed { text: err.to_string() }
    }
}
