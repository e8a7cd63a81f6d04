//! Errors for self-exciting point processes (event validation, parameter
//! checks, simulation guards and optimizer failures).
//!
//! ## Conventions
//! - **Indices are 0-based** into the event sequence.
//! - Event times must be finite, non-negative and strictly increasing, and
//!   no later than the observation horizon.
//! - Optimizer/backend errors are normalized to
//!   [`HawkesError::OptimizationFailed`] with a human-readable status.
use crate::{optimization::errors::OptError, statistical_tests::KSError};

/// Result alias for Hawkes operations.
pub type HawkesResult<T> = Result<T, HawkesError>;

#[derive(Debug, Clone, PartialEq)]
pub enum HawkesError {
    // ---- Event data ----
    /// Horizon `T` must be finite and positive.
    InvalidHorizon { value: f64 },

    /// An event time is NaN/±inf.
    NonFiniteEvent { index: usize, value: f64 },

    /// An event time is negative.
    NegativeEvent { index: usize, value: f64 },

    /// Event times must be strictly increasing.
    UnorderedEvents { index: usize, previous: f64, value: f64 },

    /// The last event lies after the horizon.
    EventAfterHorizon { last: f64, horizon: f64 },

    /// Not enough events to fit.
    TooFewEvents { found: usize, min: usize },

    // ---- Parameters ----
    /// A model parameter is outside its admissible region.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// The conditional intensity is zero or negative at an event.
    NonPositiveIntensity { index: usize, value: f64 },

    /// Unconstrained parameter vector has the wrong length.
    ThetaLengthMismatch { expected: usize, actual: usize },

    // ---- Options ----
    /// Fit or simulation options are malformed.
    InvalidOptions { reason: &'static str },

    // ---- Simulation ----
    /// Simulation produced more than `max_events` events before `T`.
    SimulationOverflow { max_events: usize, time: f64 },

    // ---- Estimation ----
    /// The fit stopped on its iteration or time cap.
    FitNotConverged { status: String, iterations: usize },

    /// Optimizer failed outright.
    OptimizationFailed { text: String },

    // ---- Diagnostics ----
    /// The residual goodness-of-fit test could not run.
    GoodnessOfFit { text: String },
}

impl std::error::Error for HawkesError {}

impl std::fmt::Display for HawkesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Event data ----
            HawkesError::InvalidHorizon { value } => {
                write!(f, "Observation horizon must be finite and positive; got {value}")
            }
            HawkesError::NonFiniteEvent { index, value } => {
                write!(f, "Event time at index {index} is non-finite: {value}")
            }
            HawkesError::NegativeEvent { index, value } => {
                write!(f, "Event time at index {index} is negative: {value}")
            }
            HawkesError::UnorderedEvents { index, previous, value } => {
                write!(
                    f,
                    "Event times must be strictly increasing: index {index} has {value} after {previous}"
                )
            }
            HawkesError::EventAfterHorizon { last, horizon } => {
                write!(f, "Last event {last} lies after the horizon {horizon}")
            }
            HawkesError::TooFewEvents { found, min } => {
                write!(f, "Need at least {min} events; found {found}")
            }

            // ---- Parameters ----
            HawkesError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid Hawkes parameter {name} = {value}: {reason}")
            }
            HawkesError::NonPositiveIntensity { index, value } => {
                write!(f, "Intensity at event {index} is not positive: {value}")
            }
            HawkesError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector length mismatch: expected {expected}, actual {actual}")
            }

            // ---- Options ----
            HawkesError::InvalidOptions { reason } => write!(f, "Invalid options: {reason}"),

            // ---- Simulation ----
            HawkesError::SimulationOverflow { max_events, time } => {
                write!(
                    f,
                    "Simulation exceeded {max_events} events by time {time}; the process is likely explosive"
                )
            }

            // ---- Estimation ----
            HawkesError::FitNotConverged { status, iterations } => {
                write!(f, "Hawkes fit did not converge after {iterations} iterations ({status})")
            }
            HawkesError::OptimizationFailed { text } => {
                write!(f, "Hawkes optimization failed: {text}")
            }

            // ---- Diagnostics ----
            HawkesError::GoodnessOfFit { text } => {
                write!(f, "Residual goodness-of-fit test failed to run: {text}")
            }
        }
    }
}

impl From<OptError> for HawkesError {
    fn from(err: OptError) -> Self {
        HawkesError::OptimizationFailed { text: err.to_string() }
    }
}

impl From<KSError> for HawkesError {
    fn from(err: KSError) -> Self {
        HawkesError::GoodnessOfFit { text: err.to_string() }
    }
}
