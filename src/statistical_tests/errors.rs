//! statistical_tests::errors — error type for goodness-of-fit tests.
//!
//! [`KSError`] covers input validation for the Kolmogorov–Smirnov routines
//! and failures constructing the reference distribution. Messages are
//! phrased in terms of the violated constraint.

pub type KSResult<T> = Result<T, KSError>;

#[derive(Debug, Clone, PartialEq)]
pub enum KSError {
    //------ Input validation errors ------
    InsufficientData,
    InvalidData(f64),

    //------ Reference distribution ------
    InvalidDistribution(String),
}

impl std::error::Error for KSError {}

impl std::fmt::Display for KSError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KSError::InsufficientData => {
                write!(f, "Need at least 1 observation for a Kolmogorov-Smirnov test.")
            }
            KSError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            KSError::InvalidDistribution(msg) => {
                write!(f, "Invalid reference distribution: {msg}")
            }
        }
    }
}
