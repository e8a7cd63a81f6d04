//! changepoint::errors — error type for online change detectors.
//!
//! Every variant is raised before any detector state is touched, so a
//! failed `update` leaves the detector exactly as it was.

pub type DetectorResult<T> = Result<T, DetectorError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DetectorError {
    // ---- Observations ----
    /// Observation is NaN or ±inf.
    NonFiniteObservation { value: f64 },

    /// Observation lies outside the SPRT noise family's support.
    OutsideSupport { value: f64, family: &'static str },

    // ---- Configuration ----
    /// A tuning parameter is outside its admissible range.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// SPRT error rates must satisfy 0 < α, β < 1 and α + β < 1.
    InvalidErrorRates { alpha: f64, beta: f64 },

    /// SPRT hypotheses must differ.
    IdenticalHypotheses { value: f64 },

    /// Wrapper for statrs distribution construction errors.
    Distribution { text: String },
}

impl std::error::Error for DetectorError {}

impl std::fmt::Display for DetectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectorError::NonFiniteObservation { value } => {
                write!(f, "Observation must be finite; got {value}")
            }
            DetectorError::OutsideSupport { value, family } => {
                write!(f, "Observation {value} is outside the support of the {family} model")
            }
            DetectorError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid detector parameter {name} = {value}: {reason}")
            }
            DetectorError::InvalidErrorRates { alpha, beta } => {
                write!(
                    f,
                    "Invalid SPRT error rates alpha = {alpha}, beta = {beta}: need 0 < alpha, beta < 1 and alpha + beta < 1"
                )
            }
            DetectorError::IdenticalHypotheses { value } => {
                write!(f, "SPRT hypotheses must differ; both equal {value}")
            }
            DetectorError::Distribution { text } => {
                write!(f, "Invalid noise distribution: {text}")
            }
        }
    }
}
