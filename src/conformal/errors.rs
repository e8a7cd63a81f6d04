//! conformal::errors — error type for conformal calibration and prediction.
//!
//! All variants are validation errors raised before any model is built.

pub type ConformalResult<T> = Result<T, ConformalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ConformalError {
    /// Calibration requires at least one example.
    EmptyCalibration,

    /// Paired inputs have different lengths.
    LengthMismatch { what: &'static str, expected: usize, found: usize },

    /// An input value is NaN or ±inf.
    NonFiniteValue { what: &'static str, index: usize, value: f64 },

    /// Miscoverage level must lie in (0, 1).
    InvalidAlpha { alpha: f64 },

    /// Normalizing scales must be finite and strictly positive.
    InvalidScale { index: usize, value: f64 },

    /// Weights must be finite and non-negative, with positive total mass.
    InvalidWeight { index: usize, value: f64 },

    /// Class probabilities must lie in [0, 1].
    InvalidProbability { index: usize, value: f64 },

    /// The normalized score needs per-example scales.
    MissingScales,

    /// CQR lower quantile predictions must not exceed the upper ones.
    CrossedQuantiles { index: usize, lower: f64, upper: f64 },
}

impl std::error::Error for ConformalError {}

impl std::fmt::Display for ConformalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConformalError::EmptyCalibration => {
                write!(f, "Calibration set is empty; need at least one example")
            }
            ConformalError::LengthMismatch { what, expected, found } => {
                write!(f, "Length mismatch for {what}: expected {expected}, found {found}")
            }
            ConformalError::NonFiniteValue { what, index, value } => {
                write!(f, "Non-finite {what} at index {index}: {value}")
            }
            ConformalError::InvalidAlpha { alpha } => {
                write!(f, "Miscoverage level alpha = {alpha} must lie strictly between 0 and 1")
            }
            ConformalError::InvalidScale { index, value } => {
                write!(f, "Scale at index {index} must be finite and positive; got {value}")
            }
            ConformalError::InvalidWeight { index, value } => {
                write!(f, "Weight at index {index} must be finite and non-negative; got {value}")
            }
            ConformalError::InvalidProbability { index, value } => {
                write!(f, "Probability at index {index} must lie in [0, 1]; got {value}")
            }
            ConformalError::MissingScales => {
                write!(f, "Normalized scores require per-example scales")
            }
            ConformalError::CrossedQuantiles { index, lower, upper } => {
                write!(f, "Lower quantile {lower} exceeds upper quantile {upper} at index {index}")
            }
        }
    }
}
