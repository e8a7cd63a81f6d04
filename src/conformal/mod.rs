//! conformal — distribution-free prediction intervals and sets.
//!
//! Purpose
//! -------
//! Turn any point predictor into intervals with finite-sample marginal
//! coverage `≥ 1 − α`, assuming only exchangeability of the calibration
//! and test points.
//!
//! Key behaviors
//! -------------
//! - [`SplitConformal`]: absolute, signed and normalized residual scores.
//! - [`ConformalizedQuantileRegression`]: calibrated quantile bands.
//! - [`WeightedConformal`]: likelihood-ratio weights for covariate shift.
//! - [`ConformalClassifier`]: label sets from `1 − p̂(y | x)`.
//!
//! Conventions
//! -----------
//! - `q̂` is the `⌈(1 − α)(n + 1)⌉`-th smallest score and `+∞` when that
//!   rank exceeds `n`; the resulting unbounded interval is valid.
//! - Calibrated models are immutable values.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{CalibrationSet, ConformalOptions, ScoreKind};
pub use self::errors::{ConformalError, ConformalResult};
pub use self::models::{
    ConformalClassifier, ConformalizedQuantileRegression, PredictionInterval, PredictionSet,
    SplitConformal, WeightedConformal, empirical_coverage,
};

pub mod prelude {
    pub use super::core::{CalibrationSet, ConformalOptions, ScoreKind};
    pub use super::errors::{ConformalError, ConformalResult};
    pub use super::models::{PredictionInterval, SplitConformal, empirical_coverage};
}
