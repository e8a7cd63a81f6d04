//! conformal::core — calibration data, options, scores and quantiles.

pub mod data;
pub mod options;
pub mod quantile;
pub mod scores;
pub mod validation;

pub use self::data::CalibrationSet;
pub use self::options::{ConformalOptions, ScoreKind};
