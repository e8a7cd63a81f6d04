//! evt::models — GPD fitting, tail queries and bootstrap intervals.

pub mod bootstrap;
pub mod fit;
pub mod tail;

pub use self::bootstrap::BootstrapInterval;
pub use self::fit::{GpdFit, GpdLikelihood, fit_gpd};
pub use self::tail::{GpdStandardErrors, TailMetrics, TailModel, TailRiskEstimator};
