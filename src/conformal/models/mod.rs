//! conformal::models — calibrated predictors and their outputs.

pub mod classification;
pub mod cqr;
pub mod interval;
pub mod split;
pub mod weighted;

pub use self::classification::ConformalClassifier;
pub use self::cqr::ConformalizedQuantileRegression;
pub use self::interval::{PredictionInterval, PredictionSet, empirical_coverage};
pub use self::split::SplitConformal;
pub use self::weighted::WeightedConformal;
