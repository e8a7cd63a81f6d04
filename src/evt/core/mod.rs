//! evt::core — data, distribution, threshold and option building blocks.

pub mod data;
pub mod gpd;
pub mod options;
pub mod threshold;

pub use self::data::{Exceedances, validate_losses};
pub use self::gpd::GpdParams;
pub use self::options::{BootstrapOptions, EvtOptions, ThresholdRule};
pub use self::threshold::{empirical_quantile, sorted_quantile};
