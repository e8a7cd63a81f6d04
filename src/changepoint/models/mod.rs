//! changepoint::models — detector algorithms and the shared lifecycle.

pub mod adwin;
pub mod cusum;
pub mod detector;
pub mod monitor;
pub mod sprt;

pub use self::adwin::{Adwin, AdwinDetector};
pub use self::cusum::{Cusum, CusumDetector};
pub use self::detector::Detector;
pub use self::monitor::{ChangeDetector, Monitor, OnlineStatistic};
pub use self::sprt::{Sprt, SprtDetector};
