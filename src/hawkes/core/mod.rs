//! hawkes::core — event data, kernels and options.

pub mod data;
pub mod kernel;
pub mod options;

pub use self::data::EventSequence;
pub use self::kernel::{ExcitationKernel, ExponentialKernel, PowerLawKernel};
pub use self::options::{EmOptions, FitMethod, HawkesOptions, SimOpts};
