//! changepoint::core — configuration, decisions, and input guards shared
//! by every detector.

pub mod decision;
pub mod options;
pub mod validation;

pub use self::decision::{AlarmDecision, Decision, DetectorState, DetectorStatus, Direction};
pub use self::options::{
    AdwinConfig, CusumConfig, DetectorConfig, DetectorKind, NoiseModel, ResetPolicy, SprtConfig,
};
