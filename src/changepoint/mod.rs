//! changepoint — online change detection over scalar streams.
//!
//! Purpose
//! -------
//! Flag the moment a monitored stream departs from its reference behaviour.
//! Three detectors share one contract, [`ChangeDetector`]:
//!
//! - CUSUM: two-sided cumulative sums against a target mean, with the
//!   Siegmund ARL₀ approximation for threshold design.
//! - SPRT: Wald's sequential test between two simple hypotheses under a
//!   Gaussian, Poisson or Bernoulli noise model.
//! - ADWIN: adaptive windowing with a Bernstein-type cut bound.
//!
//! Key behaviors
//! -------------
//! - [`Monitor`] owns the lifecycle: `Monitoring → Alarmed`, governed by
//!   [`ResetPolicy`]. Automatic resets re-arm immediately; manual resets
//!   latch until [`ChangeDetector::reset`].
//! - [`Detector`] selects the algorithm from a [`DetectorConfig`] tag.
//! - [`EntityMonitor`] keeps one independent detector per key.
//!
//! Invariants & assumptions
//! ------------------------
//! - A rejected observation (non-finite, or outside the SPRT family's
//!   support) never mutates state.
//! - CUSUM and SPRT are O(1) per update; ADWIN is O(log n) memory and
//!   scans its `O(M log n)` bucket boundaries on every update.
//! - Detectors are single-owner values; parallelism comes from running
//!   distinct detectors on distinct threads.
//!
//! Conventions
//! -----------
//! - Alarms are logged at `debug` level through `tracing`.
//! - The state in an [`AlarmDecision`] is the one that crossed, taken
//!   before any automatic reset.

pub mod core;
pub mod entity;
pub mod errors;
pub mod models;

pub use self::core::{
    AdwinConfig, AlarmDecision, CusumConfig, Decision, DetectorConfig, DetectorKind,
    DetectorState, DetectorStatus, Direction, NoiseModel, ResetPolicy, SprtConfig,
};
pub use self::entity::EntityMonitor;
pub use self::errors::{DetectorError, DetectorResult};
pub use self::models::{
    Adwin, AdwinDetector, ChangeDetector, Cusum, CusumDetector, Detector, Monitor,
    OnlineStatistic, Sprt, SprtDetector,
};

pub mod prelude {
    pub use super::core::{
        AdwinConfig, AlarmDecision, CusumConfig, Decision, DetectorConfig, NoiseModel,
        ResetPolicy, SprtConfig,
    };
    pub use super::entity::EntityMonitor;
    pub use super::errors::{DetectorError, DetectorResult};
    pub use super::models::{ChangeDetector, Detector};
}
