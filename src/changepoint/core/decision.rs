//! Value objects returned by change detectors.

/// Side of the reference mean on which a CUSUM shift was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Upper,
    Lower,
}

/// Outcome of one detector step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// No decision yet.
    Continue,
    /// CUSUM crossed `h`.
    Shift(Direction),
    /// SPRT accepted the null; not an alarm.
    AcceptH0,
    /// SPRT accepted the alternative.
    AcceptH1,
    /// ADWIN cut its window, discarding `dropped` observations.
    Drift { dropped: u64 },
}

impl Decision {
    pub fn is_alarm(&self) -> bool {
        matches!(self, Decision::Shift(_) | Decision::AcceptH1 | Decision::Drift { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectorStatus {
    #[default]
    Monitoring,
    Alarmed,
}

/// Snapshot of a detector's running statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectorState {
    Cusum { upper: f64, lower: f64 },
    Sprt { log_lr: f64 },
    Adwin { width: u64, mean: f64, variance: f64, buckets: usize },
}

/// Result of [`ChangeDetector::update`](crate::changepoint::ChangeDetector::update).
///
/// `detector_state` is taken when the decision was made, before any
/// automatic reset, so an alarm shows the statistic that crossed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlarmDecision {
    pub triggered: bool,
    pub decision: Decision,
    pub detector_state: DetectorState,
    pub status: DetectorStatus,
}
