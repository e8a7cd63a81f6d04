//! Two-sided tabular CUSUM.
//!
//! `S+ₙ = max(0, S+ₙ₋₁ + (xₙ − μ0 − k))`,
//! `S-ₙ = max(0, S-ₙ₋₁ − (xₙ − μ0 + k))`; alarm when either exceeds `h`.
//! When both cross on the same step the larger excursion names the side.
use crate::changepoint::{
    core::{
        decision::{Decision, DetectorState, Direction},
        options::{CusumConfig, ResetPolicy},
    },
    models::monitor::{Monitor, OnlineStatistic},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Cusum {
    cfg: CusumConfig,
    upper: f64,
    lower: f64,
}

pub type CusumDetector = Monitor<Cusum>;

impl Cusum {
    pub fn new(cfg: CusumConfig) -> Self {
        Self { cfg, upper: 0.0, lower: 0.0 }
    }

    pub fn config(&self) -> &CusumConfig {
        &self.cfg
    }
}

impl CusumDetector {
    pub fn cusum(cfg: CusumConfig, policy: ResetPolicy) -> Self {
        Monitor::new(Cusum::new(cfg), policy)
    }
}

impl OnlineStatistic for Cusum {
    fn step(&mut self, value: f64) -> Decision {
        let CusumConfig { mu0, k, h } = self.cfg;
        self.upper = (self.upper + (value - mu0 - k)).max(0.0);
        self.lower = (self.lower - (value - mu0 + k)).max(0.0);
        match (self.upper > h, self.lower > h) {
            (false, false) => Decision::Continue,
            (true, false) => Decision::Shift(Direction::Upper),
            (false, true) => Decision::Shift(Direction::Lower),
            (true, true) if self.upper >= self.lower => Decision::Shift(Direction::Upper),
            (true, true) => Decision::Shift(Direction::Lower),
        }
    }

    fn clear(&mut self) {
        self.upper = 0.0;
        self.lower = 0.0;
    }

    fn snapshot(&self) -> DetectorState {
        DetectorState::Cusum { upper: self.upper, lower: self.lower }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changepoint::{
        core::decision::DetectorStatus, errors::DetectorError, models::monitor::ChangeDetector,
    };
    use approx::assert_abs_diff_eq;

    fn detector(policy: ResetPolicy) -> CusumDetector {
        CusumDetector::cusum(CusumConfig::new(0.0, 0.5, 4.0).unwrap(), policy)
    }

    #[test]
    // Purpose
    // -------
    // The recursion accumulates exactly as written and alarms on the upper
    // side once `S+` exceeds `h`.
    //
    // Given
    // -----
    // - μ0 = 0, k = 0.5, h = 4 and observations 2, 2, 2.
    //
    // Expect
    // ------
    // - S+ = 1.5, 3.0, then 4.5 > h: `Shift(Upper)` with the crossing
    //   statistic in the snapshot and S+ cleared afterwards.
    fn cusum_accumulates_and_alarms_upward() {
        let mut det = detector(ResetPolicy::Automatic);

        let first = det.update(2.0).unwrap();
        det.update(2.0).unwrap();
        let third = det.update(2.0).unwrap();

        assert_eq!(first.decision, Decision::Continue);
        assert_eq!(first.detector_state, DetectorState::Cusum { upper: 1.5, lower: 0.0 });
        assert!(third.triggered);
        assert_eq!(third.decision, Decision::Shift(Direction::Upper));
        assert_eq!(third.status, DetectorStatus::Monitoring);
        match third.detector_state {
            DetectorState::Cusum { upper, .. } => assert_abs_diff_eq!(upper, 4.5),
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(det.state(), DetectorState::Cusum { upper: 0.0, lower: 0.0 });
    }

    #[test]
    // Purpose
    // -------
    // Downward shifts are reported on the lower side.
    //
    // Given
    // -----
    // - Observations of −3 with k = 0.5, h = 4.
    //
    // Expect
    // ------
    // - Alarm on the second step with `Shift(Lower)`.
    fn cusum_reports_lower_direction() {
        let mut det = detector(ResetPolicy::Automatic);

        let first = det.update(-3.0).unwrap();
        let second = det.update(-3.0).unwrap();

        assert!(!first.triggered);
        assert_eq!(second.decision, Decision::Shift(Direction::Lower));
    }

    #[test]
    // Purpose
    // -------
    // Manual reset latches the alarm and freezes state until `reset`.
    //
    // Given
    // -----
    // - Manual policy, an alarming observation, then further in-control
    //   observations, then `reset()`.
    //
    // Expect
    // ------
    // - Later updates repeat the latched alarm without changing state or
    //   the observation count; `reset` returns to `Monitoring` with zero sums.
    fn manual_policy_latches_until_reset() {
        let mut det = detector(ResetPolicy::Manual);

        let alarm = det.update(10.0).unwrap();
        let frozen_state = det.state();
        let repeat = det.update(0.0).unwrap();

        assert!(alarm.triggered);
        assert_eq!(det.status(), DetectorStatus::Alarmed);
        assert_eq!(repeat, alarm);
        assert_eq!(det.state(), frozen_state);
        assert_eq!(det.observations(), 1);

        det.reset();

        assert_eq!(det.status(), DetectorStatus::Monitoring);
        assert_eq!(det.state(), DetectorState::Cusum { upper: 0.0, lower: 0.0 });
        assert!(!det.update(0.0).unwrap().triggered);
    }

    #[test]
    // Purpose
    // -------
    // Non-finite input fails without mutating state.
    //
    // Given
    // -----
    // - One valid observation followed by NaN.
    //
    // Expect
    // ------
    // - `NonFiniteObservation`; state and count unchanged.
    fn non_finite_input_leaves_state_untouched() {
        let mut det = detector(ResetPolicy::Automatic);
        det.update(1.0).unwrap();
        let before = det.state();

        let err = det.update(f64::NAN).unwrap_err();

        assert!(matches!(err, DetectorError::NonFiniteObservation { .. }));
        assert_eq!(det.state(), before);
        assert_eq!(det.observations(), 1);
    }
}
