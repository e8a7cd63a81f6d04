//! Detector contract and the alarm/reset state machine.
//!
//! Algorithms implement [`OnlineStatistic`] (one step of their recursion,
//! a clear, a snapshot). [`Monitor`] wraps a statistic with input
//! validation, the `Monitoring → Alarmed` lifecycle and the
//! [`ResetPolicy`], and is what callers hold as a [`ChangeDetector`].
use tracing::debug;

use crate::changepoint::{
    core::{
        decision::{AlarmDecision, Decision, DetectorState, DetectorStatus},
        options::ResetPolicy,
        validation::validate_observation,
    },
    errors::DetectorResult,
};

/// Streaming change detector.
pub trait ChangeDetector {
    /// Feed one observation.
    ///
    /// # Errors
    /// Invalid observations are rejected before any state changes.
    fn update(&mut self, value: f64) -> DetectorResult<AlarmDecision>;

    /// Clear all statistics and return to `Monitoring`.
    fn reset(&mut self);

    fn state(&self) -> DetectorState;

    fn status(&self) -> DetectorStatus;

    /// Observations accepted since construction or the last `reset`.
    fn observations(&self) -> u64;
}

/// One online change statistic.
pub trait OnlineStatistic {
    /// Reject observations outside the statistic's support. Called before
    /// [`step`](Self::step); must not mutate.
    fn validate(&self, _value: f64) -> DetectorResult<()> {
        Ok(())
    }

    /// Advance the recursion by one observation.
    fn step(&mut self, value: f64) -> Decision;

    /// Return to the freshly constructed state.
    fn clear(&mut self);

    /// Re-arm after an automatic reset. Defaults to [`clear`](Self::clear).
    fn rearm(&mut self) {
        self.clear();
    }

    fn snapshot(&self) -> DetectorState;
}

#[derive(Debug, Clone)]
pub struct Monitor<S> {
    statistic: S,
    policy: ResetPolicy,
    status: DetectorStatus,
    latched: Option<AlarmDecision>,
    observations: u64,
}

impl<S: OnlineStatistic> Monitor<S> {
    pub fn new(statistic: S, policy: ResetPolicy) -> Self {
        Self {
            statistic,
            policy,
            status: DetectorStatus::Monitoring,
            latched: None,
            observations: 0,
        }
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    pub fn statistic(&self) -> &S {
        &self.statistic
    }
}

impl<S: OnlineStatistic> ChangeDetector for Monitor<S> {
    fn update(&mut self, value: f64) -> DetectorResult<AlarmDecision> {
        validate_observation(value)?;
        self.statistic.validate(value)?;
        if let Some(latched) = self.latched {
            return Ok(latched);
        }

        self.observations += 1;
        let decision = self.statistic.step(value);
        let detector_state = self.statistic.snapshot();
        let triggered = decision.is_alarm();
        if triggered {
            debug!(
                ?decision,
                ?detector_state,
                observations = self.observations,
                "change detector alarm"
            );
        }

        let status = match (triggered, self.policy) {
            (true, ResetPolicy::Manual) => DetectorStatus::Alarmed,
            _ => DetectorStatus::Monitoring,
        };
        let out = AlarmDecision { triggered, decision, detector_state, status };
        match (triggered, self.policy) {
            (true, ResetPolicy::Automatic) => self.statistic.rearm(),
            (true, ResetPolicy::Manual) => {
                self.status = DetectorStatus::Alarmed;
                self.latched = Some(out);
            }
            _ => {}
        }
        Ok(out)
    }

    fn reset(&mut self) {
        self.statistic.clear();
        self.status = DetectorStatus::Monitoring;
        self.latched = None;
        self.observations = 0;
    }

    fn state(&self) -> DetectorState {
        self.statistic.snapshot()
    }

    fn status(&self) -> DetectorStatus {
        self.status
    }

    fn observations(&self) -> u64 {
        self.observations
    }
}
