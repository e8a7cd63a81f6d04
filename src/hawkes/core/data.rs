//! Validated event sequences for self-exciting processes.
//!
//! Purpose
//! -------
//! Hold one realization of a point process on `[0, T]`: the ordered event
//! times and the observation horizon. Every fit, residual and declustering
//! routine assumes these invariants and does not re-check them.
//!
//! Invariants & assumptions
//! ------------------------
//! - `T` is finite and strictly positive.
//! - Event times are finite, non-negative and strictly increasing.
//! - The last event satisfies `t_n ≤ T`.
//! - An empty sequence is a valid observation (no events on `[0, T]`).
use crate::hawkes::errors::{HawkesError, HawkesResult};

/// `EventSequence` — strictly increasing event times on `[0, T]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventSequence {
    times: Vec<f64>,
    horizon: f64,
}

impl EventSequence {
    /// Validate and wrap event times observed over `[0, horizon]`.
    ///
    /// # Errors
    /// - [`HawkesError::InvalidHorizon`] unless `horizon` is finite and > 0.
    /// - [`HawkesError::NonFiniteEvent`], [`HawkesError::NegativeEvent`] or
    ///   [`HawkesError::UnorderedEvents`] for a bad time, reported at the
    ///   first offending index.
    /// - [`HawkesError::EventAfterHorizon`] when `t_n > horizon`.
    pub fn new(times: Vec<f64>, horizon: f64) -> HawkesResult<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(HawkesError::InvalidHorizon { value: horizon });
        }
        let mut previous = f64::NEG_INFINITY;
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() {
                return Err(HawkesError::NonFiniteEvent { index, value });
            }
            if value < 0.0 {
                return Err(HawkesError::NegativeEvent { index, value });
            }
            if value <= previous {
                return Err(HawkesError::UnorderedEvents { index, previous, value });
            }
            previous = value;
        }
        if let Some(&last) = times.last() {
            if last > horizon {
                return Err(HawkesError::EventAfterHorizon { last, horizon });
            }
        }
        Ok(Self { times, horizon })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Events per unit time over the horizon.
    pub fn rate(&self) -> f64 {
        self.times.len() as f64 / self.horizon
    }

    /// Events strictly before `t`.
    pub fn before(&self, t: f64) -> &[f64] {
        &self.times[..self.times.partition_point(|&s| s < t)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Construction accepts an ordered sequence inside the horizon.
    //
    // Given
    // -----
    // - Times {0, 0.5, 2} with horizon 2.
    //
    // Expect
    // ------
    // - Ok with 3 events, rate 1.5, and two events before t = 1.
    fn new_accepts_valid_sequence() {
        let events = EventSequence::new(vec![0.0, 0.5, 2.0], 2.0).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events.rate(), 1.5);
        assert_eq!(events.before(1.0), &[0.0, 0.5]);
        assert_eq!(events.before(0.0), &[] as &[f64]);
    }

    #[test]
    // Purpose
    // -------
    // Each invariant violation maps to its own error.
    //
    // Given
    // -----
    // - A zero horizon, a NaN time, a negative time, a tie, and a time past
    //   the horizon.
    //
    // Expect
    // ------
    // - The matching error variant for each.
    fn new_rejects_each_violation() {
        assert_eq!(
            EventSequence::new(vec![], 0.0),
            Err(HawkesError::InvalidHorizon { value: 0.0 })
        );
        assert!(matches!(
            EventSequence::new(vec![1.0, f64::NAN], 5.0),
            Err(HawkesError::NonFiniteEvent { index: 1, .. })
        ));
        assert_eq!(
            EventSequence::new(vec![-1.0], 5.0),
            Err(HawkesError::NegativeEvent { index: 0, value: -1.0 })
        );
        assert_eq!(
            EventSequence::new(vec![1.0, 1.0], 5.0),
            Err(HawkesError::UnorderedEvents { index: 1, previous: 1.0, value: 1.0 })
        );
        assert_eq!(
            EventSequence::new(vec![1.0, 6.0], 5.0),
            Err(HawkesError::EventAfterHorizon { last: 6.0, horizon: 5.0 })
        );
    }
}
