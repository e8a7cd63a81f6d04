//! Prediction intervals, prediction sets and coverage.
use crate::conformal::{
    core::validation::validate_len,
    errors::{ConformalError, ConformalResult},
};

/// Closed interval `[lower, upper]`; bounds may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionInterval {
    pub lower: f64,
    pub upper: f64,
}

impl PredictionInterval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, y: f64) -> bool {
        self.lower <= y && y <= self.upper
    }

    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// Labels (class indices) kept by a conformal classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionSet {
    pub labels: Vec<usize>,
}

impl PredictionSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: usize) -> bool {
        self.labels.contains(&label)
    }
}

/// Fraction of `y` covered by the matching interval.
///
/// # Errors
/// `EmptyCalibration` for no intervals, `LengthMismatch` for unpaired
/// inputs.
pub fn empirical_coverage(intervals: &[PredictionInterval], y: &[f64]) -> ConformalResult<f64> {
    if intervals.is_empty() {
        return Err(ConformalError::EmptyCalibration);
    }
    validate_len("y", intervals.len(), y.len())?;
    let covered = intervals.iter().zip(y).filter(|(iv, &yi)| iv.contains(yi)).count();
    Ok(covered as f64 / intervals.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Interval helpers and coverage counting.
    //
    // Given
    // -----
    // - Intervals [0, 2] and [1, 1] with targets 2 and 3.
    //
    // Expect
    // ------
    // - Widths 2 and 0; coverage 0.5; mismatched lengths rejected.
    fn interval_helpers_and_coverage() {
        let ivs = [PredictionInterval::new(0.0, 2.0), PredictionInterval::new(1.0, 1.0)];

        assert_eq!(ivs[0].width(), 2.0);
        assert_eq!(ivs[1].width(), 0.0);
        assert_eq!(empirical_coverage(&ivs, &[2.0, 3.0]), Ok(0.5));
        assert!(empirical_coverage(&ivs, &[2.0]).is_err());
        assert!(!PredictionInterval::new(f64::NEG_INFINITY, 1.0).is_bounded());
    }
}
