//! conformal::core::options — score selection and miscoverage level.
use crate::conformal::{core::validation::validate_alpha, errors::ConformalResult};

/// Nonconformity score for split conformal regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreKind {
    /// `|y − ŷ|`; symmetric intervals.
    #[default]
    Absolute,
    /// `y − ŷ`; separate lower and upper quantiles at `α/2` and `1 − α/2`.
    Signed,
    /// `|y − ŷ| / s` with a per-example scale `s > 0`.
    Normalized,
}

/// Defaults: `alpha = 0.1` (90% coverage), absolute score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConformalOptions {
    pub alpha: f64,
    pub score: ScoreKind,
}

impl ConformalOptions {
    /// # Errors
    /// [`ConformalError::InvalidAlpha`](crate::conformal::ConformalError::InvalidAlpha)
    /// for `alpha ∉ (0, 1)`.
    pub fn new(alpha: f64, score: ScoreKind) -> ConformalResult<Self> {
        Ok(Self { alpha: validate_alpha(alpha)?, score })
    }

    pub fn coverage(&self) -> f64 {
        1.0 - self.alpha
    }
}

impl Default for ConformalOptions {
    fn default() -> Self {
        Self { alpha: 0.1, score: ScoreKind::Absolute }
    }
}
