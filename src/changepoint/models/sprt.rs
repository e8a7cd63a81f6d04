//! Wald's sequential probability ratio test with restart on decision.
//!
//! `Λₙ = Λₙ₋₁ + ln f1(xₙ) − ln f0(xₙ)`; `Λ ≥ B` accepts H1 (an alarm),
//! `Λ ≤ A` accepts H0 and restarts the test at `Λ = 0`. After H1 the
//! crossing `Λ` is kept for the alarm snapshot; the reset policy restarts it.
use statrs::distribution::{Bernoulli, Continuous, Discrete, Normal, Poisson};

use crate::changepoint::{
    core::{
        decision::{Decision, DetectorState},
        options::{NoiseModel, ResetPolicy, SprtConfig},
    },
    errors::{DetectorError, DetectorResult},
    models::monitor::{Monitor, OnlineStatistic},
};

/// Densities under `(H0, H1)`.
#[derive(Debug, Clone, PartialEq)]
enum Hypotheses {
    Gaussian(Normal, Normal),
    Poisson(Poisson, Poisson),
    Bernoulli(Bernoulli, Bernoulli),
}

impl Hypotheses {
    fn build(cfg: &SprtConfig) -> DetectorResult<Self> {
        let wrap = |e: &dyn std::fmt::Display| DetectorError::Distribution { text: e.to_string() };
        Ok(match cfg.noise {
            NoiseModel::Gaussian { sigma } => Hypotheses::Gaussian(
                Normal::new(cfg.mu0, sigma).map_err(|e| wrap(&e))?,
                Normal::new(cfg.mu1, sigma).map_err(|e| wrap(&e))?,
            ),
            NoiseModel::Poisson => Hypotheses::Poisson(
                Poisson::new(cfg.mu0).map_err(|e| wrap(&e))?,
                Poisson::new(cfg.mu1).map_err(|e| wrap(&e))?,
            ),
            NoiseModel::Bernoulli => Hypotheses::Bernoulli(
                Bernoulli::new(cfg.mu0).map_err(|e| wrap(&e))?,
                Bernoulli::new(cfg.mu1).map_err(|e| wrap(&e))?,
            ),
        })
    }

    fn log_ratio(&self, x: f64) -> f64 {
        match self {
            Hypotheses::Gaussian(f0, f1) => f1.ln_pdf(x) - f0.ln_pdf(x),
            Hypotheses::Poisson(f0, f1) => f1.ln_pmf(x as u64) - f0.ln_pmf(x as u64),
            Hypotheses::Bernoulli(f0, f1) => f1.ln_pmf(x as u64) - f0.ln_pmf(x as u64),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprt {
    cfg: SprtConfig,
    hypotheses: Hypotheses,
    lower: f64,
    upper: f64,
    log_lr: f64,
}

pub type SprtDetector = Monitor<Sprt>;

impl Sprt {
    /// # Errors
    /// [`DetectorError::Distribution`] if statrs rejects a hypothesis.
    pub fn new(cfg: SprtConfig) -> DetectorResult<Self> {
        Ok(Self {
            hypotheses: Hypotheses::build(&cfg)?,
            lower: cfg.lower_boundary(),
            upper: cfg.upper_boundary(),
            log_lr: 0.0,
            cfg,
        })
    }

    pub fn config(&self) -> &SprtConfig {
        &self.cfg
    }

    pub fn log_likelihood_ratio(&self) -> f64 {
        self.log_lr
    }
}

impl SprtDetector {
    pub fn sprt(cfg: SprtConfig, policy: ResetPolicy) -> DetectorResult<Self> {
        Ok(Monitor::new(Sprt::new(cfg)?, policy))
    }
}

impl OnlineStatistic for Sprt {
    /// Poisson counts must be non-negative integers; Bernoulli outcomes 0 or 1.
    fn validate(&self, value: f64) -> DetectorResult<()> {
        let ok = match self.cfg.noise {
            NoiseModel::Gaussian { .. } => true,
            NoiseModel::Poisson => value >= 0.0 && value.fract() == 0.0,
            NoiseModel::Bernoulli => value == 0.0 || value == 1.0,
        };
        if !ok {
            return Err(DetectorError::OutsideSupport { value, family: self.cfg.noise.family() });
        }
        Ok(())
    }

    fn step(&mut self, value: f64) -> Decision {
        self.log_lr += self.hypotheses.log_ratio(value);
        if self.log_lr >= self.upper {
            Decision::AcceptH1
        } else if self.log_lr <= self.lower {
            self.log_lr = 0.0;
            Decision::AcceptH0
        } else {
            Decision::Continue
        }
    }

    fn clear(&mut self) {
        self.log_lr = 0.0;
    }

    fn snapshot(&self) -> DetectorState {
        DetectorState::Sprt { log_lr: self.log_lr }
    }
}
