//! Enumerated detector built from a [`DetectorConfig`].
use crate::changepoint::{
    core::{
        decision::{AlarmDecision, DetectorState, DetectorStatus},
        options::{DetectorConfig, DetectorKind},
    },
    errors::DetectorResult,
    models::{
        adwin::AdwinDetector,
        cusum::CusumDetector,
        monitor::ChangeDetector,
        sprt::SprtDetector,
    },
};

#[derive(Debug, Clone)]
pub enum Detector {
    Cusum(CusumDetector),
    Sprt(SprtDetector),
    Adwin(AdwinDetector),
}

impl Detector {
    /// # Errors
    /// Only SPRT construction can fail, when statrs rejects a hypothesis.
    pub fn new(config: &DetectorConfig) -> DetectorResult<Self> {
        Ok(match config.kind {
            DetectorKind::Cusum(cfg) => Detector::Cusum(CusumDetector::cusum(cfg, config.policy)),
            DetectorKind::Sprt(cfg) => Detector::Sprt(SprtDetector::sprt(cfg, config.policy)?),
            DetectorKind::Adwin(cfg) => Detector::Adwin(AdwinDetector::adwin(cfg, config.policy)),
        })
    }

    fn inner(&self) -> &dyn ChangeDetector {
        match self {
            Detector::Cusum(d) => d,
            Detector::Sprt(d) => d,
            Detector::Adwin(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ChangeDetector {
        match self {
            Detector::Cusum(d) => d,
            Detector::Sprt(d) => d,
            Detector::Adwin(d) => d,
        }
    }
}

impl ChangeDetector for Detector {
    fn update(&mut self, value: f64) -> DetectorResult<AlarmDecision> {
        self.inner_mut().update(value)
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }

    fn state(&self) -> DetectorState {
        self.inner().state()
    }

    fn status(&self) -> DetectorStatus {
        self.inner().status()
    }

    fn observations(&self) -> u64 {
        self.inner().observations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changepoint::core::options::{
        AdwinConfig, CusumConfig, NoiseModel, ResetPolicy, SprtConfig,
    };

    #[test]
    // Purpose
    // -------
    // Each config tag builds the matching variant with the configured policy.
    //
    // Given
    // -----
    // - CUSUM (manual), SPRT and ADWIN configs.
    //
    // Expect
    // ------
    // - Matching variants whose snapshots have the matching shape.
    fn config_tag_selects_variant() {
        let cusum = DetectorConfig::cusum(CusumConfig::new(0.0, 0.5, 4.0).unwrap())
            .with_policy(ResetPolicy::Manual);
        let sprt = DetectorConfig::sprt(
            SprtConfig::new(0.0, 1.0, 0.05, 0.05, NoiseModel::Gaussian { sigma: 1.0 }).unwrap(),
        );
        let adwin = DetectorConfig::adwin(AdwinConfig::default());

        let c = Detector::new(&cusum).unwrap();
        let s = Detector::new(&sprt).unwrap();
        let a = Detector::new(&adwin).unwrap();

        assert!(matches!(&c, Detector::Cusum(d) if d.policy() == ResetPolicy::Manual));
        assert!(matches!(s.state(), DetectorState::Sprt { .. }));
        assert!(matches!(a.state(), DetectorState::Adwin { width: 0, .. }));
    }
}
