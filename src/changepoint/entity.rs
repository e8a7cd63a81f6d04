//! Keyed collection of independent detectors.
use std::{
    borrow::Borrow,
    collections::{HashMap, hash_map::Entry},
    hash::Hash,
};

use crate::changepoint::{
    core::{
        decision::{AlarmDecision, DetectorStatus},
        options::DetectorConfig,
    },
    errors::DetectorResult,
    models::{detector::Detector, monitor::ChangeDetector},
};

/// One detector per entity, all built from the same configuration.
///
/// Detectors are created on the first observation for a key and never
/// share state.
#[derive(Debug, Clone)]
pub struct EntityMonitor<K> {
    config: DetectorConfig,
    prototype: Detector,
    detectors: HashMap<K, Detector>,
}

impl<K: Eq + Hash> EntityMonitor<K> {
    /// # Errors
    /// Propagates [`Detector::new`] failures.
    pub fn new(config: DetectorConfig) -> DetectorResult<Self> {
        Ok(Self { prototype: Detector::new(&config)?, config, detectors: HashMap::new() })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Route `value` to the detector for `key`, creating it if needed.
    ///
    /// A new entity is registered only once its first observation is
    /// accepted.
    ///
    /// # Errors
    /// The detector's validation error.
    pub fn update(&mut self, key: K, value: f64) -> DetectorResult<AlarmDecision> {
        match self.detectors.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().update(value),
            Entry::Vacant(slot) => {
                let mut detector = self.prototype.clone();
                let decision = detector.update(value)?;
                slot.insert(detector);
                Ok(decision)
            }
        }
    }

    /// Reset one entity. Returns `false` if the key is unknown.
    pub fn reset<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.detectors.get_mut(key) {
            Some(det) => {
                det.reset();
                true
            }
            None => false,
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<Detector>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.detectors.remove(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Detector>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.detectors.get(key)
    }

    /// Entities currently latched in `Alarmed`.
    pub fn alarmed(&self) -> impl Iterator<Item = &K> {
        self.detectors
            .iter()
            .filter(|(_, det)| det.status() == DetectorStatus::Alarmed)
            .map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
