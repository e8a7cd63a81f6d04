//! Stochastic declustering: background versus triggered events.
use crate::hawkes::{
    core::{EventSequence, ExcitationKernel},
    models::model::HawkesModel,
};

/// Most likely origin of one event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventLabel {
    Background,
    /// Triggered by the event at index `parent` with this share of `λ(t_i)`.
    Triggered { parent: usize, probability: f64 },
}

/// Per-event branching attribution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declustering {
    labels: Vec<EventLabel>,
    background_probabilities: Vec<f64>,
}

impl Declustering {
    pub fn labels(&self) -> &[EventLabel] {
        &self.labels
    }

    /// `μ/λ(t_i)` per event.
    pub fn background_probabilities(&self) -> &[f64] {
        &self.background_probabilities
    }

    /// Events labeled background.
    pub fn background_count(&self) -> usize {
        self.labels.iter().filter(|l| matches!(l, EventLabel::Background)).count()
    }

    /// Expected number of background events, `Σ μ/λ(t_i)`.
    pub fn expected_background(&self) -> f64 {
        self.background_probabilities.iter().sum()
    }
}

impl<K: ExcitationKernel> HawkesModel<K> {
    /// Label each event by the largest of its background share `μ/λ(t_i)`
    /// and its parents' shares `g(t_i − t_j)/λ(t_i)`. Ties go to the
    /// background. O(n²).
    pub fn decluster(&self, events: &EventSequence) -> Declustering {
        let times = events.times();
        let mut labels = Vec::with_capacity(times.len());
        let mut background_probabilities = Vec::with_capacity(times.len());
        for (i, &ti) in times.iter().enumerate() {
            let shares: Vec<f64> = times[..i].iter().map(|&tj| self.kernel().value(ti - tj)).collect();
            let lambda = self.mu() + shares.iter().sum::<f64>();
            let p_background = self.mu() / lambda;
            let best = shares
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (j, &g)| match best {
                    Some((_, b)) if b >= g => best,
                    _ => Some((j, g)),
                });
            let label = match best {
                Some((parent, g)) if g / lambda > p_background => {
                    EventLabel::Triggered { parent, probability: g / lambda }
                }
                _ => EventLabel::Background,
            };
            labels.push(label);
            background_probabilities.push(p_background);
        }
        Declustering { labels, background_probabilities }
    }
}
