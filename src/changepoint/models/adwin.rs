//! ADWIN2 adaptive windowing over an exponential histogram.
//!
//! Buckets live in an arena of rows: row `r` holds up to `M` buckets that
//! each summarise `2^r` observations (count, sum, centred sum of squares).
//! Within a row buckets are ordered oldest first, and every bucket in row
//! `r + 1` is older than every bucket in row `r`. When a row overflows its
//! two oldest buckets merge into the newest slot of the next row, so the
//! arena holds `O(M log n)` buckets.
//!
//! After each insertion the bucket boundaries are scanned from the oldest
//! end. With `n0`, `n1` observations and means `μ̂0`, `μ̂1` on either side,
//! the window is cut when
//!
//! `|μ̂0 − μ̂1| ≥ √(2/m · σ̂²_W · ln(2 ln n / δ)) + 2/(3m) · ln(2 ln n / δ)`,
//! `1/m = 1/n0 + 1/n1`,
//!
//! where `σ̂²_W` is the variance of the whole window. Cutting drops the
//! older sub-window and is reported as an alarm.
use crate::changepoint::{
    core::{
        decision::{Decision, DetectorState},
        options::{AdwinConfig, ResetPolicy},
    },
    models::monitor::{Monitor, OnlineStatistic},
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Bucket {
    count: u64,
    sum: f64,
    /// Σ (x − mean)² over the bucket.
    m2: f64,
}

impl Bucket {
    fn single(x: f64) -> Self {
        Self { count: 1, sum: x, m2: 0.0 }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.sum / self.count as f64 }
    }

    /// Chan et al. pairwise combination.
    fn merge(&self, other: &Bucket) -> Bucket {
        if self.count == 0 {
            return *other;
        }
        if other.count == 0 {
            return *self;
        }
        let (na, nb) = (self.count as f64, other.count as f64);
        let d = other.mean() - self.mean();
        Bucket {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            m2: self.m2 + other.m2 + d * d * na * nb / (na + nb),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Adwin {
    cfg: AdwinConfig,
    rows: Vec<Vec<Bucket>>,
    total: Bucket,
}

pub type AdwinDetector = Monitor<Adwin>;

impl Adwin {
    pub fn new(cfg: AdwinConfig) -> Self {
        Self { cfg, rows: Vec::new(), total: Bucket::default() }
    }

    pub fn config(&self) -> &AdwinConfig {
        &self.cfg
    }

    pub fn width(&self) -> u64 {
        self.total.count
    }

    pub fn mean(&self) -> f64 {
        self.total.mean()
    }

    /// Population variance of the current window.
    pub fn variance(&self) -> f64 {
        if self.total.count == 0 { 0.0 } else { (self.total.m2 / self.total.count as f64).max(0.0) }
    }

    pub fn bucket_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    fn insert(&mut self, x: f64) {
        if self.rows.is_empty() {
            self.rows.push(Vec::with_capacity(self.cfg.max_buckets + 1));
        }
        self.rows[0].push(Bucket::single(x));
        self.total = self.total.merge(&Bucket::single(x));
        let mut r = 0;
        while r < self.rows.len() && self.rows[r].len() > self.cfg.max_buckets {
            let older = self.rows[r].remove(0);
            let newer = self.rows[r].remove(0);
            if r + 1 == self.rows.len() {
                self.rows.push(Vec::with_capacity(self.cfg.max_buckets + 1));
            }
            self.rows[r + 1].push(older.merge(&newer));
            r += 1;
        }
    }

    /// Buckets from oldest to newest.
    fn oldest_first(&self) -> impl Iterator<Item = &Bucket> {
        self.rows.iter().rev().flat_map(|row| row.iter())
    }

    /// Number of oldest buckets to drop, if any boundary violates the bound.
    fn find_cut(&self) -> Option<usize> {
        let n = self.total.count;
        let min = self.cfg.min_window;
        if n < 2 * min {
            return None;
        }
        let nf = n as f64;
        let log_term = (2.0 * nf.ln() / self.cfg.delta).ln();
        let var_w = self.variance();
        let mut head = Bucket::default();
        let buckets: Vec<&Bucket> = self.oldest_first().collect();
        for (idx, bucket) in buckets.iter().enumerate().take(buckets.len().saturating_sub(1)) {
            head = head.merge(bucket);
            let n0 = head.count;
            let n1 = n - n0;
            if n0 < min {
                continue;
            }
            if n1 < min {
                break;
            }
            let mean0 = head.mean();
            let mean1 = (self.total.sum - head.sum) / n1 as f64;
            let m_recip = 1.0 / n0 as f64 + 1.0 / n1 as f64;
            let eps =
                (2.0 * m_recip * var_w * log_term).sqrt() + 2.0 / 3.0 * m_recip * log_term;
            if (mean0 - mean1).abs() >= eps {
                return Some(idx + 1);
            }
        }
        None
    }

    /// Remove the `k` oldest buckets and rebuild the window summary.
    fn drop_oldest(&mut self, mut k: usize) -> u64 {
        let mut dropped = 0;
        while k > 0 {
            let Some(row) = self.rows.last_mut() else { break };
            if row.is_empty() {
                self.rows.pop();
                continue;
            }
            dropped += row.remove(0).count;
            k -= 1;
        }
        while self.rows.last().is_some_and(Vec::is_empty) {
            self.rows.pop();
        }
        self.total = self.oldest_first().fold(Bucket::default(), |acc, b| acc.merge(b));
        dropped
    }
}

impl AdwinDetector {
    pub fn adwin(cfg: AdwinConfig, policy: ResetPolicy) -> Self {
        Monitor::new(Adwin::new(cfg), policy)
    }
}

impl OnlineStatistic for Adwin {
    /// Insert, then cut repeatedly until no boundary violates the bound.
    fn step(&mut self, value: f64) -> Decision {
        self.insert(value);
        let mut dropped = 0;
        while let Some(k) = self.find_cut() {
            dropped += self.drop_oldest(k);
        }
        if dropped > 0 { Decision::Drift { dropped } } else { Decision::Continue }
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.total = Bucket::default();
    }

    /// The cut already discarded the pre-change data; the remaining window
    /// describes the new regime and is kept.
    fn rearm(&mut self) {}

    fn snapshot(&self) -> DetectorState {
        DetectorState::Adwin {
            width: self.width(),
            mean: self.mean(),
            variance: self.variance(),
            buckets: self.bucket_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changepoint::models::monitor::ChangeDetector;
    use approx::assert_abs_diff_eq;

    #[test]
    // Purpose
    // -------
    // Bucket merging preserves count, mean and variance of the window and
    // keeps at most `M` buckets per row.
    //
    // Given
    // -----
    // - 100 observations 0, 1, ..., 99 with M = 5 and a δ too small to cut.
    //
    // Expect
    // ------
    // - Width 100, mean 49.5, population variance (100² − 1)/12, every row
    //   holding at most 5 buckets and row sizes 2^r.
    fn buckets_preserve_window_summary() {
        let cfg = AdwinConfig::new(1e-12, 5, 5).unwrap();
        let mut adwin = Adwin::new(cfg);

        for i in 0..100 {
            adwin.insert(i as f64);
        }

        assert_eq!(adwin.width(), 100);
        assert_abs_diff_eq!(adwin.mean(), 49.5, epsilon = 1e-12);
        assert_abs_diff_eq!(adwin.variance(), (100.0 * 100.0 - 1.0) / 12.0, epsilon = 1e-9);
        for (r, row) in adwin.rows.iter().enumerate() {
            assert!(row.len() <= 5);
            assert!(row.iter().all(|b| b.count == 1 << r));
        }
        assert!(adwin.bucket_count() <= 5 * 7);
    }

    #[test]
    // Purpose
    // -------
    // A constant stream never cuts.
    //
    // Given
    // -----
    // - 500 observations equal to 3.0.
    //
    // Expect
    // ------
    // - No alarm; width 500 and zero variance.
    fn constant_stream_never_cuts() {
        let mut det = AdwinDetector::adwin(AdwinConfig::default(), ResetPolicy::Automatic);

        let alarms = (0..500).filter(|_| det.update(3.0).unwrap().triggered).count();

        assert_eq!(alarms, 0);
        match det.state() {
            DetectorState::Adwin { width, variance, .. } => {
                assert_eq!(width, 500);
                assert_abs_diff_eq!(variance, 0.0);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // A jump in level triggers a cut that drops the old regime.
    //
    // Given
    // -----
    // - 200 zeros then ones, δ = 0.01.
    //
    // Expect
    // ------
    // - An alarm within 20 observations of the jump; the cut drops most of
    //   the zeros, so the window mean moves well above its pre-cut value.
    fn level_shift_cuts_old_regime() {
        let cfg = AdwinConfig::new(0.01, 5, 5).unwrap();
        let mut det = AdwinDetector::adwin(cfg, ResetPolicy::Automatic);
        for _ in 0..200 {
            assert!(!det.update(0.0).unwrap().triggered);
        }

        let hit = (0..20).find(|_| det.update(1.0).unwrap().triggered);

        assert!(hit.is_some(), "no cut within 20 observations");
        let DetectorState::Adwin { width, mean, .. } = det.state() else { panic!("wrong state") };
        assert!(width < 200, "window width after cut: {width}");
        assert!(mean > 0.25, "window mean after cut: {mean}");
    }
}
