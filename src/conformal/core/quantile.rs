//! Finite-sample conformal quantiles.
//!
//! With `n` calibration scores, the upper quantile at level `1 − α` is the
//! `⌈(1 − α)(n + 1)⌉`-th smallest score, or `+∞` when that rank exceeds `n`.
//! The rank is at least 1, so the upper quantile never drops below the
//! smallest score.
//! The lower quantile at level `α` is the `⌊α(n + 1)⌋`-th smallest score, or
//! `−∞` when that rank is zero.

/// Slack absorbing round-off in `level·(n + 1)` at exact integers.
const RANK_SLACK: f64 = 1e-9;

/// `max(1, ⌈level·(n + 1)⌉)`.
pub fn upper_rank(n: usize, level: f64) -> usize {
    (level * (n + 1) as f64 - RANK_SLACK).ceil().max(1.0) as usize
}

/// `⌊level·(n + 1)⌋`.
pub fn lower_rank(n: usize, level: f64) -> usize {
    (level * (n + 1) as f64 + RANK_SLACK).floor().max(0.0) as usize
}

/// Upper conformal quantile of ascending `sorted` scores at `1 − alpha`.
pub fn upper_quantile(sorted: &[f64], alpha: f64) -> f64 {
    match upper_rank(sorted.len(), 1.0 - alpha) {
        r if r > sorted.len() => f64::INFINITY,
        r => sorted[r - 1],
    }
}

/// Lower conformal quantile of ascending `sorted` scores at `alpha`.
pub fn lower_quantile(sorted: &[f64], alpha: f64) -> f64 {
    let rank = lower_rank(sorted.len(), alpha);
    match rank {
        0 => f64::NEG_INFINITY,
        r if r > sorted.len() => f64::INFINITY,
        r => sorted[r - 1],
    }
}

/// Sorted copy of `scores`.
pub fn sorted(scores: &[f64]) -> Vec<f64> {
    let mut out = scores.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Smallest score whose cumulative normalized weight reaches `1 − alpha`,
/// with the test point's `test_weight` placed at `+∞`.
///
/// `pairs` are `(score, weight)` sorted by score; the result is `+∞` when
/// the finite scores never accumulate enough mass.
pub fn weighted_upper_quantile(pairs: &[(f64, f64)], test_weight: f64, alpha: f64) -> f64 {
    let total = pairs.iter().map(|(_, w)| w).sum::<f64>() + test_weight;
    if !(total > 0.0) {
        return f64::INFINITY;
    }
    let target = 1.0 - alpha;
    let mut cumulative = 0.0;
    for &(score, weight) in pairs {
        cumulative += weight / total;
        if cumulative >= target - RANK_SLACK {
            return score;
        }
    }
    f64::INFINITY
}
