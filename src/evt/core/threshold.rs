//! Empirical quantiles and the threshold-stability grid.
use crate::evt::errors::{EvtError, EvtResult};

/// Linear-interpolation quantile of an ascending sample (Hyndman–Fan type 7).
///
/// `sorted` must be non-empty and ascending; `p` is clamped to `[0, 1]`.
pub fn sorted_quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Sort a copy of `data` and take its `p`-quantile.
pub fn empirical_quantile(data: &[f64], p: f64) -> EvtResult<f64> {
    if data.is_empty() {
        return Err(EvtError::EmptySample);
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted_quantile(&sorted, p))
}

/// `steps` evenly spaced probabilities from `lower` to `upper` inclusive.
pub fn quantile_grid(lower: f64, upper: f64, steps: usize) -> Vec<f64> {
    if steps <= 1 {
        return vec![lower];
    }
    let width = (upper - lower) / (steps - 1) as f64;
    (0..steps).map(|i| lower + i as f64 * width).collect()
}

/// Start index of the `window`-long run of shape estimates with minimum
/// sample variance. Ties keep the earliest run.
pub fn most_stable_window(shapes: &[f64], window: usize) -> Option<usize> {
    if window < 2 || shapes.len() < window {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (start, run) in shapes.windows(window).enumerate() {
        let mean = run.iter().sum::<f64>() / window as f64;
        let var = run.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
        if best.map_or(true, |(_, v)| var < v) {
            best = Some((start, var));
        }
    }
    best.map(|(start, _)| start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    // Purpose
    // -------
    // Type-7 quantiles interpolate between order statistics.
    //
    // Given
    // -----
    // - Unsorted sample {4, 1, 3, 2} and p = 0.5, 0.9, 1.0.
    //
    // Expect
    // ------
    // - 2.5, 3.7, 4.0.
    fn empirical_quantile_interpolates() {
        let data = [4.0, 1.0, 3.0, 2.0];

        assert_abs_diff_eq!(empirical_quantile(&data, 0.5).unwrap(), 2.5);
        assert_abs_diff_eq!(empirical_quantile(&data, 0.9).unwrap(), 3.7, epsilon = 1e-12);
        assert_abs_diff_eq!(empirical_quantile(&data, 1.0).unwrap(), 4.0);
    }

    #[test]
    // Purpose
    // -------
    // The grid includes both endpoints.
    //
    // Given
    // -----
    // - lower 0.8, upper 0.98, 10 steps.
    //
    // Expect
    // ------
    // - First 0.8, last 0.98, spacing 0.02.
    fn quantile_grid_includes_endpoints() {
        let grid = quantile_grid(0.8, 0.98, 10);

        assert_eq!(grid.len(), 10);
        assert_abs_diff_eq!(grid[0], 0.8);
        assert_abs_diff_eq!(grid[9], 0.98, epsilon = 1e-12);
        assert_abs_diff_eq!(grid[1] - grid[0], 0.02, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The flattest run wins and ties go to the earliest run.
    //
    // Given
    // -----
    // - Shapes {0.5, 0.1, 0.3, 0.3, 0.3, 0.3, 0.9} with window 3.
    //
    // Expect
    // ------
    // - Start index 2 (first zero-variance run).
    fn most_stable_window_prefers_flattest_then_earliest() {
        let shapes = [0.5, 0.1, 0.3, 0.3, 0.3, 0.3, 0.9];

        assert_eq!(most_stable_window(&shapes, 3), Some(2));
        assert_eq!(most_stable_window(&shapes[..2], 3), None);
    }
}
