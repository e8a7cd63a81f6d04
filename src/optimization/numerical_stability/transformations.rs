//! Numerical stability utilities.
//!
//! Guarded versions of the nonlinear maps used to keep model parameters
//! strictly positive. The cutoffs (`|x| > 20`) keep `f64` arithmetic in a
//! well-conditioned regime, matching what common ML libraries do.

/// Eigenvalues at or below this magnitude are treated as zero when forming
/// pseudo-inverses of observed information matrices.
pub const EIGEN_EPS: f64 = 1e-10;

/// Smallest value a softplus-mapped parameter is allowed to take.
///
/// `softplus(θ)` underflows to `0.0` for `θ ≲ -745`; flooring keeps
/// `ln σ`, `ln β`, ... finite when the optimizer wanders far out.
pub const POSITIVE_FLOOR: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > 20`, `softplus(x) ≈ x` to machine precision.
/// - Otherwise `ln1p(exp(x))`, which is accurate for very negative `x`.
///
/// The result is floored at [`POSITIVE_FLOOR`].
pub fn safe_softplus(x: f64) -> f64 {
    let y = if x > 20.0 { x } else { x.exp().ln_1p() };
    y.max(POSITIVE_FLOOR)
}

/// Logistic function `1/(1 + e^{-x})`, the derivative of softplus.
///
/// Evaluated through `e^{-|x|}` so neither tail overflows.
pub fn safe_logistic(x: f64) -> f64 {
    let e = (-x.abs()).exp();
    if x >= 0.0 { 1.0 / (1.0 + e) } else { e / (1.0 + e) }
}

/// Stable inverse of softplus on `(0, ∞)`: `t = ln(exp(x) - 1)`.
///
/// Uses `ln(expm1(x))` below the cutoff and the identity above it.
/// Inputs below [`POSITIVE_FLOOR`] are clamped first.
pub fn safe_softplus_inv(x: f64) -> f64 {
    let x = x.max(POSITIVE_FLOOR);
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Softplus and its inverse agree with the naïve formulas on a safe grid
    // and invert each other.
    //
    // Given
    // -----
    // - x in [-10, 10] with step 0.5.
    //
    // Expect
    // ------
    // - softplus(x) ≈ ln(1 + e^x) and softplus_inv(softplus(x)) ≈ x.
    fn softplus_matches_naive_formula_and_inverts() {
        for i in -20..=20 {
            let x = i as f64 * 0.5;
            let naive = (1.0 + x.exp()).ln();
            assert_relative_eq!(safe_softplus(x), naive, max_relative = 1e-12);
            assert_relative_eq!(safe_softplus_inv(safe_softplus(x)), x, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Tails are finite and strictly positive.
    //
    // Given
    // -----
    // - Extreme inputs ±1000.
    //
    // Expect
    // ------
    // - softplus(1000) = 1000, softplus(-1000) = POSITIVE_FLOOR and a
    //   finite inverse at zero.
    fn transforms_are_finite_in_the_tails() {
        assert_eq!(safe_softplus(1000.0), 1000.0);
        assert_eq!(safe_softplus(-1000.0), POSITIVE_FLOOR);
        assert!(safe_softplus_inv(0.0).is_finite());
    }

    #[test]
    // Purpose
    // -------
    // The logistic function is the derivative of softplus and stays in
    // [0, 1] in both tails.
    //
    // Given
    // -----
    // - Central differences of softplus at x in {-5, 0, 3} and inputs ±800.
    //
    // Expect
    // ------
    // - Agreement to 1e-7, logistic(0) = 1/2, and limits 0 and 1.
    fn logistic_is_softplus_derivative() {
        let h = 1e-5;
        for x in [-5.0, 0.0, 3.0] {
            let fd = (safe_softplus(x + h) - safe_softplus(x - h)) / (2.0 * h);
            assert_relative_eq!(safe_logistic(x), fd, max_relative = 1e-7);
        }
        assert_eq!(safe_logistic(0.0), 0.5);
        assert_eq!(safe_logistic(800.0), 1.0);
        assert_eq!(safe_logistic(-800.0), 0.0);
    }
}
