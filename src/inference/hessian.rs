//! inference::hessian — observed-information covariance and standard errors.
//!
//! Purpose
//! -------
//! Quantify estimation uncertainty for maximum-likelihood fits. The observed
//! information is inverted with an eigen-based pseudoinverse, so weakly
//! identified directions do not blow up the whole covariance.
//!
//! Two entry points:
//! - [`calc_standard_errors`]: the model supplies its per-observation mean
//!   score `∇ℓ̄(θ)`; its Jacobian `H̄` comes from one central-difference pass
//!   and `Cov(θ̂) = (−H̄)⁺ / n`.
//! - [`calc_standard_errors_from_value`]: the model supplies only the total
//!   log-likelihood; `∇²ℓ` comes from a second-order value stencil and
//!   `Cov(θ̂) = (−∇²ℓ)⁺`.
//!
//! Conventions
//! -----------
//! - `θ` here is whatever parametrization the caller differentiates in. The
//!   EVT and Hawkes models pass their natural parameters (`ξ, σ` and
//!   `μ, α, β`) so the reported errors are on the scale users read.
//! - Eigenvalues at or below [`EIGEN_EPS`] are treated as zero.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::finite_diff::{hessian_from_grad, hessian_from_value},
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Standard errors of `theta_hat` from the Jacobian of the mean score.
///
/// # Arguments
/// - `score_mean`: `θ ↦ ∇ℓ(θ)/n`, the average per-observation score.
/// - `theta_hat`: the maximum-likelihood estimate.
/// - `n_obs`: the number of observations `n` behind the average.
///
/// # Returns
/// `√diag((−H̄)⁺ / n)`.
///
/// # Errors
/// Any error `score_mean` raises inside the stencil, or a Hessian
/// validation failure.
pub fn calc_standard_errors<F>(
    score_mean: &F, theta_hat: &Array1<f64>, n_obs: usize,
) -> OptResult<Array1<f64>>
where
    F: Fn(&Array1<f64>) -> OptResult<Array1<f64>>,
{
    let cov = calc_covariance(score_mean, theta_hat, n_obs)?;
    Ok(cov.diag().mapv(f64::sqrt))
}

/// `(−H̄)⁺ / n` with `H̄` the Jacobian of `score_mean` at `theta_hat`.
///
/// # Errors
/// As [`calc_standard_errors`].
pub fn calc_covariance<F>(
    score_mean: &F, theta_hat: &Array1<f64>, n_obs: usize,
) -> OptResult<Array2<f64>>
where
    F: Fn(&Array1<f64>) -> OptResult<Array1<f64>>,
{
    let hess = hessian_from_grad(score_mean, theta_hat)?;
    let scale = n_obs.max(1) as f64;
    Ok(pseudo_inverse(&hess.mapv(|h| -h)).mapv(|c| c / scale))
}

/// Standard errors of `theta_hat` from the total log-likelihood alone.
///
/// For models without an analytic score. The Hessian uses a single
/// second-order stencil, so it is accurate to roughly `√ε` relative.
///
/// # Errors
/// Any error `loglik` raises inside the stencil, or a Hessian validation
/// failure.
pub fn calc_standard_errors_from_value<F>(
    loglik: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array1<f64>>
where
    F: Fn(&Array1<f64>) -> OptResult<f64>,
{
    let hess = hessian_from_value(loglik, theta_hat)?;
    Ok(pseudo_inverse(&hess.mapv(|h| -h)).diag().mapv(f64::sqrt))
}

/// `J⁺ = Σ_{λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k` for a symmetric `J`.
pub fn pseudo_inverse(obs_info: &Array2<f64>) -> Array2<f64> {
    let n = obs_info.nrows();
    let info = DMatrix::from_fn(n, n, |i, j| obs_info[[i, j]]);
    let eigen = info.symmetric_eigen();
    let q = &eigen.eigenvectors;
    let mut inv = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                inv[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Standard errors of a Gaussian mean match σ/√n on both paths.
    //
    // Given
    // -----
    // - n = 25 unit-variance observations, mean score x̄ − μ and total
    //   ℓ(μ) = −Σ(x_i − μ)²/2, evaluated at a mean far from zero.
    //
    // Expect
    // ------
    // - SE(μ̂) ≈ 1/5 from the score and from the value stencil.
    fn standard_errors_match_gaussian_mean_formula() {
        let data: Vec<f64> = (0..25).map(|i| 10.0 + (i as f64 - 12.0) / 10.0).collect();
        let mean = data.iter().sum::<f64>() / 25.0;
        let score = |t: &Array1<f64>| -> OptResult<Array1<f64>> { Ok(array![mean - t[0]]) };
        let loglik = |t: &Array1<f64>| -> OptResult<f64> {
            Ok(-0.5 * data.iter().map(|x| (x - t[0]).powi(2)).sum::<f64>())
        };

        let se = calc_standard_errors(&score, &array![mean], data.len()).unwrap();
        let se_value = calc_standard_errors_from_value(&loglik, &array![mean]).unwrap();

        assert_abs_diff_eq!(se[0], 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(se_value[0], 0.2, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Independent coordinates get independent standard errors.
    //
    // Given
    // -----
    // - Mean score −A(θ − θ̂) with A = diag(4, 1) and n = 1.
    //
    // Expect
    // ------
    // - SE = (0.5, 1.0).
    fn calc_standard_errors_diagonal_quadratic_matches_analytic_se() {
        let a = array![[4.0, 0.0], [0.0, 1.0]];
        let theta_hat = array![1.0, -1.0];
        let score = |t: &Array1<f64>| -> OptResult<Array1<f64>> { Ok(-a.dot(&(t - &theta_hat))) };

        let se = calc_standard_errors(&score, &theta_hat, 1).unwrap();

        assert_abs_diff_eq!(se[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(se[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Flat directions are dropped from the pseudoinverse instead of
    // producing infinities.
    //
    // Given
    // -----
    // - J = diag(4, 0).
    //
    // Expect
    // ------
    // - J⁺ = diag(0.25, 0).
    fn pseudo_inverse_drops_flat_directions() {
        let j = array![[4.0, 0.0], [0.0, 0.0]];

        let inv = pseudo_inverse(&j);

        assert_abs_diff_eq!(inv[[0, 0]], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[1, 1]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[0, 1]], 0.0, epsilon = 1e-12);
    }
}
