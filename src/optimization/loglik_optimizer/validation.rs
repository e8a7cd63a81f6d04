//! Validation helpers for log-likelihood optimization.
//!
//! - Tolerance checks: [`verify_tol_grad`], [`verify_tol_cost`].
//! - Gradient / Hessian checks: [`validate_grad`], [`validate_hessian`].
//! - Outcome checks: [`validate_theta_hat`], [`validate_value`].
//!
//! Each helper reports the first offending element through a dedicated
//! [`OptError`] variant.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::types::{Grad, Hessian, Theta},
};

/// Validate the optional gradient-norm tolerance (finite and `> 0` if set).
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance (finite and `> 0` if set).
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if `grad.len() != dim`.
/// - [`OptError::InvalidGradient`] for the first non-finite entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap the solver's best parameter vector.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if the solver produced none.
/// - [`OptError::InvalidThetaHat`] for the first non-finite entry.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

/// Validate that a log-likelihood value is finite (negative is fine).
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate that a Hessian is `dim × dim` with finite entries.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // Tolerance validators accept `None` and positive finite values, and
    // reject zero, negatives and non-finite values.
    //
    // Given
    // -----
    // - A mix of valid and invalid tolerance values.
    //
    // Expect
    // ------
    // - `Ok` for valid inputs and the matching error variant otherwise.
    fn tolerance_validators_accept_valid_and_reject_invalid() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::NAN)),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Gradient validation reports dimension mismatches before finiteness.
    //
    // Given
    // -----
    // - A length-2 gradient checked against dim 3, and a gradient with NaN.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` and `InvalidGradient { index: 1, .. }`.
    fn validate_grad_reports_dimension_and_non_finite_entries() {
        let g = array![1.0, 2.0];
        assert_eq!(
            validate_grad(&g, 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        );
        let g = array![1.0, f64::NAN];
        assert!(matches!(validate_grad(&g, 2), Err(OptError::InvalidGradient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Theta-hat validation unwraps finite vectors and rejects missing or
    // non-finite ones.
    //
    // Given
    // -----
    // - `None`, a vector containing infinity, and a finite vector.
    //
    // Expect
    // ------
    // - `MissingThetaHat`, `InvalidThetaHat`, and `Ok` respectively.
    fn validate_theta_hat_handles_missing_and_non_finite() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(matches!(
            validate_theta_hat(Some(array![0.0, f64::INFINITY])),
            Err(OptError::InvalidThetaHat { index: 1, .. })
        ));
        assert_eq!(validate_theta_hat(Some(array![0.5])).unwrap(), array![0.5]);
    }

    #[test]
    // Purpose
    // -------
    // Hessian validation checks shape first, then entries.
    //
    // Given
    // -----
    // - A 2×3 matrix and a 2×2 matrix with one NaN.
    //
    // Expect
    // ------
    // - `HessianDimMismatch` and `InvalidHessian` at the NaN position.
    fn validate_hessian_checks_shape_and_entries() {
        let h = Array2::<f64>::zeros((2, 3));
        assert!(matches!(validate_hessian(&h, 2), Err(OptError::HessianDimMismatch { .. })));
        let mut h = Array2::<f64>::zeros((2, 2));
        h[[1, 0]] = f64::NAN;
        assert!(matches!(
            validate_hessian(&h, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }
}
