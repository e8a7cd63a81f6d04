//! Finite-difference gradients and Hessians with validation.
//!
//! - [`run_fd_diff`]: forward-difference gradient with error capture.
//! - [`compute_hessian`]: Hessian from a gradient map, central first and
//!   forward as fallback, symmetrized.
//! - [`hessian_from_grad`]: [`compute_hessian`] for a fallible gradient
//!   map such as a model's analytic score.
//! - [`hessian_from_value`]: second-order stencil on a fallible scalar
//!   function, for models without an analytic gradient.
//!
//! Differencing a finite-difference gradient again loses every significant
//! digit (the two `√ε` steps leave a rounding error of order `|f|`), so
//! value-only Hessians use one stencil with step `ε^{1/4}·max(1, |θ_i|)`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// `func` reports failures by writing into `closure_err` and returning
/// `NaN`. The slot is cleared first; a captured error wins over the
/// gradient validation result.
///
/// # Errors
/// The captured closure error, or a [`validate_grad`] failure.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Hessian of the function whose gradient map is `f`, evaluated at `theta`.
///
/// # Errors
/// [`validate_hessian`] failures of the forward-difference fallback.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

/// Hessian from a fallible gradient map.
///
/// # Arguments
/// - `grad`: gradient of the scalar function, e.g. an analytic mean score.
/// - `theta`: evaluation point.
///
/// # Returns
/// The symmetrized Jacobian of `grad` at `theta`.
///
/// # Errors
/// The first error `grad` raises anywhere in the stencil, otherwise
/// [`compute_hessian`] failures.
pub fn hessian_from_grad<F>(grad: &F, theta: &Theta) -> OptResult<Hessian>
where
    F: Fn(&Theta) -> OptResult<Grad>,
{
    let closure_err = RefCell::new(None);
    let grad_fn = |x: &Theta| -> Grad {
        grad(x).unwrap_or_else(|e| {
            let mut slot = closure_err.borrow_mut();
            if slot.is_none() {
                *slot = Some(e);
            }
            Grad::from_elem(x.len(), f64::NAN)
        })
    };
    let hess = compute_hessian(&grad_fn, theta);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    hess
}

/// Hessian of a fallible scalar function by second-order central
/// differences.
///
/// With `h_i = ε^{1/4}·max(1, |θ_i|)`,
///
/// - `H_ii = (f(θ + h_i e_i) − 2f(θ) + f(θ − h_i e_i)) / h_i²`;
/// - `H_ij = (f(++) − f(+−) − f(−+) + f(−−)) / (4 h_i h_j)`.
///
/// # Errors
/// The first error `f` raises anywhere in the stencil, or a
/// [`validate_hessian`] failure.
pub fn hessian_from_value<F>(f: &F, theta: &Theta) -> OptResult<Hessian>
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    let dim = theta.len();
    let steps: Vec<f64> =
        theta.iter().map(|t| f64::EPSILON.powf(0.25) * t.abs().max(1.0)).collect();
    let eval = |shifts: &[(usize, f64)]| -> OptResult<f64> {
        let mut x = theta.clone();
        for &(i, delta) in shifts {
            x[i] += delta;
        }
        f(&x)
    };
    let center = f(theta)?;
    let mut hess = Hessian::zeros((dim, dim));
    for i in 0..dim {
        let hi = steps[i];
        let plus = eval(&[(i, hi)])?;
        let minus = eval(&[(i, -hi)])?;
        hess[[i, i]] = (plus - 2.0 * center + minus) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let pp = eval(&[(i, hi), (j, hj)])?;
            let pm = eval(&[(i, hi), (j, -hj)])?;
            let mp = eval(&[(i, -hi), (j, hj)])?;
            let mm = eval(&[(i, -hi), (j, -hj)])?;
            let cross = (pp - pm - mp + mm) / (4.0 * hi * hj);
            hess[[i, j]] = cross;
            hess[[j, i]] = cross;
        }
    }
    validate_hessian(&hess, dim)?;
    Ok(hess)
}

fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
