//! Entry point for maximizing a [`LogLikelihood`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome},
        types::Theta,
    },
};

/// Maximize `ℓ(θ)` with L-BFGS from `theta0`.
///
/// Runs `f.check` once, then minimizes `-ℓ` with the line search chosen in
/// `opts`. Hitting `max_iter` or `max_time` is not an error: the best
/// iterate is returned with `converged == false`.
///
/// # Errors
/// Errors from `f.check`, solver construction, or the run itself.
///
/// # Example
/// ```
/// use ndarray::array;
/// use rust_riskquant::optimization::errors::OptResult;
/// use rust_riskquant::optimization::loglik_optimizer::{
///     LogLikelihood, MLEOptions, Theta, maximize,
/// };
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-(theta[0] - 1.0).powi(2) - (theta[1] + 2.0).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.0, 0.0], &(), &MLEOptions::default()).unwrap();
/// assert!((out.theta_hat[0] - 1.0).abs() < 1e-4);
/// assert!((out.theta_hat[1] + 2.0).abs() < 1e-4);
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
