//! L-BFGS solver construction.
//!
//! Builders apply the history size and the gradient / cost tolerances from
//! [`MLEOptions`]. Initial parameters, iteration and time caps are runtime
//! concerns handled by [`run_lbfgs`](super::run::run_lbfgs).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    build_lbfgs(HagerZhangLS::new(), opts)
}

pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    build_lbfgs(MoreThuenteLS::new(), opts)
}

/// Pair `line_search` with an L-BFGS solver and apply tolerances.
///
/// # Errors
/// Argmin rejections of a tolerance, converted into `OptError`.
fn build_lbfgs<L>(line_search: L, opts: &MLEOptions) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let mut solver = LBFGS::new(line_search, mem);
    if let Some(tol) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(tol)?;
    }
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(tol)?;
    }
    Ok(solver)
}
