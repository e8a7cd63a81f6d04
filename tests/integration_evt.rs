//! Integration tests for peaks-over-threshold tail estimation.
//!
//! Purpose
//! -------
//! - Validate the end-to-end EVT pipeline: threshold selection, GPD fit,
//!   risk queries, standard errors and bootstrap intervals.
//!
//! Coverage
//! --------
//! - `evt::TailRiskEstimator` with quantile, fixed and stability rules.
//! - `evt::TailModel` VaR/ES/tail-probability consistency and metrics.
//! - `TailModel::bootstrap` with an explicitly seeded RNG.
//!
//! Exclusions
//! ----------
//! - Closed-form query arithmetic and parameter maps, covered by unit tests.
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Pareto, StudentT};
use rust_riskquant::{
    evt::{BootstrapOptions, EvtError, EvtOptions, ThresholdRule, TailRiskEstimator},
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
};

/// Purpose
/// -------
/// Reproducible heavy-tailed losses: |T| with 4 degrees of freedom
/// (tail index 4, so ξ = 0.25).
fn student_losses(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = StudentT::<f64>::new(4.0).expect("valid degrees of freedom");
    (0..n).map(|_| dist.sample(&mut rng).abs()).collect()
}

#[test]
// Purpose
// -------
// VaR is monotone in p and inverts the tail probability.
//
// Given
// -----
// - 20 000 |t₄| losses; 95th-percentile threshold.
//
// Expect
// ------
// - ξ̂ in (0, 0.6); VaR non-decreasing on a grid of p;
//   tail_probability(VaR_p) = 1 − p; ES ≥ VaR; metrics agree with queries.
fn var_is_monotone_and_inverts_tail_probability() {
    let losses = student_losses(20_000, 99);
    let model = TailRiskEstimator::new(EvtOptions::default())
        .and_then(|est| est.fit(&losses))
        .expect("fit should succeed on heavy-tailed data");

    assert!(model.xi() > 0.0 && model.xi() < 0.6, "xi = {}", model.xi());
    let ps = [0.95, 0.96, 0.975, 0.99, 0.995, 0.999, 0.9999];
    let vars: Vec<f64> = ps.iter().map(|&p| model.value_at_risk(p).unwrap()).collect();
    assert!(vars.windows(2).all(|w| w[0] <= w[1]), "{vars:?}");
    for (&p, &var) in ps.iter().zip(&vars).skip(1) {
        let tail = model.tail_probability(var).expect("VaR above threshold");
        assert!((tail - (1.0 - p)).abs() < 1e-9);
        let es = model.expected_shortfall(p).unwrap();
        assert!(es >= var);
        let metrics = model.metrics(p).unwrap();
        assert_eq!(metrics.var, var);
        assert_eq!(metrics.es, Some(es));
        assert_eq!(metrics.n, 20_000);
    }
    assert_eq!(model.tail_probability(model.threshold()), None);
}

#[test]
// Purpose
// -------
// Fitting identical input twice yields identical parameters, and a
// Hager–Zhang line search reaches essentially the same optimum.
//
// Given
// -----
// - Pareto(1, 2.5) losses (ξ = 0.4) with a fixed threshold of 2.
//
// Expect
// ------
// - Bitwise-identical repeated fits; the Hager–Zhang fit within 1e-2.
fn repeated_fits_are_identical() {
    let mut rng = StdRng::seed_from_u64(4);
    let dist = Pareto::new(1.0, 2.5).unwrap();
    let losses: Vec<f64> = (0..10_000).map(|_| dist.sample(&mut rng)).collect();
    let opts = EvtOptions::new(ThresholdRule::Fixed(2.0), MLEOptions::default()).unwrap();
    let est = TailRiskEstimator::new(opts).unwrap();
    let tols = Tolerances::new(Some(1e-6), None, Some(500)).unwrap();
    let hz = MLEOptions::new(tols, LineSearcher::HagerZhang, false, None).unwrap();
    let est_hz =
        TailRiskEstimator::new(EvtOptions::new(ThresholdRule::Fixed(2.0), hz).unwrap()).unwrap();

    let a = est.fit(&losses).unwrap();
    let b = est.fit(&losses).unwrap();
    let c = est_hz.fit(&losses).unwrap();

    assert_eq!(a, b);
    assert!((a.xi() - 0.4).abs() < 0.15, "xi = {}", a.xi());
    assert!((a.xi() - c.xi()).abs() < 1e-2);
    assert!((a.sigma() - c.sigma()).abs() < 1e-2);
}

#[test]
// Purpose
// -------
// Uncertainty estimates are coherent with the point fit.
//
// Given
// -----
// - 20 000 |t₄| losses at the 95th percentile.
// - 60 bootstrap replicates at 90% confidence, seed 5.
//
// Expect
// ------
// - Finite positive standard errors for (ξ, σ), with SE(ξ) within a
//   factor of two of the asymptotic (1 + ξ̂)/√n_u.
// - A bootstrap interval for VaR(0.99) with lower < upper and at least
//   half the replicates successful.
fn standard_errors_and_bootstrap_are_coherent() {
    let losses = student_losses(20_000, 7);
    let model = TailRiskEstimator::default().fit(&losses).unwrap();

    let se = model.standard_errors().expect("observed information is invertible");
    let ci = model
        .bootstrap(|m| m.value_at_risk(0.99), &BootstrapOptions::new(60, 0.9, 5).unwrap())
        .expect("bootstrap should succeed");

    let asymptotic = (1.0 + model.xi()) / (model.n_exceed() as f64).sqrt();
    assert!(se.xi.is_finite() && se.xi > 0.5 * asymptotic && se.xi < 2.0 * asymptotic);
    assert!(se.sigma.is_finite() && se.sigma > 0.0);
    assert!(ci.lower < ci.upper);
    assert!(ci.successes >= 30);
    assert_eq!(ci.replicates, 60);
}

#[test]
// Purpose
// -------
// Queries outside the modeled tail fail with domain errors.
//
// Given
// -----
// - A fit at the 90th percentile (tail starts at p = 0.9).
//
// Expect
// ------
// - p = 0.5 → ProbabilityBelowThreshold; p = 0 → InvalidProbability.
fn queries_outside_tail_are_rejected() {
    let losses = student_losses(5_000, 3);
    let opts = EvtOptions::new(ThresholdRule::Quantile(0.9), MLEOptions::default()).unwrap();
    let model = TailRiskEstimator::new(opts).unwrap().fit(&losses).unwrap();

    assert!(matches!(
        model.value_at_risk(0.5),
        Err(EvtError::ProbabilityBelowThreshold { .. })
    ));
    assert_eq!(model.value_at_risk(0.0), Err(EvtError::InvalidProbability { p: 0.0 }));
}
