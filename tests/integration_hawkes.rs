//! Integration tests for the self-exciting (Hawkes) point process.
//!
//! Purpose
//! -------
//! - Validate simulate → fit → diagnose on seeded realizations.
//!
//! Coverage
//! --------
//! - Parameter recovery by MLE and EM from an Ogata-simulated sequence.
//! - Time-rescaling goodness of fit and declustering on the fitted model.
//! - Stability reporting on explosive data; power-law fits; idempotence.
//! - Standard errors against the generating parameters.
//!
//! Exclusions
//! ----------
//! - Kernel integrals, recursions and validation, covered by unit tests.
//!
//! Tolerance bands
//! ---------------
//! With μ = 0.1, α = 0.5, β = 1 and T = 1000 a realization holds about 200
//! events, so recovered parameters are checked against wide bands:
//! μ̂ ∈ [0.03, 0.3], α̂/β̂ ∈ [0.15, 0.85], β̂ ∈ [0.2, 5].
use rust_riskquant::hawkes::{
    EmOptions, EventLabel, EventSequence, ExcitationKernel, ExponentialKernel, FitMethod,
    HawkesModel, HawkesOptions, HawkesProcess, PowerLawKernel,
};

/// Purpose
/// -------
/// The reference realization: μ = 0.1, α = 0.5, β = 1 on [0, 1000], seed 42.
fn reference_events() -> EventSequence {
    let kernel = ExponentialKernel::new(0.5, 1.0).expect("valid kernel");
    HawkesModel::new(0.1, kernel)
        .and_then(|m| m.simulate(1000.0, 42))
        .expect("subcritical simulation terminates")
}

/// Purpose
/// -------
/// Assert recovered exponential-kernel parameters lie in the documented bands.
fn assert_in_bands(mu: f64, kernel: &ExponentialKernel) {
    let n = kernel.branching_ratio();
    assert!((0.03..=0.3).contains(&mu), "mu = {mu}");
    assert!((0.15..=0.85).contains(&n), "alpha/beta = {n}");
    assert!((0.2..=5.0).contains(&kernel.beta), "beta = {}", kernel.beta);
}

#[test]
// Purpose
// -------
// MLE recovers the generating parameters and passes the residual test.
//
// Given
// -----
// - The seeded reference realization.
//
// Expect
// ------
// - Parameters within the documented bands; a stable fit.
// - KS p-value of the rescaled gaps above 0.001.
fn mle_round_trip_recovers_parameters() {
    let events = reference_events();
    assert!(events.len() > 50, "only {} events", events.len());

    let template = ExponentialKernel::new(0.3, 2.0).unwrap();
    let fit = HawkesProcess::new(template, HawkesOptions::default())
        .fit(&events)
        .expect("MLE should converge");
    let gof = fit.goodness_of_fit().expect("residuals are valid");

    assert_in_bands(fit.mu(), fit.kernel());
    assert!(fit.stable());
    assert_eq!(fit.method(), FitMethod::Mle);
    assert!(gof.p_value() > 0.001, "p = {}", gof.p_value());
}

#[test]
// Purpose
// -------
// EM reaches the same region as MLE and satisfies the count identity.
//
// Given
// -----
// - The reference realization; EM with up to 5000 sweeps at tol 1e-5.
//
// Expect
// ------
// - Parameters within the bands.
// - The compensator at T within 5% of the event count.
fn em_round_trip_recovers_parameters() {
    let events = reference_events();
    let opts = HawkesOptions::new(
        HawkesOptions::default().mle,
        EmOptions::new(5000, 1e-5).unwrap(),
    );
    let fit = HawkesProcess::new(ExponentialKernel::new(0.3, 2.0).unwrap(), opts)
        .fit_em(&events)
        .expect("EM should converge");

    assert_in_bands(fit.mu(), fit.kernel());
    assert_eq!(fit.method(), FitMethod::Em);
    let count = events.len() as f64;
    let lambda_total = fit.compensator(events.horizon());
    assert!((lambda_total - count).abs() / count < 0.05, "Λ(T) = {lambda_total}, N = {count}");
}

#[test]
// Purpose
// -------
// An explosive realization is still fitted, by MLE and by EM, but flagged
// as unstable.
//
// Given
// -----
// - A simulation with μ = 1, α = 2, β = 1 (branching ratio 2) on [0, 5],
//   seed 3.
// - Both fits started from the subcritical template α = 0.5, β = 1.
//
// Expect
// ------
// - Both fits succeed with branching ratio ≥ 1, `stable() == false` and no
//   stationary intensity.
fn explosive_data_is_flagged_unstable() {
    let kernel = ExponentialKernel::new(2.0, 1.0).unwrap();
    let events = HawkesModel::new(1.0, kernel).unwrap().simulate(5.0, 3).unwrap();
    assert!(events.len() >= 10, "only {} events", events.len());
    let opts = HawkesOptions::new(
        HawkesOptions::default().mle,
        EmOptions::new(5000, 1e-5).unwrap(),
    );
    let process = HawkesProcess::new(ExponentialKernel::new(0.5, 1.0).unwrap(), opts);

    let mle = process.fit(&events).expect("MLE should fit explosive data");
    let em = process.fit_em(&events).expect("EM should fit explosive data");

    for fit in [&mle, &em] {
        assert!(fit.branching_ratio() >= 1.0, "n = {}", fit.branching_ratio());
        assert!(!fit.stable());
        assert!(fit.stationary_intensity().is_none());
    }
}

#[test]
// Purpose
// -------
// Standard errors of the exponential fit are consistent with the truth.
//
// Given
// -----
// - The reference realization (μ = 0.1, α = 0.5, β = 1) and its MLE fit.
//
// Expect
// ------
// - Finite positive standard errors, each below the parameter scale.
// - SE(μ̂) within a factor of three of √(μ̂/T), the error of a Poisson
//   estimate of the cluster rate.
// - Every true parameter within four standard errors of its estimate.
fn standard_errors_cover_generating_parameters() {
    let events = reference_events();
    let fit = HawkesProcess::new(ExponentialKernel::new(0.3, 2.0).unwrap(), HawkesOptions::default())
        .fit(&events)
        .expect("MLE should converge");

    let se = fit.standard_errors().expect("observed information is invertible");
    let estimate = [fit.mu(), fit.kernel().alpha, fit.kernel().beta];
    let truth = [0.1, 0.5, 1.0];

    assert_eq!(se.len(), 3);
    for k in 0..3 {
        assert!(se[k].is_finite() && se[k] > 0.0, "se[{k}] = {}", se[k]);
        assert!(se[k] < estimate[k].max(truth[k]), "se[{k}] = {}", se[k]);
        assert!((estimate[k] - truth[k]).abs() < 4.0 * se[k], "k = {k}, se = {}", se[k]);
    }
    let cluster_scale = (fit.mu() / events.horizon()).sqrt();
    assert!(se[0] > cluster_scale / 3.0 && se[0] < 3.0 * cluster_scale, "se(mu) = {}", se[0]);
}

#[test]
// Purpose
// -------
// Declustering partitions events and its expected background matches μT
// to within sampling error.
//
// Given
// -----
// - The reference realization and its MLE fit.
//
// Expect
// ------
// - One label per event; the first event is background.
// - Triggered parents precede their children.
// - Σ μ/λ(t_i) within 40% of μ̂T.
fn declustering_labels_are_consistent() {
    let events = reference_events();
    let fit = HawkesProcess::new(ExponentialKernel::new(0.3, 2.0).unwrap(), HawkesOptions::default())
        .fit(&events)
        .unwrap();

    let dc = fit.decluster();

    assert_eq!(dc.labels().len(), events.len());
    assert_eq!(dc.labels()[0], EventLabel::Background);
    for (i, label) in dc.labels().iter().enumerate() {
        if let EventLabel::Triggered { parent, probability } = *label {
            assert!(parent < i);
            assert!(probability > 0.0 && probability <= 1.0);
        }
    }
    let expected = fit.mu() * events.horizon();
    assert!((dc.expected_background() - expected).abs() / expected < 0.4);
    assert!(dc.background_count() <= events.len());
}

#[test]
// Purpose
// -------
// Power-law fits run end to end, and refitting the same data is idempotent.
//
// Given
// -----
// - The reference realization fitted twice with a power-law template.
//
// Expect
// ------
// - Identical fits; finite log-likelihood; positive μ̂.
fn power_law_fit_is_idempotent() {
    let events = reference_events();
    let process =
        HawkesProcess::new(PowerLawKernel::new(0.4, 1.0, 1.5).unwrap(), HawkesOptions::default());

    let a = process.fit(&events).expect("power-law MLE should converge");
    let b = process.fit(&events).unwrap();

    assert_eq!(a, b);
    assert!(a.log_likelihood().is_finite());
    assert!(a.mu() > 0.0);
}
