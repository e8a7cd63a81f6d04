//! Excitation kernels `g(t)` for Hawkes intensities.
//!
//! A kernel is injected into the model as a value implementing
//! [`ExcitationKernel`]. Implementations must be non-negative and
//! non-increasing on `[0, ∞)`: Ogata thinning uses the intensity just after
//! the current time as its dominating bound.
use crate::hawkes::errors::{HawkesError, HawkesResult};

/// Triggering kernel of a univariate Hawkes process.
pub trait ExcitationKernel: Clone + std::fmt::Debug {
    /// Names of the natural parameters, in [`params`](Self::params) order.
    fn param_names(&self) -> &'static [&'static str];

    /// Natural parameters.
    fn params(&self) -> Vec<f64>;

    /// A kernel of the same family with new natural parameters.
    ///
    /// # Errors
    /// [`HawkesError::InvalidParameter`] outside the family's domain, and
    /// [`HawkesError::ThetaLengthMismatch`] for the wrong count.
    fn with_params(&self, params: &[f64]) -> HawkesResult<Self>;

    /// `g(t)` for `t ≥ 0`.
    fn value(&self, t: f64) -> f64;

    /// `G(t) = ∫₀ᵗ g(s) ds`.
    fn integral(&self, t: f64) -> f64;

    /// `∫₀^∞ g(s) ds`, the expected number of direct offspring.
    fn branching_ratio(&self) -> f64;

    /// `Σ_{j<i} g(t_i − t_j)` for every event `i`.
    fn excitations(&self, times: &[f64]) -> Vec<f64> {
        times
            .iter()
            .enumerate()
            .map(|(i, &ti)| times[..i].iter().map(|&tj| self.value(ti - tj)).sum())
            .collect()
    }

    /// `∂/∂p_k Σ_{j<i} g(t_i − t_j)`, one row per event, for families with
    /// closed-form derivatives. `None` makes callers fall back to finite
    /// differences.
    fn excitation_gradients(&self, _times: &[f64]) -> Option<Vec<Vec<f64>>> {
        None
    }

    /// `∂G(t)/∂p_k`, available exactly when
    /// [`excitation_gradients`](Self::excitation_gradients) is.
    fn integral_gradient(&self, _t: f64) -> Option<Vec<f64>> {
        None
    }

    /// `Σ_{j<i} G(t_i − t_j)` for every event `i`.
    fn integrated_excitations(&self, times: &[f64]) -> Vec<f64> {
        times
            .iter()
            .enumerate()
            .map(|(i, &ti)| times[..i].iter().map(|&tj| self.integral(ti - tj)).sum())
            .collect()
    }
}

fn check_count(params: &[f64], expected: usize) -> HawkesResult<()> {
    if params.len() != expected {
        return Err(HawkesError::ThetaLengthMismatch { expected, actual: params.len() });
    }
    Ok(())
}

fn require_positive(name: &'static str, value: f64) -> HawkesResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HawkesError::InvalidParameter {
            name,
            value,
            reason: "must be finite and strictly positive",
        });
    }
    Ok(value)
}

fn require_non_negative(name: &'static str, value: f64) -> HawkesResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(HawkesError::InvalidParameter {
            name,
            value,
            reason: "must be finite and non-negative",
        });
    }
    Ok(value)
}

/// `g(t) = α e^{−βt}`, branching ratio `α/β`.
///
/// Excitation sums use the recursion
/// `R_i = e^{−β(t_i − t_{i−1})}(1 + R_{i−1})`, so likelihoods are O(n).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialKernel {
    pub alpha: f64,
    pub beta: f64,
}

impl ExponentialKernel {
    /// # Errors
    /// [`HawkesError::InvalidParameter`] for `α < 0` or `β ≤ 0`.
    pub fn new(alpha: f64, beta: f64) -> HawkesResult<Self> {
        Ok(Self {
            alpha: require_non_negative("alpha", alpha)?,
            beta: require_positive("beta", beta)?,
        })
    }

    /// `R_i = Σ_{j<i} e^{−β(t_i − t_j)}`.
    fn decayed_counts(&self, times: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(times.len());
        let mut r = 0.0;
        let mut prev: Option<f64> = None;
        for &t in times {
            if let Some(p) = prev {
                r = (-self.beta * (t - p)).exp() * (1.0 + r);
            }
            out.push(r);
            prev = Some(t);
        }
        out
    }
}

impl ExponentialKernel {
    /// `(R_i, ∂R_i/∂β)` with
    /// `∂R_i/∂β = e^{−βΔ}(∂R_{i−1}/∂β − Δ(1 + R_{i−1}))`.
    fn decayed_counts_with_slope(&self, times: &[f64]) -> Vec<(f64, f64)> {
        let mut out = Vec::with_capacity(times.len());
        let (mut r, mut dr) = (0.0, 0.0);
        let mut prev: Option<f64> = None;
        for &t in times {
            if let Some(p) = prev {
                let gap = t - p;
                let decay = (-self.beta * gap).exp();
                dr = decay * (dr - gap * (1.0 + r));
                r = decay * (1.0 + r);
            }
            out.push((r, dr));
            prev = Some(t);
        }
        out
    }
}

impl ExcitationKernel for ExponentialKernel {
    fn param_names(&self) -> &'static [&'static str] {
        &["alpha", "beta"]
    }

    fn params(&self) -> Vec<f64> {
        vec![self.alpha, self.beta]
    }

    fn with_params(&self, params: &[f64]) -> HawkesResult<Self> {
        check_count(params, 2)?;
        Self::new(params[0], params[1])
    }

    fn value(&self, t: f64) -> f64 {
        self.alpha * (-self.beta * t).exp()
    }

    fn integral(&self, t: f64) -> f64 {
        self.alpha / self.beta * -(-self.beta * t).exp_m1()
    }

    fn branching_ratio(&self) -> f64 {
        self.alpha / self.beta
    }

    fn excitations(&self, times: &[f64]) -> Vec<f64> {
        self.decayed_counts(times).into_iter().map(|r| self.alpha * r).collect()
    }

    fn excitation_gradients(&self, times: &[f64]) -> Option<Vec<Vec<f64>>> {
        Some(
            self.decayed_counts_with_slope(times)
                .into_iter()
                .map(|(r, dr)| vec![r, self.alpha * dr])
                .collect(),
        )
    }

    fn integral_gradient(&self, t: f64) -> Option<Vec<f64>> {
        let decay = (-self.beta * t).exp();
        let mass = -(-self.beta * t).exp_m1() / self.beta;
        Some(vec![mass, self.alpha * (t * decay - mass) / self.beta])
    }

    fn integrated_excitations(&self, times: &[f64]) -> Vec<f64> {
        let scale = self.alpha / self.beta;
        self.decayed_counts(times)
            .into_iter()
            .enumerate()
            .map(|(i, r)| scale * (i as f64 - r))
            .collect()
    }
}

/// `g(t) = α/(1 + t/τ)^{1+θ}`, branching ratio `ατ/θ`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerLawKernel {
    pub alpha: f64,
    pub tau: f64,
    pub theta: f64,
}

impl PowerLawKernel {
    /// # Errors
    /// [`HawkesError::InvalidParameter`] for `α < 0`, `τ ≤ 0` or `θ ≤ 0`.
    pub fn new(alpha: f64, tau: f64, theta: f64) -> HawkesResult<Self> {
        Ok(Self {
            alpha: require_non_negative("alpha", alpha)?,
            tau: require_positive("tau", tau)?,
            theta: require_positive("theta", theta)?,
        })
    }
}

impl ExcitationKernel for PowerLawKernel {
    fn param_names(&self) -> &'static [&'static str] {
        &["alpha", "tau", "theta"]
    }

    fn params(&self) -> Vec<f64> {
        vec![self.alpha, self.tau, self.theta]
    }

    fn with_params(&self, params: &[f64]) -> HawkesResult<Self> {
        check_count(params, 3)?;
        Self::new(params[0], params[1], params[2])
    }

    fn value(&self, t: f64) -> f64 {
        self.alpha * (-(1.0 + self.theta) * (t / self.tau).ln_1p()).exp()
    }

    fn integral(&self, t: f64) -> f64 {
        let tail = (-self.theta * (t / self.tau).ln_1p()).exp();
        self.alpha * self.tau / self.theta * (1.0 - tail)
    }

    fn branching_ratio(&self) -> f64 {
        self.alpha * self.tau / self.theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    // Purpose
    // -------
    // The exponential recursion matches the naive O(n²) sums.
    //
    // Given
    // -----
    // - α = 0.7, β = 1.3 and irregular times.
    //
    // Expect
    // ------
    // - Recursive excitations and integrated excitations agree with the
    //   trait's default double loop.
    fn exponential_recursion_matches_naive_sums() {
        #[derive(Debug, Clone)]
        struct Naive(ExponentialKernel);
        impl ExcitationKernel for Naive {
            fn param_names(&self) -> &'static [&'static str] {
                self.0.param_names()
            }
            fn params(&self) -> Vec<f64> {
                self.0.params()
            }
            fn with_params(&self, params: &[f64]) -> HawkesResult<Self> {
                Ok(Naive(self.0.with_params(params)?))
            }
            fn value(&self, t: f64) -> f64 {
                self.0.value(t)
            }
            fn integral(&self, t: f64) -> f64 {
                self.0.integral(t)
            }
            fn branching_ratio(&self) -> f64 {
                self.0.branching_ratio()
            }
        }
        let kernel = ExponentialKernel::new(0.7, 1.3).unwrap();
        let naive = Naive(kernel);
        let times = [0.1, 0.4, 0.45, 2.0, 2.2, 5.0];

        let fast = kernel.excitations(&times);
        let slow = naive.excitations(&times);
        let fast_int = kernel.integrated_excitations(&times);
        let slow_int = naive.integrated_excitations(&times);

        for i in 0..times.len() {
            assert_abs_diff_eq!(fast[i], slow[i], epsilon = 1e-12);
            assert_abs_diff_eq!(fast_int[i], slow_int[i], epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Integrals converge to the branching ratio.
    //
    // Given
    // -----
    // - Exponential (0.5, 1) and power-law (0.4, 2, 1.5) kernels.
    //
    // Expect
    // ------
    // - Branching ratios 0.5 and 0.4·2/1.5; G(t) approaches them for
    //   large t and G(0) = 0.
    fn integrals_approach_branching_ratio() {
        let exp = ExponentialKernel::new(0.5, 1.0).unwrap();
        let pow = PowerLawKernel::new(0.4, 2.0, 1.5).unwrap();

        assert_abs_diff_eq!(exp.branching_ratio(), 0.5);
        assert_abs_diff_eq!(exp.integral(0.0), 0.0);
        assert_abs_diff_eq!(exp.integral(50.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pow.branching_ratio(), 0.4 * 2.0 / 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pow.integral(0.0), 0.0);
        assert_abs_diff_eq!(pow.integral(1e9), pow.branching_ratio(), epsilon = 1e-6);
        assert_abs_diff_eq!(pow.value(0.0), 0.4, epsilon = 1e-15);
        assert_abs_diff_eq!(pow.value(2.0), 0.4 * 2.0_f64.powf(-2.5), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Parameter domains are enforced by name.
    //
    // Given
    // -----
    // - β = 0, α = −0.1, and a wrong-length parameter vector.
    //
    // Expect
    // ------
    // - InvalidParameter naming the parameter, and ThetaLengthMismatch.
    fn kernel_parameters_are_validated() {
        assert!(matches!(
            ExponentialKernel::new(0.5, 0.0),
            Err(HawkesError::InvalidParameter { name: "beta", .. })
        ));
        assert!(matches!(
            PowerLawKernel::new(-0.1, 1.0, 1.0),
            Err(HawkesError::InvalidParameter { name: "alpha", .. })
        ));
        let kernel = ExponentialKernel::new(0.5, 1.0).unwrap();
        assert_eq!(
            kernel.with_params(&[1.0]),
            Err(HawkesError::ThetaLengthMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Closed-form exponential derivatives match central differences.
    //
    // Given
    // -----
    // - α = 0.7, β = 1.3, irregular times and lag t = 2.5.
    //
    // Expect
    // ------
    // - ∂/∂α and ∂/∂β of the excitations and of G(t) agree to 1e-7; the
    //   power-law family reports no closed form.
    fn exponential_gradients_match_finite_differences() {
        let times = [0.1, 0.4, 0.45, 2.0, 2.2, 5.0];
        let h = 1e-6;
        let at = |alpha: f64, beta: f64| ExponentialKernel::new(alpha, beta).unwrap();
        let kernel = at(0.7, 1.3);

        let grads = kernel.excitation_gradients(&times).unwrap();
        let int_grad = kernel.integral_gradient(2.5).unwrap();

        let shifts = [(h, 0.0), (0.0, h)];
        for (k, (da, db)) in shifts.into_iter().enumerate() {
            let up = at(0.7 + da, 1.3 + db);
            let down = at(0.7 - da, 1.3 - db);
            let ex_up = up.excitations(&times);
            let ex_down = down.excitations(&times);
            for i in 0..times.len() {
                assert_abs_diff_eq!(grads[i][k], (ex_up[i] - ex_down[i]) / (2.0 * h), epsilon = 1e-7);
            }
            let fd_int = (up.integral(2.5) - down.integral(2.5)) / (2.0 * h);
            assert_abs_diff_eq!(int_grad[k], fd_int, epsilon = 1e-7);
        }
        let power = PowerLawKernel::new(0.5, 1.0, 1.5).unwrap();
        assert!(power.excitation_gradients(&times).is_none());
        assert!(power.integral_gradient(1.0).is_none());
    }
}
