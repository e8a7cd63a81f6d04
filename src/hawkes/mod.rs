//! hawkes — self-exciting point processes.
//!
//! Purpose
//! -------
//! Model event streams whose arrivals raise the short-term probability of
//! further arrivals: `λ(t) = μ + Σ_{t_i < t} g(t − t_i)`.
//!
//! Key behaviors
//! -------------
//! - Kernels are injected values implementing [`ExcitationKernel`]:
//!   [`ExponentialKernel`] (O(n) recursions) and [`PowerLawKernel`].
//! - [`HawkesProcess::fit`] maximizes the exact log-likelihood with the
//!   shared L-BFGS optimizer over softplus-mapped parameters;
//!   [`HawkesProcess::fit_em`] runs EM for the exponential kernel.
//! - [`HawkesModel`] evaluates intensity, compensator, time-rescaled
//!   residuals and their KS goodness of fit, simulates by Ogata thinning,
//!   and declusters events into background and triggered.
//!
//! Invariants & assumptions
//! ------------------------
//! - `μ > 0`, `α ≥ 0`, and every decay or scale parameter is positive.
//! - A branching ratio `n ≥ 1` is reported as `stable = false` with a
//!   `warn` event, never as an error.
//! - Simulation is deterministic for a fixed seed and aborts past
//!   `max_events`.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    EmOptions, EventSequence, ExcitationKernel, ExponentialKernel, FitMethod, HawkesOptions,
    PowerLawKernel, SimOpts,
};
pub use self::errors::{HawkesError, HawkesResult};
pub use self::models::{Declustering, EventLabel, HawkesFit, HawkesModel, HawkesProcess};

pub mod prelude {
    pub use super::core::{
        EventSequence, ExcitationKernel, ExponentialKernel, HawkesOptions, PowerLawKernel,
        SimOpts,
    };
    pub use super::errors::{HawkesError, HawkesResult};
    pub use super::models::{HawkesFit, HawkesModel, HawkesProcess};
}
