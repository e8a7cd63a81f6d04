//! hawkes::models — model evaluation, estimation, simulation and
//! declustering.

pub mod decluster;
pub mod em;
pub mod likelihood;
pub mod model;
pub mod process;
pub mod simulate;

pub use self::decluster::{Declustering, EventLabel};
pub use self::likelihood::HawkesLikelihood;
pub use self::model::HawkesModel;
pub use self::process::{HawkesFit, HawkesProcess, MIN_FIT_EVENTS};
