//! Local-search refinement of assignments.
//!
//! Both strategies explore the same neighborhood: two distinct seated
//! agents exchange resources. The objective is the total preference rank
//! of the seated agents (0 = everyone at their favourite).

mod problem;

pub use problem::{AssignmentProblem, SwapMove};

use crate::error::Result;
use crate::model::{Assignment, Dataset};
use crate::sa::{SaConfig, SaResult, SaRunner};
use crate::tabu::{TabuConfig, TabuResult, TabuRunner};
use rand::Rng;

/// Refines `initial` with simulated annealing.
///
/// # Errors
///
/// Fails if `initial` is not a valid assignment for `dataset` or the
/// configuration does not validate.
pub fn simulated_annealing<R: Rng>(
    dataset: &Dataset,
    initial: &Assignment,
    config: &SaConfig,
    rng: &mut R,
) -> Result<SaResult<Assignment>> {
    let problem = AssignmentProblem::new(dataset, initial)?;
    SaRunner::run(&problem, initial.clone(), config, rng)
}

/// Refines `initial` with tabu search.
///
/// # Errors
///
/// Fails if `initial` is not a valid assignment for `dataset`.
pub fn tabu_search<R: Rng>(
    dataset: &Dataset,
    initial: &Assignment,
    config: &TabuConfig,
    rng: &mut R,
) -> Result<TabuResult<Assignment>> {
    let problem = AssignmentProblem::new(dataset, initial)?;
    Ok(TabuRunner::run(&problem, initial.clone(), config, rng))
}
