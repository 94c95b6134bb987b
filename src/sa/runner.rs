//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::Result;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the starting solution.
    pub initial_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost sampled at regular intervals for history tracking.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization from `initial`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration does not validate.
    pub fn run<P: SaProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult<P::Solution>> {
        Self::run_with_cancel(problem, initial, config, rng, None)
    }

    /// Runs SA with an optional cancellation token, checked once per
    /// iteration.
    pub fn run_with_cancel<P: SaProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        config.validate()?;

        let initial_cost = problem.cost(&initial);
        let mut current = initial;
        let mut current_cost = initial_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        // Cost history: sample about 100 points per run
        let history_interval = (config.iterations / 100).max(1);
        let mut cost_history = vec![best_cost];

        debug!(
            iterations = config.iterations,
            initial_temperature = config.initial_temperature,
            cooling_rate = config.cooling_rate,
            initial_cost,
            "simulated annealing started"
        );

        for _ in 0..config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let Some(neighbor) = problem.neighbor(&current, rng) else {
                break;
            };
            let neighbor_cost = problem.cost(&neighbor);
            let delta = neighbor_cost - current_cost;

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else if temperature > 0.0 {
                let probability = (-delta / temperature).exp();
                rng.random::<f64>() < probability
            } else {
                false
            };

            if accept {
                current = neighbor;
                current_cost = neighbor_cost;
                accepted_moves += 1;
            }

            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
            }

            temperature *= config.cooling_rate;
            total_iterations += 1;

            if total_iterations % history_interval == 0 {
                cost_history.push(best_cost);
            }
        }

        if cost_history
            .last()
            .map_or(true, |&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        debug!(
            iterations = total_iterations,
            best_cost,
            accepted_moves,
            improving_moves,
            cancelled,
            "simulated annealing finished"
        );

        Ok(SaResult {
            best,
            best_cost,
            initial_cost,
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cost_history,
        })
    }
}
