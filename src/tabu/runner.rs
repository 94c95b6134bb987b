//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the supplied solution
//! 2. At each iteration:
//!    a. Draw one random neighbor and its move key
//!    b. If the key is tabu, skip the iteration (nothing applied, list untouched)
//!    c. Otherwise apply the move only if it strictly improves the current cost
//!    d. Push the key, evicting the oldest once the list exceeds its bound
//!    e. Update global best if improved
//! 3. Terminate after the iteration budget
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search, Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search, Part II", *ORSA Journal on Computing* 2(1), 4-32.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use super::config::TabuConfig;
use super::list::TabuList;
use super::types::TabuProblem;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Cost of the starting solution.
    pub initial_cost: f64,
    /// Total iterations executed, skipped ones included.
    pub iterations: usize,
    /// Iterations skipped because the drawn move was tabu.
    pub skipped_moves: usize,
    /// Moves applied.
    pub accepted_moves: usize,
    /// Iteration at which the best solution was found.
    pub best_iteration: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
    /// Cost history (best cost at each iteration).
    pub cost_history: Vec<f64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search from `initial`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use u_admission::tabu::{TabuConfig, TabuMove, TabuProblem, TabuRunner};
    /// use rand::rngs::StdRng;
    /// use rand::{Rng, SeedableRng};
    ///
    /// struct MyProblem;
    /// impl TabuProblem for MyProblem {
    ///     type Solution = Vec<usize>;
    ///     type MoveKey = (usize, usize);
    ///     fn cost(&self, _sol: &Vec<usize>) -> f64 { 0.0 }
    ///     fn neighbor<R: Rng>(&self, _sol: &Vec<usize>, _rng: &mut R)
    ///         -> Option<TabuMove<Vec<usize>, (usize, usize)>> { None }
    /// }
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let result = TabuRunner::run(&MyProblem, vec![0, 1, 2], &TabuConfig::default(), &mut rng);
    /// ```
    pub fn run<P: TabuProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &TabuConfig,
        rng: &mut R,
    ) -> TabuResult<P::Solution> {
        Self::run_with_cancel(problem, initial, config, rng, None)
    }

    /// Executes Tabu Search with an optional cancellation token, checked
    /// once per iteration.
    pub fn run_with_cancel<P: TabuProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &TabuConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> TabuResult<P::Solution> {
        let initial_cost = problem.cost(&initial);
        let mut current = initial;
        let mut current_cost = initial_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut best_iteration = 0;

        let mut tabu: TabuList<P::MoveKey> = TabuList::new(config.tabu_size);

        let mut cost_history = Vec::with_capacity(config.iterations);
        let mut skipped_moves = 0;
        let mut accepted_moves = 0;
        let mut cancelled = false;

        debug!(
            iterations = config.iterations,
            tabu_size = config.tabu_size,
            initial_cost,
            "tabu search started"
        );

        for iteration in 0..config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Empty neighborhood: nothing left to try.
            let Some(mv) = problem.neighbor(&current, rng) else {
                break;
            };

            if tabu.contains(&mv.key) {
                skipped_moves += 1;
                cost_history.push(best_cost);
                continue;
            }

            let cost = problem.cost(&mv.solution);
            if cost < current_cost {
                current = mv.solution;
                current_cost = cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                    best_iteration = iteration;
                }
            }

            tabu.push(mv.key);
            cost_history.push(best_cost);
        }

        debug!(
            iterations = cost_history.len(),
            best_cost,
            accepted_moves,
            skipped_moves,
            cancelled,
            "tabu search finished"
        );

        TabuResult {
            best,
            best_cost,
            initial_cost,
            iterations: cost_history.len(),
            skipped_moves,
            accepted_moves,
            best_iteration,
            cancelled,
            cost_history,
        }
    }
}
