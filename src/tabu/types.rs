//! Core trait for Tabu Search problems.

use rand::Rng;
use std::hash::Hash;

/// A move that transforms one solution into another.
///
/// The `key` identifies the move in the tabu list. Moves with the same key
/// are considered equivalent (e.g., "swap(3,7)" and "swap(7,3)").
#[derive(Debug, Clone)]
pub struct TabuMove<S, K> {
    /// The resulting solution after applying this move.
    pub solution: S,
    /// Key identifying this move for tabu tracking.
    pub key: K,
}

/// Defines a combinatorial optimization problem for Tabu Search.
///
/// Users implement this trait to specify:
/// - How to evaluate a solution's cost
/// - How to draw one neighbor of a solution, with its move key
///
/// The starting solution is supplied by the caller.
pub trait TabuProblem {
    /// The solution type.
    type Solution: Clone;

    /// Identifies a move in the tabu list.
    type MoveKey: Clone + Eq + Hash;

    /// Evaluates the cost of a solution (lower is better).
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Draws one random neighbor, or `None` if the solution has no
    /// neighbors at all.
    fn neighbor<R: Rng>(
        &self,
        solution: &Self::Solution,
        rng: &mut R,
    ) -> Option<TabuMove<Self::Solution, Self::MoveKey>>;
}
