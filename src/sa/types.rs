//! Problem interface for the annealing runner.

use rand::Rng;

/// A minimization problem explored by [`SaRunner`](super::SaRunner).
///
/// Implementors supply a cost and a random move; the runner owns the
/// temperature schedule, Metropolis acceptance and the best-so-far record.
/// Callers pass the starting solution in, so a constructive heuristic can
/// seed the search.
///
/// A neighbor that breaks a hard constraint should cost `f64::INFINITY`:
/// its acceptance probability is then zero at every temperature. A problem
/// with no move to offer returns `None` from [`neighbor`](Self::neighbor),
/// which ends the run.
///
/// ```ignore
/// struct Seating { ranks: Vec<Vec<usize>> }
///
/// impl SaProblem for Seating {
///     type Solution = Vec<usize>;
///
///     fn cost(&self, seats: &Vec<usize>) -> f64 {
///         seats.iter().enumerate().map(|(a, &r)| self.ranks[a][r] as f64).sum()
///     }
///
///     fn neighbor<R: Rng>(&self, seats: &Vec<usize>, rng: &mut R) -> Option<Vec<usize>> {
///         if seats.len() < 2 {
///             return None;
///         }
///         let mut next = seats.clone();
///         let i = rng.random_range(0..next.len());
///         let j = rng.random_range(0..next.len());
///         next.swap(i, j);
///         Some(next)
///     }
/// }
/// ```
pub trait SaProblem {
    type Solution: Clone;

    /// Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// A random solution one move away from `solution`, or `None` when the
    /// neighborhood is empty.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Option<Self::Solution>;
}
