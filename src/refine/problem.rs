//! Assignment refinement as a swap-neighborhood search problem.

use crate::error::Result;
use crate::model::{Assignment, Dataset};
use crate::sa::SaProblem;
use crate::tabu::{TabuMove, TabuProblem};
use rand::Rng;

/// Exchange of resources between two agents, identified by the unordered
/// agent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SwapMove {
    first: usize,
    second: usize,
}

impl SwapMove {
    /// Normalizes the pair so `(a, b)` and `(b, a)` are the same move.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    pub fn agents(&self) -> (usize, usize) {
        (self.first, self.second)
    }
}

/// Rank-cost minimization over swaps of seated agents.
///
/// The objective is the sum, over seated agents, of the 0-indexed rank of
/// the agent's resource in its own preference list. Swaps keep every
/// resource's occupant count, but can still push an ineligible agent onto
/// a reserved seat or an agent below a resource's eligibility threshold
/// into that resource. Such neighbors cost `f64::INFINITY`.
#[derive(Debug, Clone)]
pub struct AssignmentProblem<'a> {
    dataset: &'a Dataset,
    movable: Vec<usize>,
    track_sensitive: bool,
    threshold_sensitive: bool,
}

impl<'a> AssignmentProblem<'a> {
    /// Prepares refinement of `initial`. Only agents seated in `initial`
    /// take part in swaps.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `initial` does not cover the dataset's agents,
    /// `UnknownResource` if it names a resource outside the dataset,
    /// `CapacityExceeded` if it breaks a quota.
    pub fn new(dataset: &'a Dataset, initial: &Assignment) -> Result<Self> {
        initial.validate_capacity(dataset)?;

        let track_sensitive = (0..dataset.resource_count())
            .any(|r| dataset.capacity(r).reserved_quota > 0);
        Ok(Self {
            dataset,
            movable: initial.assigned_agents(),
            track_sensitive,
            threshold_sensitive: dataset.has_scores(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        self.dataset
    }

    /// Agents eligible for swap moves.
    pub fn movable_agents(&self) -> &[usize] {
        &self.movable
    }

    /// Sum of preference ranks over seated agents.
    pub fn rank_cost(&self, assignment: &Assignment) -> usize {
        assignment
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(a, slot)| slot.map(|r| self.dataset.rank(a, r)))
            .sum()
    }

    /// Whether every seated agent reaches its resource's threshold.
    pub fn is_admissible(&self, assignment: &Assignment) -> bool {
        assignment
            .slots()
            .iter()
            .enumerate()
            .all(|(a, slot)| slot.is_none_or(|r| self.dataset.admits(a, r)))
    }

    /// Draws two distinct movable agents uniformly at random.
    pub fn draw_swap<R: Rng>(&self, rng: &mut R) -> Option<SwapMove> {
        let n = self.movable.len();
        if n < 2 {
            return None;
        }
        let i = rng.random_range(0..n);
        // Second index drawn from the remaining n - 1 slots.
        let mut j = rng.random_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        Some(SwapMove::new(self.movable[i], self.movable[j]))
    }

    fn apply(&self, assignment: &Assignment, mv: SwapMove) -> Assignment {
        let mut next = assignment.clone();
        let (a, b) = mv.agents();
        next.swap(a, b);
        next
    }
}

impl SaProblem for AssignmentProblem<'_> {
    type Solution = Assignment;

    fn cost(&self, assignment: &Assignment) -> f64 {
        if self.track_sensitive && !assignment.is_feasible(self.dataset) {
            return f64::INFINITY;
        }
        if self.threshold_sensitive && !self.is_admissible(assignment) {
            return f64::INFINITY;
        }
        self.rank_cost(assignment) as f64
    }

    fn neighbor<R: Rng>(&self, assignment: &Assignment, rng: &mut R) -> Option<Assignment> {
        let mv = self.draw_swap(rng)?;
        Some(self.apply(assignment, mv))
    }
}

impl TabuProblem for AssignmentProblem<'_> {
    type Solution = Assignment;
    type MoveKey = SwapMove;

    fn cost(&self, assignment: &Assignment) -> f64 {
        SaProblem::cost(self, assignment)
    }

    fn neighbor<R: Rng>(
        &self,
        assignment: &Assignment,
        rng: &mut R,
    ) -> Option<TabuMove<Assignment, SwapMove>> {
        let mv = self.draw_swap(rng)?;
        Some(TabuMove {
            solution: self.apply(assignment, mv),
            key: mv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdmissionError;
    use crate::fixtures::{
        rotated_dataset, small_dataset, split_interest_dataset, threshold_dataset,
    };
    use crate::greedy::GreedyConstructor;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_swap_move_is_unordered() {
        assert_eq!(SwapMove::new(4, 1), SwapMove::new(1, 4));
        assert_eq!(SwapMove::new(4, 1).agents(), (1, 4));
    }

    #[test]
    fn test_rank_cost_sums_agent_ranks() {
        let ds = split_interest_dataset();
        let greedy = GreedyConstructor::construct(&ds).assignment;
        let problem = AssignmentProblem::new(&ds, &greedy).unwrap();
        assert_eq!(problem.rank_cost(&greedy), 0);

        // A1 <-> A3: both land on their second choice.
        let mut swapped = greedy.clone();
        swapped.swap(0, 2);
        assert_eq!(problem.rank_cost(&swapped), 2);
        assert!((SaProblem::cost(&problem, &swapped) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_draw_swap_never_degenerate() {
        let ds = rotated_dataset(5, 2);
        let initial = GreedyConstructor::construct(&ds).assignment;
        let problem = AssignmentProblem::new(&ds, &initial).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let (a, b) = problem.draw_swap(&mut rng).unwrap().agents();
            assert_ne!(a, b);
            assert!(a < b);
        }
    }

    #[test]
    fn test_single_agent_has_no_swap() {
        let ds = split_interest_dataset();
        let initial = Assignment::from_slots(vec![Some(0), None, None, None]);
        let problem = AssignmentProblem::new(&ds, &initial).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(problem.draw_swap(&mut rng).is_none());
        assert!(SaProblem::neighbor(&problem, &initial, &mut rng).is_none());
        assert!(TabuProblem::neighbor(&problem, &initial, &mut rng).is_none());
    }

    #[test]
    fn test_unseated_agents_never_move() {
        let ds = split_interest_dataset();
        let initial = Assignment::from_slots(vec![Some(0), None, Some(1), Some(1)]);
        let problem = AssignmentProblem::new(&ds, &initial).unwrap();
        assert_eq!(problem.movable_agents(), &[0, 2, 3]);

        let mut rng = StdRng::seed_from_u64(5);
        let mut current = initial;
        for _ in 0..50 {
            current = SaProblem::neighbor(&problem, &current, &mut rng).unwrap();
            assert_eq!(current.resource_of(1), None);
        }
    }

    #[test]
    fn test_reserved_seat_swap_is_infeasible() {
        // Greedy: a1 -> C1, a2 -> C1, a3 -> C2, a4 -> C2 (reserved seat).
        let ds = small_dataset();
        let initial = GreedyConstructor::construct(&ds).assignment;
        let problem = AssignmentProblem::new(&ds, &initial).unwrap();

        // a1 (ineligible) takes a4's seat: C2 would hold two ineligible agents.
        let mut bad = initial.clone();
        bad.swap(0, 3);
        assert!(SaProblem::cost(&problem, &bad).is_infinite());

        // Swapping two ineligible agents across resources stays feasible.
        let mut ok = initial.clone();
        ok.swap(0, 2);
        assert!(SaProblem::cost(&problem, &ok).is_finite());
    }

    #[test]
    fn test_swap_below_threshold_is_infeasible() {
        // Greedy: a1 -> C1, a2 -> C2 (a2 misses C1's threshold).
        let ds = threshold_dataset();
        let initial = GreedyConstructor::construct(&ds).assignment;
        let problem = AssignmentProblem::new(&ds, &initial).unwrap();
        assert!(problem.is_admissible(&initial));
        assert!((SaProblem::cost(&problem, &initial) - 1.0).abs() < 1e-12);

        let mut swapped = initial.clone();
        swapped.swap(0, 1);
        assert!(!problem.is_admissible(&swapped));
        assert!(SaProblem::cost(&problem, &swapped).is_infinite());
    }

    #[test]
    fn test_rejects_unknown_resource_index() {
        let ds = split_interest_dataset();
        let bad = Assignment::from_slots(vec![Some(0), Some(3), None, None]);
        let err = AssignmentProblem::new(&ds, &bad).unwrap_err();
        assert!(matches!(err, AdmissionError::UnknownResource(_)));
    }

    #[test]
    fn test_rejects_mismatched_assignment() {
        let ds = split_interest_dataset();
        let short = Assignment::from_slots(vec![Some(0)]);
        let err = AssignmentProblem::new(&ds, &short).unwrap_err();
        assert!(matches!(err, AdmissionError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_overfull_initial_assignment() {
        let ds = split_interest_dataset();
        let overfull = Assignment::from_slots(vec![Some(0), Some(0), Some(0), Some(1)]);
        let err = AssignmentProblem::new(&ds, &overfull).unwrap_err();
        assert!(matches!(err, AdmissionError::CapacityExceeded { .. }));
    }

    proptest! {
        #[test]
        fn prop_swap_preserves_occupancy(seed in any::<u64>(), agents in 2usize..40, resources in 1usize..6) {
            let ds = rotated_dataset(agents, resources);
            let initial = GreedyConstructor::construct(&ds).assignment;
            let problem = AssignmentProblem::new(&ds, &initial).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);

            let before = initial.occupancy(ds.resource_count());
            let next = SaProblem::neighbor(&problem, &initial, &mut rng).unwrap();
            prop_assert_eq!(next.occupancy(ds.resource_count()), before);
            prop_assert!(next.is_complete());
            prop_assert!(next.validate_capacity(&ds).is_ok());
        }
    }
}
