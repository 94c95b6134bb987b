//! Single-pass greedy constructor.

use super::ledger::CapacityLedger;
use crate::error::{AdmissionError, Result};
use crate::model::{Assignment, Dataset};
use tracing::{debug, warn};

/// Result of a greedy pass.
#[derive(Debug, Clone)]
pub struct GreedyOutcome {
    /// Seats handed out; unseated agents map to `None`.
    pub assignment: Assignment,
    /// Agents that found no free seat, in dataset order.
    pub unassigned: Vec<usize>,
    /// Seats left over after the pass.
    pub ledger: CapacityLedger,
}

impl GreedyOutcome {
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// The assignment, provided every agent was seated.
    ///
    /// # Errors
    ///
    /// `InfeasiblePopulation` if any agent is unseated.
    pub fn into_complete(self, dataset: &Dataset) -> Result<Assignment> {
        if self.unassigned.is_empty() {
            Ok(self.assignment)
        } else {
            Err(AdmissionError::InfeasiblePopulation {
                agents: dataset.agent_count(),
                capacity: dataset.total_capacity(),
                unassigned: self.unassigned.len(),
            })
        }
    }
}

/// Seats agents in dataset order at their best resource that admits them
/// and has a free seat.
pub struct GreedyConstructor;

impl GreedyConstructor {
    /// Runs the greedy pass.
    ///
    /// Resources whose eligibility threshold the agent misses are skipped.
    /// Agents with no admitting resource left are unseated; this is
    /// reported in [`GreedyOutcome::unassigned`] rather than as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_admission::greedy::GreedyConstructor;
    /// use u_admission::model::{Capacity, Dataset, DatasetRecord};
    ///
    /// let record = DatasetRecord::new(["A1", "A2"], ["R1", "R2"])
    ///     .with_capacity("R1", Capacity::new(1))
    ///     .with_capacity("R2", Capacity::new(1))
    ///     .with_agent_preferences("A1", &["R1", "R2"])
    ///     .with_agent_preferences("A2", &["R1", "R2"]);
    /// let dataset = Dataset::from_record(record).unwrap();
    ///
    /// let outcome = GreedyConstructor::construct(&dataset);
    /// assert!(outcome.is_complete());
    /// assert_eq!(outcome.assignment.resource_of(1), Some(1));
    /// ```
    pub fn construct(dataset: &Dataset) -> GreedyOutcome {
        let mut ledger = CapacityLedger::new(dataset);
        let mut assignment = Assignment::unassigned(dataset.agent_count());
        let mut unassigned = Vec::new();

        for agent in 0..dataset.agent_count() {
            let eligible = dataset.is_eligible(agent);
            let seat = dataset
                .preferences(agent)
                .iter()
                .copied()
                .find(|&r| dataset.admits(agent, r) && ledger.take(r, eligible).is_some());
            match seat {
                Some(r) => assignment.assign(agent, r),
                None => unassigned.push(agent),
            }
        }

        if unassigned.is_empty() {
            debug!(agents = dataset.agent_count(), "greedy construction seated every agent");
        } else {
            warn!(
                agents = dataset.agent_count(),
                capacity = dataset.total_capacity(),
                unassigned = unassigned.len(),
                "greedy construction left agents unseated"
            );
        }

        GreedyOutcome {
            assignment,
            unassigned,
            ledger,
        }
    }
}
