//! Agent-to-resource assignments.

use super::dataset::Dataset;
use super::record::{AssignmentRecord, Capacity};
use crate::error::{AdmissionError, Result};
use std::io::{Read, Write};

/// Seats taken at one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeatCount {
    /// All assigned agents.
    pub total: usize,
    /// Assigned agents outside the eligible subset; these can only hold
    /// regular seats.
    pub general: usize,
}

impl SeatCount {
    /// Whether this occupancy respects both quota tracks.
    pub fn fits(&self, capacity: &Capacity) -> bool {
        self.general <= capacity.regular_quota && self.total <= capacity.total()
    }
}

/// Maps each agent index to an optional resource index.
///
/// A complete assignment seats every agent; the greedy constructor may
/// leave agents unseated when capacity runs out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    slots: Vec<Option<usize>>,
}

impl Assignment {
    /// An assignment with no agent seated.
    pub fn unassigned(agent_count: usize) -> Self {
        Self {
            slots: vec![None; agent_count],
        }
    }

    pub fn from_slots(slots: Vec<Option<usize>>) -> Self {
        Self { slots }
    }

    /// Number of agents covered (seated or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    pub fn resource_of(&self, agent: usize) -> Option<usize> {
        self.slots[agent]
    }

    pub fn assign(&mut self, agent: usize, resource: usize) {
        self.slots[agent] = Some(resource);
    }

    /// Exchanges the resources of two agents. Occupancy per resource is
    /// unchanged.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Indices of seated agents, ascending.
    pub fn assigned_agents(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(a, slot)| slot.map(|_| a))
            .collect()
    }

    /// Indices of unseated agents, ascending.
    pub fn unassigned_agents(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(a, slot)| slot.is_none().then_some(a))
            .collect()
    }

    /// Agents seated at `resource`, ascending.
    pub fn agents_at(&self, resource: usize) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(a, slot)| (*slot == Some(resource)).then_some(a))
            .collect()
    }

    /// Number of agents seated at each resource. Slots at or beyond
    /// `resource_count` are not counted.
    pub fn occupancy(&self, resource_count: usize) -> Vec<usize> {
        let mut counts = vec![0; resource_count];
        for &r in self.slots.iter().flatten() {
            if let Some(n) = counts.get_mut(r) {
                *n += 1;
            }
        }
        counts
    }

    /// Checks that the assignment covers exactly the dataset's agents and
    /// only names its resources.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on an agent count mismatch, `UnknownResource` for a
    /// resource index outside the dataset.
    pub fn check_indices(&self, dataset: &Dataset) -> Result<()> {
        if self.slots.len() != dataset.agent_count() {
            return Err(AdmissionError::InvalidConfig(format!(
                "assignment covers {} agents, dataset has {}",
                self.slots.len(),
                dataset.agent_count()
            )));
        }
        match self
            .slots
            .iter()
            .flatten()
            .find(|&&r| r >= dataset.resource_count())
        {
            Some(r) => Err(AdmissionError::UnknownResource(format!("#{r}"))),
            None => Ok(()),
        }
    }

    /// Per-resource seat usage split by eligibility.
    ///
    /// # Errors
    ///
    /// As [`check_indices`](Self::check_indices).
    pub fn seat_counts(&self, dataset: &Dataset) -> Result<Vec<SeatCount>> {
        self.check_indices(dataset)?;
        let mut counts = vec![SeatCount::default(); dataset.resource_count()];
        for (agent, slot) in self.slots.iter().enumerate() {
            if let Some(r) = *slot {
                counts[r].total += 1;
                if !dataset.is_eligible(agent) {
                    counts[r].general += 1;
                }
            }
        }
        Ok(counts)
    }

    /// Whether the assignment fits the dataset and every resource respects
    /// its quotas.
    pub fn is_feasible(&self, dataset: &Dataset) -> bool {
        self.seat_counts(dataset).is_ok_and(|counts| {
            counts
                .iter()
                .enumerate()
                .all(|(r, seats)| seats.fits(dataset.capacity(r)))
        })
    }

    /// Checks indices, then every resource's quotas.
    ///
    /// # Errors
    ///
    /// Index errors as [`check_indices`](Self::check_indices), then
    /// `CapacityExceeded` naming the first offending resource and track.
    pub fn validate_capacity(&self, dataset: &Dataset) -> Result<()> {
        for (r, seats) in self.seat_counts(dataset)?.iter().enumerate() {
            let capacity = dataset.capacity(r);
            if seats.general > capacity.regular_quota {
                return Err(AdmissionError::CapacityExceeded {
                    resource: dataset.resource_id(r).to_string(),
                    track: "regular",
                    assigned: seats.general,
                    quota: capacity.regular_quota,
                });
            }
            if seats.total > capacity.total() {
                return Err(AdmissionError::CapacityExceeded {
                    resource: dataset.resource_id(r).to_string(),
                    track: "combined",
                    assigned: seats.total,
                    quota: capacity.total(),
                });
            }
        }
        Ok(())
    }

    /// Fails with `Unassigned` on the first unseated agent.
    pub fn require_complete(&self, dataset: &Dataset) -> Result<()> {
        match self.slots.iter().position(Option::is_none) {
            Some(a) => Err(AdmissionError::Unassigned(
                dataset
                    .agents()
                    .get(a)
                    .cloned()
                    .unwrap_or_else(|| format!("#{a}")),
            )),
            None => Ok(()),
        }
    }

    /// Builds an assignment from a boundary record. Agents absent from the
    /// record stay unseated.
    ///
    /// # Errors
    ///
    /// Unknown agents or resources, and quota violations.
    pub fn from_record(dataset: &Dataset, record: &AssignmentRecord) -> Result<Self> {
        let mut assignment = Self::unassigned(dataset.agent_count());
        for (agent, resource) in record {
            let a = dataset.agent_index(agent)?;
            let r = dataset.resource_index(resource)?;
            assignment.assign(a, r);
        }
        assignment.validate_capacity(dataset)?;
        Ok(assignment)
    }

    /// Converts to the `{agent: resource}` record, skipping unseated agents
    /// and slots that name no agent or resource of `dataset`.
    pub fn to_record(&self, dataset: &Dataset) -> AssignmentRecord {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(a, slot)| {
                let agent = dataset.agents().get(a)?;
                let resource = dataset.resources().get((*slot)?)?;
                Some((agent.clone(), resource.clone()))
            })
            .collect()
    }

    pub fn from_json_reader<R: Read>(dataset: &Dataset, reader: R) -> Result<Self> {
        let record: AssignmentRecord = serde_json::from_reader(reader)?;
        Self::from_record(dataset, &record)
    }

    pub fn to_json_writer<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_record(dataset))?;
        Ok(())
    }
}
