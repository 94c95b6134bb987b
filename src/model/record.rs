//! Boundary records exchanged with dataset producers and report consumers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Seat capacity of one resource.
///
/// Reserved seats may only be taken by agents in the dataset's eligible
/// subset. Agents scoring below `eligibility_score` are never considered
/// by the resource's derived ranking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Capacity {
    /// Seats open to every agent.
    pub regular_quota: usize,
    /// Seats restricted to the eligible subset.
    #[serde(default)]
    pub reserved_quota: usize,
    /// Minimum score for admission consideration.
    #[serde(default)]
    pub eligibility_score: f64,
}

impl Capacity {
    pub fn new(regular_quota: usize) -> Self {
        Self {
            regular_quota,
            ..Self::default()
        }
    }

    pub fn with_reserved_quota(mut self, n: usize) -> Self {
        self.reserved_quota = n;
        self
    }

    pub fn with_eligibility_score(mut self, score: f64) -> Self {
        self.eligibility_score = score;
        self
    }

    /// Regular plus reserved seats.
    pub fn total(&self) -> usize {
        self.regular_quota + self.reserved_quota
    }
}

/// Capacity as found in dataset files: either a bare seat count or a
/// full quota record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapacityRecord {
    Seats(usize),
    Quota(Capacity),
}

impl From<CapacityRecord> for Capacity {
    fn from(record: CapacityRecord) -> Self {
        match record {
            CapacityRecord::Seats(n) => Capacity::new(n),
            CapacityRecord::Quota(capacity) => capacity,
        }
    }
}

impl From<Capacity> for CapacityRecord {
    fn from(capacity: Capacity) -> Self {
        CapacityRecord::Quota(capacity)
    }
}

/// Unvalidated dataset as stored on disk.
///
/// Field aliases accept the student/college vocabulary used by dataset
/// generators. Convert with [`Dataset::from_record`](super::Dataset::from_record)
/// before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetRecord {
    #[serde(alias = "students")]
    pub agents: Vec<String>,

    #[serde(alias = "colleges")]
    pub resources: Vec<String>,

    pub capacities: HashMap<String, CapacityRecord>,

    #[serde(alias = "student_preferences")]
    pub agent_preferences: HashMap<String, Vec<String>>,

    #[serde(default, alias = "college_preferences")]
    pub resource_preferences: HashMap<String, Vec<String>>,

    /// agent -> resource -> score
    #[serde(default, alias = "student_scores")]
    pub scores: HashMap<String, HashMap<String, f64>>,

    #[serde(default, alias = "bea_eligible")]
    pub eligible_subset: Vec<String>,
}

impl DatasetRecord {
    /// Starts a record over the given agents and resources.
    pub fn new<A, R>(agents: A, resources: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            agents: agents.into_iter().map(Into::into).collect(),
            resources: resources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, resource: &str, capacity: Capacity) -> Self {
        self.capacities
            .insert(resource.to_string(), CapacityRecord::Quota(capacity));
        self
    }

    pub fn with_agent_preferences(mut self, agent: &str, order: &[&str]) -> Self {
        self.agent_preferences.insert(
            agent.to_string(),
            order.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    pub fn with_resource_preferences(mut self, resource: &str, order: &[&str]) -> Self {
        self.resource_preferences.insert(
            resource.to_string(),
            order.iter().map(|a| a.to_string()).collect(),
        );
        self
    }

    pub fn with_scores(mut self, agent: &str, scores: &[(&str, f64)]) -> Self {
        let entry = self.scores.entry(agent.to_string()).or_default();
        for &(resource, score) in scores {
            entry.insert(resource.to_string(), score);
        }
        self
    }

    pub fn with_eligible(mut self, agents: &[&str]) -> Self {
        self.eligible_subset
            .extend(agents.iter().map(|a| a.to_string()));
        self
    }
}

/// Flat `{agent: resource}` mapping, one entry per seated agent.
pub type AssignmentRecord = BTreeMap<String, String>;
