//! Validated, index-based view of an admission dataset.

use super::record::{Capacity, DatasetRecord};
use crate::error::{AdmissionError, Result};
use std::collections::{HashMap, HashSet};
use std::io::Read;

/// An admission dataset whose invariants have been checked.
///
/// Agents and resources are addressed by their position in the dataset's
/// `agents` / `resources` lists. Every agent ranks every resource exactly
/// once, so [`rank`](Self::rank) lookups on valid indices cannot miss.
#[derive(Debug, Clone)]
pub struct Dataset {
    agents: Vec<String>,
    resources: Vec<String>,
    agent_index: HashMap<String, usize>,
    resource_index: HashMap<String, usize>,
    capacities: Vec<Capacity>,
    agent_preferences: Vec<Vec<usize>>,
    // [agent][resource] -> 0-indexed rank
    agent_ranks: Vec<Vec<usize>>,
    resource_preferences: Option<Vec<Vec<usize>>>,
    // [agent][resource]
    scores: Option<Vec<Vec<f64>>>,
    eligible: Vec<bool>,
}

impl Dataset {
    /// Validates a boundary record.
    ///
    /// # Errors
    ///
    /// Fails on duplicate or unknown identifiers, missing capacities,
    /// agent preference lists that are not a permutation of the resources,
    /// and negative or non-finite scores or eligibility thresholds.
    pub fn from_record(record: DatasetRecord) -> Result<Self> {
        let agent_index = index_ids(&record.agents, AdmissionError::DuplicateAgent)?;
        let resource_index = index_ids(&record.resources, AdmissionError::DuplicateResource)?;

        let capacities = resolve_capacities(&record, &resource_index)?;

        for agent in record.agent_preferences.keys() {
            if !agent_index.contains_key(agent) {
                return Err(AdmissionError::UnknownAgent(agent.clone()));
            }
        }
        let mut agent_preferences = Vec::with_capacity(record.agents.len());
        let mut agent_ranks = Vec::with_capacity(record.agents.len());
        for agent in &record.agents {
            let list = record.agent_preferences.get(agent).ok_or_else(|| {
                AdmissionError::InvalidPreferenceList {
                    owner: agent.clone(),
                    reason: "no preference list".into(),
                }
            })?;
            let order = resolve_order(agent, list, &resource_index, |id| {
                AdmissionError::UnknownResource(id.to_string())
            })?;
            if order.len() != record.resources.len() {
                return Err(AdmissionError::InvalidPreferenceList {
                    owner: agent.clone(),
                    reason: format!(
                        "ranks {} of {} resources",
                        order.len(),
                        record.resources.len()
                    ),
                });
            }
            let mut ranks = vec![0; order.len()];
            for (rank, &resource) in order.iter().enumerate() {
                ranks[resource] = rank;
            }
            agent_preferences.push(order);
            agent_ranks.push(ranks);
        }

        let resource_preferences = if record.resource_preferences.is_empty() {
            None
        } else {
            let mut lists = vec![Vec::new(); record.resources.len()];
            for (resource, list) in &record.resource_preferences {
                let r = *resource_index
                    .get(resource)
                    .ok_or_else(|| AdmissionError::UnknownResource(resource.clone()))?;
                lists[r] = resolve_order(resource, list, &agent_index, |id| {
                    AdmissionError::UnknownAgent(id.to_string())
                })?;
            }
            Some(lists)
        };

        let scores = resolve_scores(&record, &agent_index, &resource_index)?;

        let mut eligible = vec![false; record.agents.len()];
        for agent in &record.eligible_subset {
            let a = *agent_index
                .get(agent)
                .ok_or_else(|| AdmissionError::UnknownAgent(agent.clone()))?;
            eligible[a] = true;
        }

        Ok(Self {
            agents: record.agents,
            resources: record.resources,
            agent_index,
            resource_index,
            capacities,
            agent_preferences,
            agent_ranks,
            resource_preferences,
            scores,
            eligible,
        })
    }

    /// Parses and validates a JSON dataset.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let record: DatasetRecord = serde_json::from_reader(reader)?;
        Self::from_record(record)
    }

    /// Parses and validates a JSON dataset held in memory.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: DatasetRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn agent_id(&self, agent: usize) -> &str {
        &self.agents[agent]
    }

    pub fn resource_id(&self, resource: usize) -> &str {
        &self.resources[resource]
    }

    /// Resolves an agent identifier to its index.
    pub fn agent_index(&self, id: &str) -> Result<usize> {
        self.agent_index
            .get(id)
            .copied()
            .ok_or_else(|| AdmissionError::UnknownAgent(id.to_string()))
    }

    /// Resolves a resource identifier to its index.
    pub fn resource_index(&self, id: &str) -> Result<usize> {
        self.resource_index
            .get(id)
            .copied()
            .ok_or_else(|| AdmissionError::UnknownResource(id.to_string()))
    }

    pub fn capacity(&self, resource: usize) -> &Capacity {
        &self.capacities[resource]
    }

    /// Sum of regular and reserved seats over all resources.
    pub fn total_capacity(&self) -> usize {
        self.capacities.iter().map(Capacity::total).sum()
    }

    /// The agent's resources, most preferred first.
    pub fn preferences(&self, agent: usize) -> &[usize] {
        &self.agent_preferences[agent]
    }

    /// Rank of `resource` in the agent's preference list (0 = favourite).
    pub fn rank(&self, agent: usize, resource: usize) -> usize {
        self.agent_ranks[agent][resource]
    }

    /// Rank lookup by identifiers.
    ///
    /// # Errors
    ///
    /// `MissingPreferenceEntry` if `resource` is not ranked by `agent`.
    pub fn rank_of(&self, agent: &str, resource: &str) -> Result<usize> {
        let a = self.agent_index(agent)?;
        let r = self
            .resource_index
            .get(resource)
            .ok_or_else(|| AdmissionError::MissingPreferenceEntry {
                owner: agent.to_string(),
                entry: resource.to_string(),
            })?;
        Ok(self.rank(a, *r))
    }

    /// Explicit resource-side orderings, if the dataset carries them.
    pub fn resource_preferences(&self) -> Option<&[Vec<usize>]> {
        self.resource_preferences.as_deref()
    }

    pub fn has_scores(&self) -> bool {
        self.scores.is_some()
    }

    /// Score of `agent` for `resource`, if the dataset carries scores.
    pub fn score(&self, agent: usize, resource: usize) -> Option<f64> {
        self.scores.as_ref().map(|s| s[agent][resource])
    }

    /// Whether `agent` reaches the eligibility threshold of `resource`.
    /// Always true for datasets without scores.
    pub fn admits(&self, agent: usize, resource: usize) -> bool {
        match self.score(agent, resource) {
            Some(score) => score >= self.capacities[resource].eligibility_score,
            None => true,
        }
    }

    pub fn is_eligible(&self, agent: usize) -> bool {
        self.eligible[agent]
    }

    /// Number of agents in the eligible subset.
    pub fn eligible_count(&self) -> usize {
        self.eligible.iter().filter(|&&e| e).count()
    }
}

fn index_ids(
    ids: &[String],
    duplicate: impl Fn(String) -> AdmissionError,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if index.insert(id.clone(), i).is_some() {
            return Err(duplicate(id.clone()));
        }
    }
    Ok(index)
}

fn resolve_capacities(
    record: &DatasetRecord,
    resource_index: &HashMap<String, usize>,
) -> Result<Vec<Capacity>> {
    for resource in record.capacities.keys() {
        if !resource_index.contains_key(resource) {
            return Err(AdmissionError::UnknownResource(resource.clone()));
        }
    }
    record
        .resources
        .iter()
        .map(|resource| {
            let capacity = record
                .capacities
                .get(resource)
                .map(|&c| Capacity::from(c))
                .ok_or_else(|| AdmissionError::MissingCapacity(resource.clone()))?;
            let threshold = capacity.eligibility_score;
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(AdmissionError::InvalidThreshold {
                    resource: resource.clone(),
                    score: threshold,
                });
            }
            Ok(capacity)
        })
        .collect()
}

/// Resolves a preference list to indices, rejecting unknown and repeated entries.
fn resolve_order(
    owner: &str,
    list: &[String],
    index: &HashMap<String, usize>,
    unknown: impl Fn(&str) -> AdmissionError,
) -> Result<Vec<usize>> {
    let mut seen = HashSet::with_capacity(list.len());
    let mut order = Vec::with_capacity(list.len());
    for id in list {
        let i = *index.get(id).ok_or_else(|| unknown(id.as_str()))?;
        if !seen.insert(i) {
            return Err(AdmissionError::InvalidPreferenceList {
                owner: owner.to_string(),
                reason: format!("`{id}` appears more than once"),
            });
        }
        order.push(i);
    }
    Ok(order)
}

fn resolve_scores(
    record: &DatasetRecord,
    agent_index: &HashMap<String, usize>,
    resource_index: &HashMap<String, usize>,
) -> Result<Option<Vec<Vec<f64>>>> {
    if record.scores.is_empty() {
        return Ok(None);
    }
    // Missing pairs score 0.
    let mut table = vec![vec![0.0; record.resources.len()]; record.agents.len()];
    for (agent, row) in &record.scores {
        let a = *agent_index
            .get(agent)
            .ok_or_else(|| AdmissionError::UnknownAgent(agent.clone()))?;
        for (resource, &score) in row {
            let r = *resource_index
                .get(resource)
                .ok_or_else(|| AdmissionError::UnknownResource(resource.clone()))?;
            if !score.is_finite() || score < 0.0 {
                return Err(AdmissionError::InvalidScore {
                    agent: agent.clone(),
                    resource: resource.clone(),
                    score,
                });
            }
            table[a][r] = score;
        }
    }
    Ok(Some(table))
}
