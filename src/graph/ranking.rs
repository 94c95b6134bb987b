//! Score-derived resource rankings.

use crate::error::{AdmissionError, Result};
use crate::model::Dataset;

/// Agents eligible for one resource, best score first.
///
/// Agents with identical scores form one contiguous group and keep their
/// dataset order inside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking {
    agents: Vec<usize>,
    scores: Vec<f64>,
}

impl Ranking {
    /// Ranks every agent whose score for `resource` reaches the
    /// resource's eligibility threshold.
    ///
    /// # Errors
    ///
    /// `MissingScores` if the dataset has no score table.
    pub fn for_resource(dataset: &Dataset, resource: usize) -> Result<Self> {
        if !dataset.has_scores() {
            return Err(AdmissionError::MissingScores);
        }
        let threshold = dataset.capacity(resource).eligibility_score;
        let mut ranked: Vec<(usize, f64)> = (0..dataset.agent_count())
            .filter_map(|a| {
                dataset
                    .score(a, resource)
                    .filter(|&s| s >= threshold)
                    .map(|s| (a, s))
            })
            .collect();
        // Stable: equal scores keep dataset order.
        ranked.sort_by(|x, y| y.1.total_cmp(&x.1));

        let (agents, scores) = ranked.into_iter().unzip();
        Ok(Self { agents, scores })
    }

    /// Agents, most preferred first.
    pub fn agents(&self) -> &[usize] {
        &self.agents
    }

    /// Scores aligned with [`agents`](Self::agents).
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Position of `agent` in the ranking.
    pub fn position(&self, agent: usize) -> Option<usize> {
        self.agents.iter().position(|&a| a == agent)
    }

    /// Runs of agents sharing one score, best run first.
    pub fn groups(&self) -> Vec<&[usize]> {
        let mut groups = Vec::new();
        let mut start = 0;
        for i in 1..=self.agents.len() {
            if i == self.agents.len() || self.scores[i] != self.scores[start] {
                groups.push(&self.agents[start..i]);
                start = i;
            }
        }
        groups
    }

    /// The sub-ranking of agents satisfying `keep`, order preserved.
    pub fn filtered(&self, keep: impl Fn(usize) -> bool) -> Self {
        let (agents, scores) = self
            .agents
            .iter()
            .zip(&self.scores)
            .filter(|&(&a, _)| keep(a))
            .map(|(&a, &s)| (a, s))
            .unzip();
        Self { agents, scores }
    }
}

/// Derives every resource's ranking of eligible agents.
///
/// # Errors
///
/// `MissingScores` if the dataset has no score table.
pub fn derive_resource_rankings(dataset: &Dataset) -> Result<Vec<Ranking>> {
    (0..dataset.resource_count())
        .map(|r| Ranking::for_resource(dataset, r))
        .collect()
}
