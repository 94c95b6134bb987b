//! Exponential-decay satisfaction scoring.

use crate::error::{AdmissionError, Result};
use crate::graph::derive_resource_rankings;
use crate::model::{Assignment, Dataset};
use serde::{Deserialize, Serialize};

/// Points for the side whose counterpart sits at `rank` (0 = favourite):
/// 100, 50, 25, ...
pub fn rank_points(rank: usize) -> f64 {
    100.0 * 0.5f64.powf(rank as f64)
}

/// Two-sided satisfaction of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionScore {
    /// Agent-side plus resource-side points.
    pub raw: f64,
    /// `raw` as a percentage of `200 × population`.
    pub normalized: f64,
    /// Points from agents' own preference lists.
    pub agent_side: f64,
    /// Points from resources' preference lists.
    pub resource_side: f64,
}

/// Scores an assignment against both sides' preference orders.
///
/// Each seated agent contributes `100 / 2^rank` for the rank of its
/// resource in its own list, and its resource contributes `100 / 2^rank`
/// for the agent's position in the resource's list. Resource lists are the
/// dataset's explicit ones, or the score-derived rankings when it carries
/// none.
///
/// # Errors
///
/// - `MissingPreferenceEntry` if a seated agent is absent from its
///   resource's list
/// - `MissingResourcePreferences` if the dataset has neither resource
///   lists nor scores
/// - `InvalidConfig` if the assignment does not cover the dataset's agents
/// - `UnknownResource` if it names a resource outside the dataset
pub fn satisfaction_score(dataset: &Dataset, assignment: &Assignment) -> Result<SatisfactionScore> {
    assignment.check_indices(dataset)?;

    let positions = resource_positions(dataset)?;

    let mut agent_side = 0.0;
    let mut resource_side = 0.0;
    for (agent, slot) in assignment.slots().iter().enumerate() {
        let Some(resource) = *slot else {
            continue;
        };
        agent_side += rank_points(dataset.rank(agent, resource));

        let rank = positions[resource][agent].ok_or_else(|| {
            AdmissionError::MissingPreferenceEntry {
                owner: dataset.resource_id(resource).to_string(),
                entry: dataset.agent_id(agent).to_string(),
            }
        })?;
        resource_side += rank_points(rank);
    }

    let raw = agent_side + resource_side;
    let max_possible = 200.0 * dataset.agent_count() as f64;
    let normalized = if max_possible > 0.0 {
        raw / max_possible * 100.0
    } else {
        0.0
    };

    Ok(SatisfactionScore {
        raw,
        normalized,
        agent_side,
        resource_side,
    })
}

/// `[resource][agent]` -> position in the resource's list.
fn resource_positions(dataset: &Dataset) -> Result<Vec<Vec<Option<usize>>>> {
    let lists: Vec<Vec<usize>> = match dataset.resource_preferences() {
        Some(lists) => lists.to_vec(),
        None if dataset.has_scores() => derive_resource_rankings(dataset)?
            .into_iter()
            .map(|ranking| ranking.agents().to_vec())
            .collect(),
        None => return Err(AdmissionError::MissingResourcePreferences),
    };

    Ok(lists
        .iter()
        .map(|list| {
            let mut positions = vec![None; dataset.agent_count()];
            for (rank, &agent) in list.iter().enumerate() {
                positions[agent] = Some(rank);
            }
            positions
        })
        .collect())
}
