//! Error types for admission modeling, construction and scoring.

use thiserror::Error;

/// Errors raised while loading, validating, or evaluating admissions.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// An agent identifier is not part of the dataset.
    #[error("unknown agent `{0}`")]
    UnknownAgent(String),

    /// A resource identifier is not part of the dataset.
    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    /// The same agent identifier appears twice.
    #[error("agent `{0}` is listed more than once")]
    DuplicateAgent(String),

    /// The same resource identifier appears twice.
    #[error("resource `{0}` is listed more than once")]
    DuplicateResource(String),

    /// A preference list is not a strict total order over its domain.
    #[error("preference list of `{owner}` is invalid: {reason}")]
    InvalidPreferenceList { owner: String, reason: String },

    /// A resource has no capacity record.
    #[error("resource `{0}` has no capacity record")]
    MissingCapacity(String),

    /// A score is negative, NaN or infinite.
    #[error("score {score} of agent `{agent}` for `{resource}` is not a non-negative finite number")]
    InvalidScore {
        agent: String,
        resource: String,
        score: f64,
    },

    /// An eligibility threshold is negative, NaN or infinite.
    #[error("eligibility score {score} of `{resource}` is not a non-negative finite number")]
    InvalidThreshold { resource: String, score: f64 },

    /// An operation needs (agent, resource) scores but the dataset has none.
    #[error("dataset carries no scores")]
    MissingScores,

    /// Scoring needs resource-side preferences and none can be obtained.
    #[error("dataset carries neither resource preferences nor scores")]
    MissingResourcePreferences,

    /// An entry is absent from the preference list it was looked up in.
    #[error("`{entry}` is not in the preference list of `{owner}`")]
    MissingPreferenceEntry { owner: String, entry: String },

    /// An assignment seats more agents than a resource admits.
    #[error("resource `{resource}` holds {assigned} agents on its {track} track but admits {quota}")]
    CapacityExceeded {
        resource: String,
        track: &'static str,
        assigned: usize,
        quota: usize,
    },

    /// Total capacity cannot seat the whole population.
    #[error("{unassigned} of {agents} agents could not be seated (total capacity {capacity})")]
    InfeasiblePopulation {
        agents: usize,
        capacity: usize,
        unassigned: usize,
    },

    /// A complete assignment was required but an agent has no resource.
    #[error("agent `{0}` is unassigned")]
    Unassigned(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A boundary record could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias for admission operations.
pub type Result<T> = std::result::Result<T, AdmissionError>;
