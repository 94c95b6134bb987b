//! Pipeline configuration.

use crate::error::Result;
use crate::sa::SaConfig;
use crate::tabu::TabuConfig;
use serde::{Deserialize, Serialize};

/// Configuration of a greedy → SA → tabu comparison run.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use u_admission::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::from_json_str(r#"{"seed": 7, "tabu": {"tabu_size": 4}}"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.tabu.tabu_size, 4);
/// assert_eq!(config.sa.iterations, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed of the generator shared by both refiners.
    pub seed: u64,
    pub sa: SaConfig,
    pub tabu: TabuConfig,
    /// Refine a partial greedy assignment instead of failing with
    /// `InfeasiblePopulation`.
    pub allow_partial: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sa: SaConfig::default(),
            tabu: TabuConfig::default(),
            allow_partial: false,
        }
    }
}

impl PipelineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    pub fn with_tabu(mut self, tabu: TabuConfig) -> Self {
        self.tabu = tabu;
        self
    }

    pub fn with_allow_partial(mut self, allow: bool) -> Self {
        self.allow_partial = allow;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.sa.validate()
    }
}
