//! SA configuration.

use crate::error::{AdmissionError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the Simulated Annealing algorithm.
///
/// Temperature follows geometric cooling, `T_{k+1} = cooling_rate * T_k`,
/// applied once per iteration.
///
/// # Examples
///
/// ```
/// use u_admission::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_iterations(5000)
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.99);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaConfig {
    /// Number of neighbor evaluations.
    pub iterations: usize,

    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            initial_temperature: 100.0,
            cooling_rate: 0.95,
        }
    }
}

impl SaConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(AdmissionError::InvalidConfig(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(AdmissionError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}
