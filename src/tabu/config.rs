//! Tabu Search configuration.

use serde::{Deserialize, Serialize};

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_admission::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_iterations(1000)
///     .with_tabu_size(7);
/// assert_eq!(config.iterations, 1000);
/// assert_eq!(config.tabu_size, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Number of iterations, skipped ones included.
    pub iterations: usize,
    /// How many recent move keys the tabu list remembers. Zero disables
    /// the tabu memory.
    pub tabu_size: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            tabu_size: 10,
        }
    }
}

impl TabuConfig {
    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the tabu list bound.
    pub fn with_tabu_size(mut self, size: usize) -> Self {
        self.tabu_size = size;
        self
    }
}
