//! End-to-end comparison of the assignment strategies.
//!
//! Greedy construction seeds both refiners; every outcome is costed by
//! total preference rank and, where the dataset allows, scored for
//! two-sided satisfaction.

mod config;
mod runner;

pub use config::PipelineConfig;
pub use runner::{ComparisonReport, Pipeline, Strategy, StrategyOutcome};
