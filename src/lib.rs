//! Two-sided admission assignment.
//!
//! Agents (applicants) rank resources (programs with seat quotas), and
//! resources rank agents either explicitly or by score. The crate provides:
//!
//! - **Model**: validated, index-based datasets and assignments, loaded
//!   from and saved to JSON.
//! - **Graph**: the dominance graph over programs and agents, with
//!   preference edges and score edges, in regular, reserved or unified
//!   form.
//! - **Greedy**: first-fit construction in dataset order.
//! - **Simulated Annealing (SA)** and **Tabu Search (TS)**: generic
//!   trajectory optimizers, applied to assignments through a swap
//!   neighborhood in [`refine`].
//! - **Score**: exponential-decay satisfaction of both sides.
//! - **Pipeline**: greedy → SA → tabu comparison from one seed.
//!
//! # Example
//!
//! ```
//! use u_admission::model::{Capacity, Dataset, DatasetRecord};
//! use u_admission::pipeline::{Pipeline, PipelineConfig, Strategy};
//!
//! let record = DatasetRecord::new(["A1", "A2", "A3"], ["R1", "R2"])
//!     .with_capacity("R1", Capacity::new(2))
//!     .with_capacity("R2", Capacity::new(1))
//!     .with_agent_preferences("A1", &["R1", "R2"])
//!     .with_agent_preferences("A2", &["R1", "R2"])
//!     .with_agent_preferences("A3", &["R1", "R2"])
//!     .with_resource_preferences("R1", &["A3", "A1", "A2"])
//!     .with_resource_preferences("R2", &["A2", "A1", "A3"]);
//! let dataset = Dataset::from_record(record)?;
//!
//! let report = Pipeline::new(PipelineConfig::default()).run(&dataset)?;
//! let greedy = report.outcome(Strategy::Greedy).unwrap();
//! assert_eq!(greedy.cost, 1);
//! assert!(greedy.satisfaction.is_some());
//! # Ok::<(), u_admission::AdmissionError>(())
//! ```

pub mod error;
pub mod graph;
pub mod greedy;
pub mod model;
pub mod pipeline;
pub mod refine;
pub mod sa;
pub mod score;
pub mod tabu;

#[cfg(test)]
mod fixtures;

pub use error::{AdmissionError, Result};
