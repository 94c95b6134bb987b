//! Simulated Annealing (SA).
//!
//! Trajectory search that always takes improving moves and takes a
//! worsening move of size `Δ` with probability `exp(-Δ/T)`. The
//! temperature `T` shrinks geometrically each iteration, so late
//! iterations behave like a descent. The runner reports the best solution
//! it visited.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
pub use types::SaProblem;
