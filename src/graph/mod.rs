//! Preference-dominance graphs.
//!
//! Each resource ranks the agents that reach its eligibility threshold by
//! score. A *program* is one seat track (regular or reserved) of a
//! resource. Nodes are eligible (program, agent) pairs; an edge `u -> v`
//! states that `v` is no worse than `u`, either for the agent (preference
//! edge) or for the program (score edge).
//!
//! The graph is a static structure for downstream validity checks and
//! rendering; building it performs no search.

mod builder;
mod ranking;
mod types;

pub use builder::GraphBuilder;
pub use ranking::{derive_resource_rankings, Ranking};
pub use types::{DominanceGraph, Edge, EdgeKind, Node, Program, Track};
