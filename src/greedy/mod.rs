//! Greedy construction.
//!
//! Seats agents one at a time in dataset order, each at the first resource
//! in its preference list that still has a free seat. A single pass with
//! no backtracking; the result seeds local search.

mod constructor;
mod ledger;

pub use constructor::{GreedyConstructor, GreedyOutcome};
pub use ledger::CapacityLedger;
