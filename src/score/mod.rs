//! Satisfaction scoring.
//!
//! Rates a finished assignment from both sides with points that halve
//! per rank step, normalized to 0–100 so strategies can be compared.

mod satisfaction;

pub use satisfaction::{rank_points, satisfaction_score, SatisfactionScore};
