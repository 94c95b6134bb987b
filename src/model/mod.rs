//! Admission data model.
//!
//! Boundary records ([`DatasetRecord`], [`AssignmentRecord`]) are plain
//! serde types. [`Dataset`] and [`Assignment`] are their validated,
//! index-based counterparts used by every algorithm in this crate.

mod assignment;
mod dataset;
mod record;

pub use assignment::{Assignment, SeatCount};
pub use dataset::Dataset;
pub use record::{AssignmentRecord, Capacity, CapacityRecord, DatasetRecord};
