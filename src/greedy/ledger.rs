//! Remaining-seat bookkeeping.

use crate::graph::Track;
use crate::model::Dataset;

/// Free seats per resource, split into regular and reserved tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityLedger {
    regular: Vec<usize>,
    reserved: Vec<usize>,
}

impl CapacityLedger {
    /// A ledger with every seat of the dataset free.
    pub fn new(dataset: &Dataset) -> Self {
        let (regular, reserved) = (0..dataset.resource_count())
            .map(|r| {
                let c = dataset.capacity(r);
                (c.regular_quota, c.reserved_quota)
            })
            .unzip();
        Self { regular, reserved }
    }

    /// Free seats at `resource` on `track`.
    pub fn remaining(&self, resource: usize, track: Track) -> usize {
        match track {
            Track::Regular => self.regular[resource],
            Track::Reserved => self.reserved[resource],
        }
    }

    /// Free seats at `resource` over both tracks.
    pub fn total_remaining(&self, resource: usize) -> usize {
        self.regular[resource] + self.reserved[resource]
    }

    /// Takes a seat for an agent: a regular seat if one is free, otherwise
    /// a reserved seat when `eligible`. Returns the track used.
    pub fn take(&mut self, resource: usize, eligible: bool) -> Option<Track> {
        if self.regular[resource] > 0 {
            self.regular[resource] -= 1;
            Some(Track::Regular)
        } else if eligible && self.reserved[resource] > 0 {
            self.reserved[resource] -= 1;
            Some(Track::Reserved)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::small_dataset;

    #[test]
    fn test_take_prefers_regular_then_reserved() {
        let ds = small_dataset();
        let mut ledger = CapacityLedger::new(&ds);
        assert_eq!(ledger.total_remaining(1), 2);

        assert_eq!(ledger.take(1, true), Some(Track::Regular));
        assert_eq!(ledger.remaining(1, Track::Regular), 0);
        assert_eq!(ledger.take(1, false), None);
        assert_eq!(ledger.take(1, true), Some(Track::Reserved));
        assert_eq!(ledger.take(1, true), None);
        assert_eq!(ledger.total_remaining(1), 0);
    }
}
