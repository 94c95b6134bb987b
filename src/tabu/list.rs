//! Bounded FIFO memory of recent move keys.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Recently applied move keys, oldest evicted first.
///
/// Push, evict and lookup are O(1).
#[derive(Debug, Clone)]
pub struct TabuList<K: Eq + Hash> {
    capacity: usize,
    queue: VecDeque<K>,
    counts: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> TabuList<K> {
    /// A list remembering at most `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity + 1),
            counts: HashMap::with_capacity(capacity + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    /// Appends `key`, evicting and returning the oldest key once the list
    /// exceeds its capacity.
    pub fn push(&mut self, key: K) -> Option<K> {
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        self.queue.push_back(key);
        if self.queue.len() > self.capacity {
            let oldest = self.queue.pop_front()?;
            if let Some(n) = self.counts.get_mut(&oldest) {
                *n -= 1;
                if *n == 0 {
                    self.counts.remove(&oldest);
                }
            }
            Some(oldest)
        } else {
            None
        }
    }

    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.queue.iter()
    }
}
