//! FIFO work list of nodes awaiting classification.
//!
//! Entries pair a candidate with the comparator it will be judged against.
//! Dequeue order is enqueue order; this is what makes trust propagation
//! breadth-first and the noise-draw order reproducible.
//!
//! The backing `VecDeque` is reserved once for the network size. Since each
//! node is enqueued at most once per run, the buffer never grows and popped
//! slots are reused by later pushes.

use std::collections::VecDeque;

use opgraph_core::{Comparator, NodeId};
use serde::{Deserialize, Serialize};

/// A candidate paired with its comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontierEntry {
    pub candidate: NodeId,
    pub comparator: Comparator,
}

#[derive(Debug, Clone, Default)]
pub struct Frontier {
    entries: VecDeque<FrontierEntry>,
    pushed: usize,
}

impl Frontier {
    pub fn with_capacity(capacity: usize) -> Self {
        Frontier {
            entries: VecDeque::with_capacity(capacity),
            pushed: 0,
        }
    }

    pub fn push_back(&mut self, candidate: NodeId, comparator: Comparator) {
        self.entries.push_back(FrontierEntry {
            candidate,
            comparator,
        });
        self.pushed += 1;
    }

    pub fn pop_front(&mut self) -> Option<FrontierEntry> {
        self.entries.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total pushes since creation.
    pub fn pushed(&self) -> usize {
        self.pushed
    }
}
