//! Per-node status store.
//!
//! Holds, for every node, the ground-truth status, the guessed status (write
//! once, `None` while still to be decided) and the scheduled marker (set the
//! first time the node is put on the frontier, never cleared).

use opgraph_core::{NodeId, Status};

use crate::error::DetectError;

#[derive(Debug, Clone)]
pub struct StatusStore {
    actual: Vec<Status>,
    guessed: Vec<Option<Status>>,
    scheduled: Vec<bool>,
}

impl StatusStore {
    /// Creates a store with every guess pending and nothing scheduled.
    pub fn new(actual: Vec<Status>) -> Self {
        let len = actual.len();
        StatusStore {
            actual,
            guessed: vec![None; len],
            scheduled: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.actual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }

    pub fn actual(&self, node: NodeId) -> Status {
        self.actual[node.index()]
    }

    pub fn guessed(&self, node: NodeId) -> Option<Status> {
        self.guessed[node.index()]
    }

    pub fn is_pending(&self, node: NodeId) -> bool {
        self.guessed[node.index()].is_none()
    }

    /// Writes the guess for `node`. Fails if a guess was already made.
    pub fn record(&mut self, node: NodeId, status: Status) -> Result<(), DetectError> {
        let slot = &mut self.guessed[node.index()];
        if let Some(previous) = *slot {
            return Err(DetectError::AlreadyClassified {
                node,
                status: previous,
            });
        }
        *slot = Some(status);
        Ok(())
    }

    pub fn is_scheduled(&self, node: NodeId) -> bool {
        self.scheduled[node.index()]
    }

    /// Marks `node` scheduled. Returns `false` if it already was.
    pub fn mark_scheduled(&mut self, node: NodeId) -> bool {
        !std::mem::replace(&mut self.scheduled[node.index()], true)
    }

    /// First node at or after `start`, in index order, whose guess is pending.
    pub fn first_pending_from(&self, start: usize) -> Option<NodeId> {
        self.guessed
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, guess)| guess.is_none())
            .map(|(index, _)| NodeId(index as u32))
    }
}
