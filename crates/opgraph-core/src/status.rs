//! Node statuses and comparator selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Final classification of a node, either as ground truth or as a guess.
///
/// A guess that has not been made yet is represented as `Option<Status>`
/// set to `None` by the status store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Honest,
    Malicious,
}

impl Status {
    pub fn is_honest(self) -> bool {
        matches!(self, Status::Honest)
    }

    pub fn is_malicious(self) -> bool {
        matches!(self, Status::Malicious)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Honest => write!(f, "honest"),
            Status::Malicious => write!(f, "malicious"),
        }
    }
}

/// The reference frame used to judge a candidate node.
///
/// `Fixed` names a node already classified honest whose neighborhood is
/// trusted. `Uncertain` means no trusted comparator exists yet, so every
/// neighbor of the candidate votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Fixed(NodeId),
    Uncertain,
}

impl Comparator {
    /// Returns the trusted node, if any.
    pub fn node(self) -> Option<NodeId> {
        match self {
            Comparator::Fixed(node) => Some(node),
            Comparator::Uncertain => None,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Fixed(node) => write!(f, "{}", node),
            Comparator::Uncertain => write!(f, "uncertain"),
        }
    }
}
