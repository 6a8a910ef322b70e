//! Detection error types.
//!
//! Every variant is a caller error: the driver never produces them on valid
//! input, but the engine entry points are public and check their inputs.

use opgraph_core::{CoreError, NodeId, Status};

/// Errors produced by the detection engine and driver.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// A node's guessed status is write-once.
    #[error("node {node} is already classified as {status}")]
    AlreadyClassified { node: NodeId, status: Status },

    /// Ground truth and neighborhoods disagree on the node count.
    #[error("ground truth covers {truth} node(s) but the graph has {graph}")]
    SizeMismatch { truth: usize, graph: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}
