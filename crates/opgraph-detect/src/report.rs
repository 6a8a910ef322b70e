//! Detection results.

use opgraph_core::{Comparator, NodeId, Status};
use serde::{Deserialize, Serialize};

use crate::confusion::ConfusionMatrix;
use crate::frontier::FrontierEntry;

/// Counters describing how a run unfolded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Outer cycles (seed scan followed by frontier drain).
    pub cycles: u64,
    /// Nodes that became trusted seeds during a seed scan.
    pub seeds: u64,
    /// Entries pushed on the frontier; at most one per node.
    pub frontier_pushes: u64,
    /// Entries popped after their node had already been classified.
    pub discarded_entries: u64,
    /// Uniform draws consumed by malicious comparators.
    pub noise_draws: u64,
}

/// One classification, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub node: NodeId,
    pub comparator: Comparator,
    pub status: Status,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub network_size: usize,
    /// Seed of the noise stream the run was configured with.
    pub seed: u64,
    pub matrix: ConfusionMatrix,
    pub stats: RunStats,
    /// Empty unless tracing was enabled in the config.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<Classification>,
    /// Frontier pushes in order; empty unless tracing was enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<FrontierEntry>,
}

impl DetectionReport {
    /// Number of nodes classified; equals `network_size` for a finished run.
    pub fn total(&self) -> u64 {
        self.matrix.total()
    }
}
