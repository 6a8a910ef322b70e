//! Ground-truth loading.
//!
//! The malicious set is the first line of a text file: whitespace-separated
//! original node ids. Every node not listed is honest. Anomalies are not
//! fatal: a node listed twice stays malicious and an id outside the analysed
//! component is ignored, both with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LoadError;
use crate::id::NodeId;
use crate::network::Network;
use crate::status::Status;

/// Actual status of every node of a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruth {
    statuses: Vec<Status>,
    duplicates: Vec<u32>,
    outside: Vec<u32>,
}

impl GroundTruth {
    /// Every node honest.
    pub fn all_honest(node_count: usize) -> Self {
        GroundTruth {
            statuses: vec![Status::Honest; node_count],
            duplicates: Vec::new(),
            outside: Vec::new(),
        }
    }

    /// Marks the given dense ids malicious. Ids `>= node_count` are recorded
    /// as outside the network.
    pub fn from_malicious(node_count: usize, malicious: impl IntoIterator<Item = NodeId>) -> Self {
        let mut truth = GroundTruth::all_honest(node_count);
        for node in malicious {
            truth.mark(node.index(), node.0);
        }
        truth
    }

    /// Reads the malicious list at `path` for `network`.
    pub fn load(path: impl AsRef<Path>, network: &Network) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(|e| LoadError::io(path, e))?;
        let truth = GroundTruth::parse(&first_line, network, path)?;
        tracing::info!(
            path = %path.display(),
            malicious = truth.malicious_count(),
            nodes = truth.len(),
            "loaded ground truth"
        );
        Ok(truth)
    }

    /// Parses one line of original ids against `network`.
    pub fn parse(line: &str, network: &Network, source: &Path) -> Result<Self, LoadError> {
        let mut truth = GroundTruth::all_honest(network.node_count());
        for token in line.split_whitespace() {
            let original: u32 = token.parse().map_err(|_| {
                LoadError::parse(
                    source,
                    1,
                    format!("invalid node id '{}': expected a non-negative integer", token),
                )
            })?;
            match network.node_for_original(original) {
                Some(node) => truth.mark(node.index(), original),
                None => truth.mark(usize::MAX, original),
            }
        }
        Ok(truth)
    }

    fn mark(&mut self, index: usize, original: u32) {
        match self.statuses.get_mut(index) {
            Some(status @ Status::Honest) => *status = Status::Malicious,
            Some(Status::Malicious) => {
                tracing::warn!(node = original, "node is more than once listed as malicious");
                self.duplicates.push(original);
            }
            None => {
                tracing::warn!(node = original, "malicious node is not in the analysed component, ignored");
                self.outside.push(original);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn status(&self, node: NodeId) -> Option<Status> {
        self.statuses.get(node.index()).copied()
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn malicious_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_malicious()).count()
    }

    /// Original ids listed more than once, in listing order.
    pub fn duplicates(&self) -> &[u32] {
        &self.duplicates
    }

    /// Listed ids that are not part of the network, in listing order.
    pub fn outside(&self) -> &[u32] {
        &self.outside
    }
}
