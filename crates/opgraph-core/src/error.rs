//! Error types for opgraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants. [`CoreError`]
//! covers misuse of the in-memory graph model; [`LoadError`] covers reading
//! edge lists and ground-truth files from disk.

use std::path::PathBuf;

use thiserror::Error;

use crate::id::NodeId;

/// Errors produced by the in-memory graph model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A node index outside `0..node_count` was used.
    #[error("node not found: NodeId({id}) with {node_count} node(s)", id = id.0)]
    NodeNotFound { id: NodeId, node_count: usize },

    /// Neighborhoods are only defined for a hop distance of at least 1.
    #[error("invalid neighborhood distance: {distance} (must be at least 1)")]
    InvalidDistance { distance: u32 },
}

/// Errors produced while loading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot read '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is malformed.
    #[error("parse error in '{path}' at line {line}: {reason}", path = path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The edge list has no component with at least two vertices.
    #[error("graph in '{path}' has no edges between distinct vertices", path = path.display())]
    EmptyGraph { path: PathBuf },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}
