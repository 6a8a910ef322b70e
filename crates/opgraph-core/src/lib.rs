//! Graph model for opgraph.
//!
//! Provides everything the detection engine consumes but does not decide:
//! dense node ids, statuses, the [`NeighborhoodProvider`] trait with its
//! materialized [`Neighborhoods`], and loading of the analysed [`Network`]
//! and its [`GroundTruth`] from text files.
//!
//! # Modules
//!
//! - [`id`]: NodeId newtype over petgraph indices
//! - [`status`]: Status and Comparator
//! - [`error`]: CoreError and LoadError
//! - [`neighborhood`]: NeighborhoodProvider trait and Neighborhoods
//! - [`network`]: edge-list parsing, largest component, simplification
//! - [`ground_truth`]: malicious-list parsing

pub mod error;
pub mod ground_truth;
pub mod id;
pub mod neighborhood;
pub mod network;
pub mod status;

// Re-export commonly used types
pub use error::{CoreError, LoadError};
pub use ground_truth::GroundTruth;
pub use id::NodeId;
pub use neighborhood::{NeighborhoodProvider, Neighborhoods};
pub use network::Network;
pub use status::{Comparator, Status};
