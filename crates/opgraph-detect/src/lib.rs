//! Malicious-node detection by comparator agreement and trust propagation.
//!
//! Every node of a network is classified honest or malicious using only
//! comparisons between a node and its neighbors. Ground truth is used to
//! model what each comparator observes and to score the guesses; the
//! decision rule itself never reads a node's own actual status except
//! through a comparator's signal.
//!
//! # Modules
//!
//! - [`engine`]: comparator-agreement and classification rules
//! - [`driver`]: seed scan / frontier drain state machine
//! - [`frontier`]: FIFO work list
//! - [`store`]: per-node actual, guessed and scheduled state
//! - [`confusion`]: TP/TN/FP/FN accumulator
//! - [`noise`]: seeded and scripted noise sources
//! - [`context`]: per-run processing context
//! - [`config`], [`report`], [`error`]

pub mod config;
pub mod confusion;
pub mod context;
pub mod driver;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod noise;
pub mod report;
pub mod store;

pub use config::{DetectorConfig, DEFAULT_DISTANCE, DEFAULT_SEED};
pub use confusion::ConfusionMatrix;
pub use context::DetectionContext;
pub use driver::Detector;
pub use error::DetectError;
pub use noise::{NoiseSource, ScriptedNoise, SeededNoise};
pub use report::{Classification, DetectionReport, RunStats};

use opgraph_core::{GroundTruth, Network};

/// Builds the neighborhoods of `network` at `config.distance` hops and runs
/// a seeded detection pass against `truth`.
pub fn detect(
    network: &Network,
    truth: &GroundTruth,
    config: &DetectorConfig,
) -> Result<DetectionReport, DetectError> {
    let neighborhoods = network.neighborhoods(config.distance)?;
    tracing::debug!(
        nodes = network.node_count(),
        distance = config.distance,
        seed = config.seed,
        "neighborhoods ready"
    );
    Detector::new(&neighborhoods, *config).run(truth)
}
