//! Processing context shared by the engine and the driver.
//!
//! [`DetectionContext`] bundles everything one run mutates: the status
//! store, the confusion matrix, the noise stream, the run counters and the
//! optional classification and scheduling traces. The neighborhoods are borrowed read-only.

use opgraph_core::{NeighborhoodProvider, Status};

use crate::confusion::ConfusionMatrix;
use crate::error::DetectError;
use crate::frontier::FrontierEntry;
use crate::noise::NoiseSource;
use crate::report::{Classification, DetectionReport, RunStats};
use crate::store::StatusStore;

pub struct DetectionContext<'g, P, N> {
    pub(crate) provider: &'g P,
    pub(crate) store: StatusStore,
    pub(crate) matrix: ConfusionMatrix,
    pub(crate) noise: N,
    pub(crate) stats: RunStats,
    pub(crate) trace: Option<Vec<Classification>>,
    pub(crate) schedule: Option<Vec<FrontierEntry>>,
}

impl<'g, P: NeighborhoodProvider, N: NoiseSource> DetectionContext<'g, P, N> {
    /// Creates a context with every node pending.
    ///
    /// `actual` must hold one status per node of `provider`.
    pub fn new(
        provider: &'g P,
        actual: Vec<Status>,
        noise: N,
        trace_enabled: bool,
    ) -> Result<Self, DetectError> {
        if actual.len() != provider.node_count() {
            return Err(DetectError::SizeMismatch {
                truth: actual.len(),
                graph: provider.node_count(),
            });
        }
        Ok(DetectionContext {
            provider,
            store: StatusStore::new(actual),
            matrix: ConfusionMatrix::default(),
            noise,
            stats: RunStats::default(),
            trace: trace_enabled.then(Vec::new),
            schedule: trace_enabled.then(Vec::new),
        })
    }

    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    pub fn matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// True once every node has been classified.
    pub fn is_complete(&self) -> bool {
        self.matrix.total() == self.store.len() as u64
    }

    /// Finishes the run; `seed` is recorded in the report as given.
    pub fn into_report(self, seed: u64) -> DetectionReport {
        DetectionReport {
            network_size: self.store.len(),
            seed,
            matrix: self.matrix,
            stats: self.stats,
            trace: self.trace.unwrap_or_default(),
            schedule: self.schedule.unwrap_or_default(),
        }
    }
}
