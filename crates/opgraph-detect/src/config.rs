//! Run configuration.

use serde::{Deserialize, Serialize};

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 31415;

/// Hop distance used when none is supplied.
pub const DEFAULT_DISTANCE: u32 = 1;

/// Configuration for one detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Seed of the comparator-noise generator.
    pub seed: u64,
    /// Hop distance of the neighborhoods.
    pub distance: u32,
    /// Whether to record every classification in the report.
    pub trace_enabled: bool,
}

impl DetectorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_distance(mut self, distance: u32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_trace(mut self, trace_enabled: bool) -> Self {
        self.trace_enabled = trace_enabled;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            seed: DEFAULT_SEED,
            distance: DEFAULT_DISTANCE,
            trace_enabled: false,
        }
    }
}
