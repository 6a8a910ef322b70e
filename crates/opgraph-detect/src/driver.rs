//! Propagation driver.
//!
//! Classifies every node by alternating two phases until the confusion
//! matrix has scored the whole network:
//!
//! 1. **Seed scan**: walk nodes in index order and classify each pending one
//!    by an uncertain vote. The first node found honest with more than one
//!    neighbor becomes a trusted seed; its unscheduled neighbors go on the
//!    frontier with the seed as comparator, and the scan stops. Exactly one
//!    seed per cycle.
//! 2. **Frontier drain**: pop entries in FIFO order. A still-pending node is
//!    classified against its stored comparator; if honest with more than one
//!    neighbor it becomes a comparator for its own unscheduled neighbors.
//!    Entries whose node is already classified are discarded.
//!
//! Trust only flows through nodes judged honest. A scheduled node is never
//! rescheduled, so the frontier sees at most one entry per node.

use opgraph_core::{Comparator, GroundTruth, NeighborhoodProvider, NodeId, Status};

use crate::config::DetectorConfig;
use crate::context::DetectionContext;
use crate::engine::classify;
use crate::error::DetectError;
use crate::frontier::{Frontier, FrontierEntry};
use crate::noise::{NoiseSource, SeededNoise};
use crate::report::DetectionReport;

/// Runs the detection heuristic over a fixed set of neighborhoods.
///
/// The neighborhoods are taken as given; `config.distance` is not consulted
/// here (see [`crate::detect`] for the end-to-end entry point).
pub struct Detector<'g, P> {
    provider: &'g P,
    config: DetectorConfig,
}

impl<'g, P: NeighborhoodProvider> Detector<'g, P> {
    pub fn new(provider: &'g P, config: DetectorConfig) -> Self {
        Detector { provider, config }
    }

    /// Runs with a [`SeededNoise`] stream seeded from the config.
    pub fn run(&self, truth: &GroundTruth) -> Result<DetectionReport, DetectError> {
        self.run_with_noise(truth.statuses().to_vec(), SeededNoise::new(self.config.seed))
    }

    /// Runs with an explicit noise source.
    pub fn run_with_noise<N: NoiseSource>(
        &self,
        actual: Vec<Status>,
        noise: N,
    ) -> Result<DetectionReport, DetectError> {
        let ctx = DetectionContext::new(self.provider, actual, noise, self.config.trace_enabled)?;
        let mut propagation = Propagation::new(ctx);
        propagation.run()?;
        let report = propagation.ctx.into_report(self.config.seed);
        tracing::info!(
            nodes = report.network_size,
            tp = report.matrix.tp,
            tn = report.matrix.tn,
            fp = report.matrix.fp,
            fn_ = report.matrix.fn_,
            cycles = report.stats.cycles,
            noise_draws = report.stats.noise_draws,
            "detection finished"
        );
        Ok(report)
    }
}

/// Mutable state of one run: the context, the frontier and the scan cursor.
struct Propagation<'g, P, N> {
    ctx: DetectionContext<'g, P, N>,
    frontier: Frontier,
    /// Every node before this index is already classified.
    cursor: usize,
}

impl<'g, P: NeighborhoodProvider, N: NoiseSource> Propagation<'g, P, N> {
    fn new(ctx: DetectionContext<'g, P, N>) -> Self {
        let frontier = Frontier::with_capacity(ctx.store.len());
        Propagation {
            ctx,
            frontier,
            cursor: 0,
        }
    }

    fn run(&mut self) -> Result<(), DetectError> {
        while !self.ctx.is_complete() {
            self.ctx.stats.cycles += 1;
            let classified_before = self.ctx.matrix.total();
            self.seed_scan()?;
            self.drain()?;
            if self.ctx.matrix.total() == classified_before {
                // Unreachable while some node is pending: the scan always
                // classifies the first pending node.
                break;
            }
        }
        self.ctx.stats.frontier_pushes = self.frontier.pushed() as u64;
        Ok(())
    }

    fn seed_scan(&mut self) -> Result<(), DetectError> {
        while let Some(node) = self.ctx.store.first_pending_from(self.cursor) {
            self.cursor = node.index() + 1;
            let status = classify(&mut self.ctx, node, Comparator::Uncertain)?;
            if self.trust(node, status) {
                self.ctx.stats.seeds += 1;
                tracing::debug!(
                    seed = %node,
                    cycle = self.ctx.stats.cycles,
                    frontier = self.frontier.len(),
                    "trusted seed"
                );
                break;
            }
        }
        Ok(())
    }

    fn drain(&mut self) -> Result<(), DetectError> {
        while let Some(entry) = self.frontier.pop_front() {
            if !self.ctx.store.is_pending(entry.candidate) {
                self.ctx.stats.discarded_entries += 1;
                continue;
            }
            let status = classify(&mut self.ctx, entry.candidate, entry.comparator)?;
            self.trust(entry.candidate, status);
        }
        Ok(())
    }

    /// Enqueues the unscheduled neighbors of `node` with `node` as their
    /// comparator, if `node` was judged honest and has more than one
    /// neighbor. Returns whether `node` became a comparator.
    fn trust(&mut self, node: NodeId, status: Status) -> bool {
        let provider = self.ctx.provider;
        if !status.is_honest() || provider.neighborhood_size(node) <= 1 {
            return false;
        }
        for &neighbor in provider.neighbors(node) {
            if self.ctx.store.mark_scheduled(neighbor) {
                let comparator = Comparator::Fixed(node);
                self.frontier.push_back(neighbor, comparator);
                if let Some(schedule) = self.ctx.schedule.as_mut() {
                    schedule.push(FrontierEntry {
                        candidate: neighbor,
                        comparator,
                    });
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use opgraph_core::Neighborhoods;

    use super::*;
    use crate::confusion::ConfusionMatrix;
    use crate::noise::ScriptedNoise;

    fn hoods(adjacency: Vec<Vec<u32>>) -> Neighborhoods {
        Neighborhoods::from_adjacency(adjacency).unwrap()
    }

    fn triangle() -> Neighborhoods {
        hoods(vec![vec![1, 2], vec![0, 2], vec![0, 1]])
    }

    fn matrix(tp: u64, tn: u64, fp: u64, fn_: u64) -> ConfusionMatrix {
        ConfusionMatrix { tp, tn, fp, fn_ }
    }

    fn traced() -> DetectorConfig {
        DetectorConfig::default().with_trace(true)
    }

    #[test]
    fn honest_triangle_is_all_true_negatives() {
        let g = triangle();
        let report = Detector::new(&g, DetectorConfig::default())
            .run(&GroundTruth::all_honest(3))
            .unwrap();
        assert_eq!(report.matrix, matrix(0, 3, 0, 0));
        assert_eq!(report.total(), 3);
        assert_eq!(report.stats.cycles, 1);
        assert_eq!(report.stats.seeds, 1);
        assert_eq!(report.stats.noise_draws, 0);
        // 1 and 2 from the seed, then 0 from node 1; 0 is stale when popped.
        assert_eq!(report.stats.frontier_pushes, 3);
        assert_eq!(report.stats.discarded_entries, 1);
    }

    #[test]
    fn schedule_records_each_push_once() {
        let g = triangle();
        let report = Detector::new(&g, traced().with_seed(11))
            .run(&GroundTruth::all_honest(3))
            .unwrap();
        assert_eq!(report.seed, 11);
        let entry = |candidate: u32, comparator: u32| FrontierEntry {
            candidate: NodeId(candidate),
            comparator: Comparator::Fixed(NodeId(comparator)),
        };
        // The trusted seed 0 is never marked scheduled, so node 1 enqueues it.
        assert_eq!(report.schedule, vec![entry(1, 0), entry(2, 0), entry(0, 1)]);
        assert_eq!(report.schedule.len() as u64, report.stats.frontier_pushes);
    }

    #[test]
    fn untraced_runs_record_no_schedule() {
        let g = triangle();
        let report = Detector::new(&g, DetectorConfig::default())
            .run(&GroundTruth::all_honest(3))
            .unwrap();
        assert_eq!(report.seed, DetectorConfig::default().seed);
        assert!(report.schedule.is_empty());
        assert!(report.trace.is_empty());
    }

    #[test]
    fn triangle_with_lying_comparator_kept_honest_seed() {
        let g = triangle();
        let actual = vec![Status::Honest, Status::Malicious, Status::Honest];
        // The draw is above the threshold: node 1 tells the truth to node 0.
        let report = Detector::new(&g, traced())
            .run_with_noise(actual, ScriptedNoise::new(vec![0.9]))
            .unwrap();
        assert_eq!(report.matrix, matrix(1, 1, 1, 0));
        assert_eq!(report.stats.noise_draws, 1);
        let order: Vec<NodeId> = report.trace.iter().map(|c| c.node).collect();
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(report.trace[1].comparator, Comparator::Fixed(NodeId(0)));
    }

    #[test]
    fn triangle_with_lying_comparator_misleads_first_vote() {
        let g = triangle();
        let actual = vec![Status::Honest, Status::Malicious, Status::Honest];
        // First draw inverts: node 0 is voted malicious, so the scan goes on
        // to node 1 (malicious) and node 2 (seed, with nobody left to judge).
        let report = Detector::new(&g, traced())
            .run_with_noise(actual, ScriptedNoise::new(vec![0.1, 0.9]))
            .unwrap();
        assert_eq!(report.matrix, matrix(1, 1, 1, 0));
        assert_eq!(report.stats.noise_draws, 2);
        assert_eq!(report.stats.seeds, 1);
        assert_eq!(report.stats.discarded_entries, 2);
        assert!(report
            .trace
            .iter()
            .all(|c| c.comparator == Comparator::Uncertain));
    }

    #[test]
    fn scan_continues_past_non_seeds() {
        // Path 0-1-2: the leaves have a single neighbor and cannot seed; the
        // middle node is voted malicious by its two vacuous leaves.
        let g = hoods(vec![vec![1], vec![0, 2], vec![1]]);
        let report = Detector::new(&g, DetectorConfig::default())
            .run(&GroundTruth::all_honest(3))
            .unwrap();
        assert_eq!(report.matrix, matrix(0, 2, 1, 0));
        assert_eq!(report.stats.cycles, 1);
        assert_eq!(report.stats.seeds, 0);
        assert_eq!(report.stats.frontier_pushes, 0);
    }

    #[test]
    fn edge_pair_is_flagged_by_vacuous_agreement() {
        let g = hoods(vec![vec![1], vec![0]]);
        let report = Detector::new(&g, DetectorConfig::default())
            .run(&GroundTruth::all_honest(2))
            .unwrap();
        assert_eq!(report.matrix, matrix(0, 0, 2, 0));
    }

    #[test]
    fn isolated_nodes_resolve_honest() {
        let g = hoods(vec![vec![], vec![]]);
        let truth = GroundTruth::from_malicious(2, [NodeId(1)]);
        let report = Detector::new(&g, DetectorConfig::default())
            .run(&truth)
            .unwrap();
        assert_eq!(report.matrix, matrix(0, 1, 0, 1));
    }

    #[test]
    fn one_seed_per_cycle_across_clusters() {
        // Two disjoint triangles {0,1,2} and {3,4,5}.
        let g = hoods(vec![
            vec![1, 2],
            vec![0, 2],
            vec![0, 1],
            vec![4, 5],
            vec![3, 5],
            vec![3, 4],
        ]);
        let report = Detector::new(&g, traced())
            .run(&GroundTruth::all_honest(6))
            .unwrap();
        assert_eq!(report.matrix, matrix(0, 6, 0, 0));
        assert_eq!(report.stats.cycles, 2);
        assert_eq!(report.stats.seeds, 2);
        let order: Vec<u32> = report.trace.iter().map(|c| c.node.0).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn malicious_nodes_never_become_comparators() {
        // Node 0 is a hub; node 2 is malicious and is the only link to 4.
        let g = hoods(vec![
            vec![1, 2, 3],
            vec![0, 3],
            vec![0, 4],
            vec![0, 1],
            vec![2],
        ]);
        let truth = GroundTruth::from_malicious(5, [NodeId(2)]);
        let report = Detector::new(&g, traced()).run(&truth).unwrap();
        assert_eq!(report.total(), 5);
        for entry in &report.trace {
            if let Comparator::Fixed(c) = entry.comparator {
                let judged = report.trace.iter().find(|e| e.node == c).unwrap();
                assert_eq!(judged.status, Status::Honest);
            }
        }
    }

    #[test]
    fn same_seed_same_result() {
        let g = triangle();
        let truth = GroundTruth::from_malicious(3, [NodeId(1)]);
        let config = DetectorConfig::default().with_seed(99);
        let a = Detector::new(&g, config).run(&truth).unwrap();
        let b = Detector::new(&g, config).run(&truth).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total(), 3);
    }

    #[test]
    fn mismatched_truth_is_rejected() {
        let g = triangle();
        let err = Detector::new(&g, DetectorConfig::default())
            .run(&GroundTruth::all_honest(2))
            .unwrap_err();
        assert!(matches!(err, DetectError::SizeMismatch { .. }));
    }
}
