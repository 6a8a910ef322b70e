//! Status inference engine.
//!
//! The only place a node's guessed status is decided. Two rules:
//!
//! - **Comparator agreement** ([`agrees_malicious`]): a comparator judges a
//!   candidate malicious only if the candidate conflicts with *every* other
//!   node in the comparator's neighborhood. A pair conflicts unless both
//!   nodes are honest. A malicious comparator inverts each signal when its
//!   noise draw is at most [`FLIP_PROBABILITY`]; an honest comparator never
//!   draws.
//! - **Classification** ([`classify`]): with a fixed comparator, its verdict
//!   is final. Without one, every neighbor of the candidate acts as a
//!   comparator and votes; ties go to honest.
//!
//! The agreement loop stops at the first non-conflicting signal, so no draw
//! is consumed after the verdict is known. Together with the classification
//! order fixed by the driver, this pins down the noise stream consumption.

use opgraph_core::{Comparator, NeighborhoodProvider, NodeId, Status};

use crate::context::DetectionContext;
use crate::error::DetectError;
use crate::noise::NoiseSource;
use crate::report::Classification;

/// A malicious comparator inverts a signal when its draw is at most this.
pub const FLIP_PROBABILITY: f64 = 0.5;

/// Whether `comparator` judges `candidate` malicious.
pub fn agrees_malicious<P, N>(
    ctx: &mut DetectionContext<'_, P, N>,
    candidate: NodeId,
    comparator: NodeId,
) -> Result<bool, DetectError>
where
    P: NeighborhoodProvider,
    N: NoiseSource,
{
    ctx.provider.check_node(candidate)?;
    ctx.provider.check_node(comparator)?;
    Ok(comparator_verdict(ctx, candidate, comparator))
}

fn comparator_verdict<P, N>(
    ctx: &mut DetectionContext<'_, P, N>,
    candidate: NodeId,
    comparator: NodeId,
) -> bool
where
    P: NeighborhoodProvider,
    N: NoiseSource,
{
    let provider = ctx.provider;
    let lying = ctx.store.actual(comparator).is_malicious();
    let candidate_honest = ctx.store.actual(candidate).is_honest();
    // The comparator's neighborhood contains the candidate itself.
    let others = provider.neighborhood_size(comparator).saturating_sub(1);

    let mut unanimous = true;
    for &other in provider
        .neighbors(comparator)
        .iter()
        .filter(|&&w| w != candidate)
        .take(others)
    {
        let mut conflict = !(candidate_honest && ctx.store.actual(other).is_honest());
        if lying {
            ctx.stats.noise_draws += 1;
            if ctx.noise.unif01() <= FLIP_PROBABILITY {
                conflict = !conflict;
            }
        }
        unanimous &= conflict;
        if !unanimous {
            break;
        }
    }
    unanimous
}

/// Decides, records and scores the status of `candidate`.
///
/// Fails with [`DetectError::AlreadyClassified`] if the candidate already
/// has a guess; the store and the matrix are left untouched in that case.
pub fn classify<P, N>(
    ctx: &mut DetectionContext<'_, P, N>,
    candidate: NodeId,
    comparator: Comparator,
) -> Result<Status, DetectError>
where
    P: NeighborhoodProvider,
    N: NoiseSource,
{
    let provider = ctx.provider;
    provider.check_node(candidate)?;
    if let Some(status) = ctx.store.guessed(candidate) {
        return Err(DetectError::AlreadyClassified {
            node: candidate,
            status,
        });
    }

    let status = match comparator {
        Comparator::Uncertain => {
            let mut honest_votes = 0usize;
            let mut malicious_votes = 0usize;
            for &voter in provider.neighbors(candidate) {
                if comparator_verdict(ctx, candidate, voter) {
                    malicious_votes += 1;
                } else {
                    honest_votes += 1;
                }
            }
            if honest_votes >= malicious_votes {
                Status::Honest
            } else {
                Status::Malicious
            }
        }
        Comparator::Fixed(trusted) => {
            provider.check_node(trusted)?;
            if comparator_verdict(ctx, candidate, trusted) {
                Status::Malicious
            } else {
                Status::Honest
            }
        }
    };

    ctx.store.record(candidate, status)?;
    let actual = ctx.store.actual(candidate);
    ctx.matrix.record(actual, status);
    if let Some(trace) = ctx.trace.as_mut() {
        trace.push(Classification {
            node: candidate,
            comparator,
            status,
        });
    }
    tracing::trace!(node = %candidate, %comparator, guessed = %status, %actual, "classified");

    Ok(status)
}
