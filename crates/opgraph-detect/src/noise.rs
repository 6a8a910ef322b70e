//! Comparator noise sources.
//!
//! A malicious comparator inverts each of its signals when a uniform draw in
//! `[0, 1)` is at most 0.5. The draws come from a [`NoiseSource`] injected
//! into the detection context: [`SeededNoise`] for real runs, and
//! [`ScriptedNoise`] when a test needs to pick the outcome of every draw.
//!
//! Reproducibility: given the same seed, [`SeededNoise`] yields the same
//! stream, and the engine consumes it in a fixed order.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A stream of uniform draws in `[0, 1)`.
pub trait NoiseSource {
    fn unif01(&mut self) -> f64;
}

/// ChaCha8-backed deterministic stream.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: ChaCha8Rng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        SeededNoise {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn unif01(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, starting over when it runs out.
///
/// An empty script yields `1.0`, a value that never inverts a signal.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNoise {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedNoise {
    pub fn new(draws: Vec<f64>) -> Self {
        ScriptedNoise { draws, next: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl NoiseSource for ScriptedNoise {
    fn unif01(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 1.0;
        }
        let value = self.draws[self.next % self.draws.len()];
        self.next += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_stream_is_reproducible() {
        let mut a = SeededNoise::new(31415);
        let mut b = SeededNoise::new(31415);
        for _ in 0..100 {
            assert_eq!(a.unif01().to_bits(), b.unif01().to_bits());
        }
    }

    #[test]
    fn seeded_draws_are_unit_interval() {
        let mut noise = SeededNoise::new(1);
        for _ in 0..1000 {
            let x = noise.unif01();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededNoise::new(1);
        let mut b = SeededNoise::new(2);
        let same = (0..32).filter(|_| a.unif01() == b.unif01()).count();
        assert!(same < 32);
    }

    #[test]
    fn script_replays_and_wraps() {
        let mut noise = ScriptedNoise::new(vec![0.1, 0.9]);
        assert_eq!(noise.unif01(), 0.1);
        assert_eq!(noise.unif01(), 0.9);
        assert_eq!(noise.unif01(), 0.1);
        assert_eq!(noise.consumed(), 3);
    }

    #[test]
    fn empty_script_never_inverts() {
        let mut noise = ScriptedNoise::default();
        assert_eq!(noise.unif01(), 1.0);
        assert_eq!(noise.consumed(), 0);
    }
}
