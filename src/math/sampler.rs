//! Random categorical sampling.
//!
//! Every simulator draws its randomness through [`UniformSource`], a single
//! "next uniform float" operation. Any `rand` generator satisfies it, so callers
//! pass a seeded `StdRng` when they need reproducible output and tests can
//! supply scripted sequences.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A source of uniform floats in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// Draw one index from a normalized probability vector.
///
/// Walks the running sum of `probs` until it exceeds a single uniform draw.
/// If rounding leaves the draw unconsumed, the last index is returned.
/// Returns `0` for an empty vector.
pub fn sample_categorical<R: UniformSource + ?Sized>(probs: &[f64], rng: &mut R) -> usize {
    let u = rng.next_uniform();
    let mut cum = 0.0;
    for (i, p) in probs.iter().enumerate() {
        cum += p;
        if u < cum {
            return i;
        }
    }
    probs.len().saturating_sub(1)
}

/// Draw an index uniformly from `0..n` (every entity equally likely).
pub fn sample_uniform_index<R: UniformSource + ?Sized>(n: usize, rng: &mut R) -> usize {
    if n == 0 {
        return 0;
    }
    let idx = (rng.next_uniform() * n as f64) as usize;
    idx.min(n - 1)
}

/// Categorical sampler with a precomputed cumulative table.
///
/// Same distribution as [`sample_categorical`], but each draw is a binary search
/// instead of a linear walk. The generators draw once per event, so for large
/// populations this is the difference between `O(M·N)` and `O(M·log N)`.
#[derive(Debug, Clone)]
pub struct CategoricalSampler {
    cumulative: Vec<f64>,
}

impl CategoricalSampler {
    pub fn new(probs: &[f64]) -> Self {
        let mut cumulative = Vec::with_capacity(probs.len());
        let mut cum = 0.0;
        for p in probs {
            cum += p;
            cumulative.push(cum);
        }
        Self { cumulative }
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    pub fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R) -> usize {
        let u = rng.next_uniform();
        let idx = self.cumulative.partition_point(|&c| c <= u);
        idx.min(self.cumulative.len().saturating_sub(1))
    }
}

/// Deterministic per-trial generator derived from a base seed.
///
/// Parallel runners give each trial its own stream so results do not depend on
/// scheduling order.
pub fn trial_rng(seed: u64, trial: u64) -> StdRng {
    let derived = seed ^ trial.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    StdRng::seed_from_u64(derived)
}
