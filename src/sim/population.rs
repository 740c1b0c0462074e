//! Synthetic population generation with a three-tier risk mixture.
//!
//! Each entity is independently assigned a hidden tier (low 70%, medium 25%,
//! high 5%). Tier weights are normalized into a sampling distribution and every
//! event is then assigned to one entity by a categorical draw, so the total is
//! conserved exactly.

use tracing::trace;

use crate::domain::{CountVector, DEFAULT_CONCENTRATION_FACTOR, RiskTier};
use crate::math::{CategoricalSampler, UniformSource};

/// Assign every entity a risk tier from one uniform draw each.
pub fn assign_risk_tiers<R: UniformSource + ?Sized>(population: usize, rng: &mut R) -> Vec<RiskTier> {
    (0..population)
        .map(|_| RiskTier::from_uniform(rng.next_uniform()))
        .collect()
}

/// Normalize tier weights into a probability vector summing to 1.
pub fn risk_probabilities(tiers: &[RiskTier], concentration_factor: f64) -> Vec<f64> {
    let weights: Vec<f64> = tiers.iter().map(|t| t.weight(concentration_factor)).collect();
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return vec![0.0; tiers.len()];
    }
    weights.into_iter().map(|w| w / total).collect()
}

/// Distribute `total_events` over `population` entities.
///
/// Returns an all-zero vector when `total_events == 0` and an empty vector when
/// `population == 0`. Small populations with many events are sampled in full.
pub fn generate_population<R: UniformSource + ?Sized>(
    population: usize,
    total_events: u64,
    concentration_factor: f64,
    rng: &mut R,
) -> CountVector {
    let mut counts = vec![0u64; population];
    if population == 0 {
        return counts;
    }

    let tiers = assign_risk_tiers(population, rng);
    let probs = risk_probabilities(&tiers, concentration_factor);
    let sampler = CategoricalSampler::new(&probs);

    for _ in 0..total_events {
        counts[sampler.sample(rng)] += 1;
    }

    trace!(population, total_events, concentration_factor, "generated synthetic population");
    counts
}

/// [`generate_population`] with the default concentration factor (2.5).
pub fn generate_default_population<R: UniformSource + ?Sized>(
    population: usize,
    total_events: u64,
    rng: &mut R,
) -> CountVector {
    generate_population(population, total_events, DEFAULT_CONCENTRATION_FACTOR, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mass_is_conserved() {
        let mut rng = StdRng::seed_from_u64(1);
        for (n, m) in [(1, 50), (10, 0), (100, 1), (1000, 1500), (250, 10_000)] {
            let counts = generate_population(n, m, 2.5, &mut rng);
            assert_eq!(counts.len(), n);
            assert_eq!(counts.iter().sum::<u64>(), m, "n={n} m={m}");
        }
    }

    #[test]
    fn zero_events_gives_zero_vector() {
        let mut rng = StdRng::seed_from_u64(2);
        let counts = generate_default_population(20, 0, &mut rng);
        assert_eq!(counts, vec![0; 20]);
    }

    #[test]
    fn empty_population_gives_empty_vector() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_default_population(0, 10, &mut rng).is_empty());
    }

    #[test]
    fn single_entity_receives_everything() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(generate_default_population(1, 37, &mut rng), vec![37]);
    }

    #[test]
    fn probabilities_are_normalized() {
        let tiers = [RiskTier::Low, RiskTier::Medium, RiskTier::High, RiskTier::Low];
        let probs = risk_probabilities(&tiers, 2.5);
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        // 0.5 + 1.5 + 5.0 + 0.5 = 7.5
        assert!((probs[2] - 5.0 / 7.5).abs() < 1e-12);
    }

    #[test]
    fn tier_mix_matches_band_probabilities() {
        let mut rng = StdRng::seed_from_u64(5);
        let tiers = assign_risk_tiers(20_000, &mut rng);
        let high = tiers.iter().filter(|t| **t == RiskTier::High).count() as f64 / 20_000.0;
        let low = tiers.iter().filter(|t| **t == RiskTier::Low).count() as f64 / 20_000.0;
        assert!((high - 0.05).abs() < 0.01, "high={high}");
        assert!((low - 0.70).abs() < 0.02, "low={low}");
    }

    #[test]
    fn population_is_over_dispersed() {
        // A Poisson-like uniform assignment has variance ≈ mean; the tier mixture
        // pushes variance well above it.
        let mut rng = StdRng::seed_from_u64(6);
        let counts = generate_default_population(2000, 10_000, &mut rng);
        let n = counts.len() as f64;
        let mean = counts.iter().sum::<u64>() as f64 / n;
        let var = counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / n;
        assert!(var > 1.5 * mean, "var={var} mean={mean}");
    }
}
