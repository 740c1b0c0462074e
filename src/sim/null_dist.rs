//! Monte Carlo null distribution for concentration curves.
//!
//! Under the null, every event lands on an entity chosen uniformly at random,
//! so any concentration above the diagonal is pure chance. Each trial is sorted
//! on its own before shares are averaged, so the averaged axis is rank rather
//! than entity identity.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::ConcentrationCurve;
use crate::math::{UniformSource, sample_uniform_index, trial_rng};
use crate::sim::concentration::{cumulative_shares, curve_from_shares};

/// Default number of null trials for the dashboard view.
pub const DEFAULT_NULL_ITERATIONS: usize = 100;

/// One null trial: uniform assignment, sorted, as cumulative shares.
pub fn null_trial_shares<R: UniformSource + ?Sized>(
    population: usize,
    total_events: u64,
    rng: &mut R,
) -> Vec<f64> {
    let mut counts = vec![0u64; population];
    if population > 0 {
        for _ in 0..total_events {
            counts[sample_uniform_index(population, rng)] += 1;
        }
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));
    cumulative_shares(&counts, total_events)
}

/// Expected concentration curve under purely random assignment.
///
/// Averages `iterations` independently sorted trials position by position.
/// With zero iterations the curve is flat at zero.
pub fn simulate_null_curve<R: UniformSource + ?Sized>(
    population: usize,
    total_events: u64,
    iterations: usize,
    rng: &mut R,
) -> ConcentrationCurve {
    let mut sums = vec![0.0; population];
    for _ in 0..iterations {
        let shares = null_trial_shares(population, total_events, rng);
        accumulate(&mut sums, &shares);
    }
    debug!(population, total_events, iterations, "null curve estimated");
    curve_from_shares(average(sums, iterations))
}

/// Parallel [`simulate_null_curve`]; trial `i` draws from `trial_rng(seed, i)`.
pub fn simulate_null_curve_par(
    population: usize,
    total_events: u64,
    iterations: usize,
    seed: u64,
) -> ConcentrationCurve {
    let trials: Vec<Vec<f64>> = (0..iterations)
        .into_par_iter()
        .map(|i| {
            let mut rng = trial_rng(seed, i as u64);
            null_trial_shares(population, total_events, &mut rng)
        })
        .collect();
    // Summed in trial order so the result does not depend on scheduling.
    let mut sums = vec![0.0; population];
    for shares in &trials {
        accumulate(&mut sums, shares);
    }
    debug!(population, total_events, iterations, seed, "null curve estimated (parallel)");
    curve_from_shares(average(sums, iterations))
}

fn accumulate(acc: &mut [f64], shares: &[f64]) {
    for (a, s) in acc.iter_mut().zip(shares) {
        *a += s;
    }
}

fn average(mut sums: Vec<f64>, iterations: usize) -> Vec<f64> {
    if iterations == 0 {
        return sums;
    }
    let k = iterations as f64;
    for s in &mut sums {
        *s /= k;
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn null_curve_is_monotone_and_complete() {
        let mut rng = StdRng::seed_from_u64(11);
        let curve = simulate_null_curve(200, 300, 50, &mut rng);
        assert_eq!(curve.len(), 200);
        for w in curve.points.windows(2) {
            assert!(w[1].share + 1e-12 >= w[0].share);
        }
        assert!((curve.points.last().unwrap().share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sparse_data_looks_more_concentrated_under_the_null() {
        // Same population, falling event density: the top 2% share rises even
        // though nobody is systematically riskier.
        let mut rng = StdRng::seed_from_u64(12);
        let n = 1000;
        let rank = n * 2 / 100 - 1;
        let dense = simulate_null_curve(n, 10_000, 30, &mut rng).share_at_rank(rank);
        let medium = simulate_null_curve(n, 1_500, 30, &mut rng).share_at_rank(rank);
        let sparse = simulate_null_curve(n, 100, 30, &mut rng).share_at_rank(rank);
        assert!(dense < medium, "dense={dense} medium={medium}");
        assert!(medium < sparse, "medium={medium} sparse={sparse}");
    }

    #[test]
    fn null_share_exceeds_diagonal_at_low_density() {
        let mut rng = StdRng::seed_from_u64(13);
        let curve = simulate_null_curve(1000, 1500, 50, &mut rng);
        assert!(curve.share_at_rank(19) > 0.02);
    }

    #[test]
    fn zero_events_or_iterations_stay_flat() {
        let mut rng = StdRng::seed_from_u64(14);
        assert!(simulate_null_curve(10, 0, 5, &mut rng).shares().iter().all(|&s| s == 0.0));
        assert!(simulate_null_curve(10, 50, 0, &mut rng).shares().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn parallel_estimate_is_reproducible() {
        let a = simulate_null_curve_par(300, 450, 40, 99);
        let b = simulate_null_curve_par(300, 450, 40, 99);
        for (x, y) in a.shares().iter().zip(b.shares()) {
            assert!((x - y).abs() < 1e-12);
        }
        assert!((a.points.last().unwrap().share - 1.0).abs() < 1e-9);
    }
}
