//! Removal/replacement policy simulation.
//!
//! Each trial:
//! 1. generates a pre-period population over `months / 120` of the events
//! 2. removes the top `k%` of the pre-period ranking
//! 3. generates an independent full-length post-period population
//! 4. lifts post-period counts by pre-period rank to model persistence
//! 5. nets the removed entities' post-period events against the events their
//!    replacements are expected to generate
//!
//! Trials are independent; the summary is the mean reduction plus an empirical
//! 95% interval read from the sorted outcomes.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{DEFAULT_CONCENTRATION_FACTOR, SimulationParams};
use crate::math::{UniformSource, mean, percentile, sort_ascending, trial_rng};
use crate::sim::concentration::rank_descending;
use crate::sim::population::generate_population;

/// Default number of policy trials.
pub const DEFAULT_POLICY_TRIALS: usize = 100;

const CI_LOW: f64 = 0.025;
const CI_HIGH: f64 = 0.975;

/// Aggregate outcome of the policy simulator.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyImpact {
    pub trials: usize,
    /// Mean net reduction in post-period events, in percent.
    pub mean: f64,
    /// Empirical 2.5th percentile of the trial reductions.
    pub ci_low: f64,
    /// Empirical 97.5th percentile of the trial reductions.
    pub ci_high: f64,
    pub removed_count: usize,
    /// `round(M · mean / 100)`.
    pub events_avoided: i64,
    /// `round(M · (1 − mean / 100))`.
    pub projected_events: i64,
    /// Trial reductions, sorted ascending.
    #[serde(skip)]
    pub outcomes: Vec<f64>,
}

impl PolicyImpact {
    /// Summarize trial reductions. An empty trial set reports zeros.
    pub fn from_outcomes(params: &SimulationParams, mut outcomes: Vec<f64>) -> Self {
        let avg = mean(&outcomes);
        sort_ascending(&mut outcomes);
        let m = params.total_events as f64;
        Self {
            trials: outcomes.len(),
            mean: avg,
            ci_low: percentile(&outcomes, CI_LOW),
            ci_high: percentile(&outcomes, CI_HIGH),
            removed_count: params.removed_count(),
            events_avoided: (m * avg / 100.0).round() as i64,
            projected_events: (m * (1.0 - avg / 100.0)).round() as i64,
            outcomes,
        }
    }
}

/// Post-period lift from pre-period rank.
///
/// `rank_pos` is the 0-based position in the descending pre-period ranking.
/// The top entity gets `floor(cf · M / N)`, falling linearly to ~0 at the bottom.
pub fn persistence_bonus(rank_pos: usize, params: &SimulationParams) -> u64 {
    if params.population == 0 {
        return 0;
    }
    let r = rank_pos as f64 / params.population as f64;
    let bonus = (1.0 - r) * params.correlation_factor() * params.mean_rate();
    bonus.floor().max(0.0) as u64
}

/// Run one policy trial and return the net reduction in percent.
///
/// If the post period has no events at all the reduction is undefined; the
/// trial then reports `0.0`.
pub fn run_policy_trial<R: UniformSource + ?Sized>(params: &SimulationParams, rng: &mut R) -> f64 {
    let n = params.population;

    let pre = generate_population(n, params.pre_period_events(), DEFAULT_CONCENTRATION_FACTOR, rng);
    let order = rank_descending(&pre);
    let removed_count = params.removed_count().min(n);
    let removed = &order[..removed_count];

    let mut post = generate_population(n, params.total_events, DEFAULT_CONCENTRATION_FACTOR, rng);
    for (rank_pos, &idx) in order.iter().enumerate() {
        post[idx] += persistence_bonus(rank_pos, params);
    }

    let from_removed: u64 = removed.iter().map(|&idx| post[idx]).sum();
    let replacement = removed_count as f64 * params.mean_rate() * params.replacement.factor();
    let total_post: u64 = post.iter().sum();

    if total_post == 0 {
        warn!(population = n, total_events = params.total_events, "post period has no events; trial reduction set to 0");
        return 0.0;
    }

    (from_removed as f64 - replacement) / total_post as f64 * 100.0
}

/// Run `trials` policy trials sequentially from one source.
pub fn simulate_policy_impact<R: UniformSource + ?Sized>(
    params: &SimulationParams,
    trials: usize,
    rng: &mut R,
) -> PolicyImpact {
    let outcomes: Vec<f64> = (0..trials).map(|_| run_policy_trial(params, rng)).collect();
    let impact = PolicyImpact::from_outcomes(params, outcomes);
    debug!(trials, mean = impact.mean, ci_low = impact.ci_low, ci_high = impact.ci_high, "policy simulation complete");
    impact
}

/// Parallel [`simulate_policy_impact`]; trial `i` draws from `trial_rng(seed, i)`.
pub fn simulate_policy_impact_par(params: &SimulationParams, trials: usize, seed: u64) -> PolicyImpact {
    let outcomes: Vec<f64> = (0..trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = trial_rng(seed, i as u64);
            run_policy_trial(params, &mut rng)
        })
        .collect();
    let impact = PolicyImpact::from_outcomes(params, outcomes);
    debug!(trials, seed, mean = impact.mean, "policy simulation complete (parallel)");
    impact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReplacementStrategy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params(replacement: ReplacementStrategy, months: u32) -> SimulationParams {
        SimulationParams {
            population: 500,
            total_events: 750,
            removal_percentile: 10.0,
            replacement,
            observation_months: months,
        }
    }

    #[test]
    fn interval_brackets_the_mean() {
        let mut rng = StdRng::seed_from_u64(17);
        let impact = simulate_policy_impact(&params(ReplacementStrategy::Median, 18), 60, &mut rng);
        assert_eq!(impact.trials, 60);
        assert!(impact.ci_low <= impact.mean, "{impact:?}");
        assert!(impact.mean <= impact.ci_high, "{impact:?}");
        assert_eq!(impact.removed_count, 50);
    }

    #[test]
    fn outcomes_are_sorted_and_finite() {
        let mut rng = StdRng::seed_from_u64(18);
        let impact = simulate_policy_impact(&params(ReplacementStrategy::P70To90, 60), 30, &mut rng);
        assert!(impact.outcomes.iter().all(|v| v.is_finite()));
        for w in impact.outcomes.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn costlier_replacements_reduce_less() {
        let p_cheap = params(ReplacementStrategy::Median, 18);
        let p_costly = params(ReplacementStrategy::SameDistrictP70To90, 18);
        let cheap = simulate_policy_impact_par(&p_cheap, 40, 5);
        let costly = simulate_policy_impact_par(&p_costly, 40, 5);
        // Same seeds, same draws: only the replacement term differs.
        assert!(cheap.mean > costly.mean, "cheap={} costly={}", cheap.mean, costly.mean);
    }

    #[test]
    fn persistence_bonus_falls_with_rank() {
        let p = SimulationParams {
            population: 100,
            total_events: 1000,
            removal_percentile: 10.0,
            replacement: ReplacementStrategy::Median,
            observation_months: 60,
        };
        // Top entity: floor(1.0 * 0.4 * 10) = 4.
        assert_eq!(persistence_bonus(0, &p), 4);
        // Halfway: floor(0.5 * 0.4 * 10) = 2.
        assert_eq!(persistence_bonus(50, &p), 2);
        assert_eq!(persistence_bonus(99, &p), 0);
    }

    #[test]
    fn zero_events_is_hardened() {
        let p = SimulationParams {
            population: 50,
            total_events: 0,
            removal_percentile: 10.0,
            replacement: ReplacementStrategy::Median,
            observation_months: 18,
        };
        let mut rng = StdRng::seed_from_u64(19);
        assert_eq!(run_policy_trial(&p, &mut rng), 0.0);
        let impact = simulate_policy_impact(&p, 5, &mut rng);
        assert_eq!(impact.mean, 0.0);
        assert_eq!(impact.events_avoided, 0);
    }

    #[test]
    fn empty_trial_set_reports_zeros() {
        let impact = PolicyImpact::from_outcomes(&params(ReplacementStrategy::Median, 18), Vec::new());
        assert_eq!(impact.trials, 0);
        assert_eq!(impact.mean, 0.0);
        assert_eq!(impact.ci_low, 0.0);
        assert_eq!(impact.ci_high, 0.0);
    }

    #[test]
    fn parallel_runs_are_reproducible() {
        let p = params(ReplacementStrategy::SameDistrictMedian, 18);
        let a = simulate_policy_impact_par(&p, 20, 77);
        let b = simulate_policy_impact_par(&p, 20, 77);
        assert_eq!(a.outcomes, b.outcomes);
        assert!((a.mean - b.mean).abs() < 1e-12);
    }

    #[test]
    fn projections_follow_the_mean() {
        let p = params(ReplacementStrategy::Median, 18);
        let impact = PolicyImpact::from_outcomes(&p, vec![10.0, 20.0, 30.0]);
        assert!((impact.mean - 20.0).abs() < 1e-12);
        assert_eq!(impact.events_avoided, 150);
        assert_eq!(impact.projected_events, 600);
    }
}
