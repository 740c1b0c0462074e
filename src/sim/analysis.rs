//! Observed vs pure-chance concentration ("data density bias" view).
//!
//! One observed population is generated with the tier mixture and compared
//! against the null curve at the same population size and event total.

use serde::Serialize;
use tracing::debug;

use crate::domain::{ConcentrationCurve, DEFAULT_CONCENTRATION_FACTOR};
use crate::math::UniformSource;
use crate::sim::concentration::concentration_curve;
use crate::sim::null_dist::{simulate_null_curve, simulate_null_curve_par};
use crate::sim::population::generate_population;
use crate::sim::relative_risk::RiskComparison;

/// Percentile cuts reported in the metrics panel.
pub const METRIC_PERCENTILES: [f64; 2] = [2.0, 10.0];

/// Points kept when down-sampling a curve for display.
const DISPLAY_POINTS: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationAnalysis {
    pub population: usize,
    pub total_events: u64,
    pub observed: ConcentrationCurve,
    pub null: ConcentrationCurve,
}

/// Down-sampled curves in percent units, aligned by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampledSeries {
    pub percentiles: Vec<f64>,
    pub observed: Vec<f64>,
    pub null: Vec<f64>,
    pub uniform: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationMetrics {
    pub comparisons: Vec<RiskComparison>,
    /// Events per entity (`M / N`).
    pub data_density: f64,
}

impl ConcentrationAnalysis {
    /// Keep every `max(1, N / 100)`-th point, starting from the top entity.
    pub fn sampled(&self) -> SampledSeries {
        let n = self.observed.len().min(self.null.len());
        let step = (n / DISPLAY_POINTS).max(1);
        let mut out = SampledSeries::default();
        for i in (0..n).step_by(step) {
            let pct = self.observed.points[i].percentile;
            out.percentiles.push(pct);
            out.observed.push(self.observed.points[i].share * 100.0);
            out.null.push(self.null.points[i].share * 100.0);
            out.uniform.push(pct);
        }
        out
    }

    /// Naive, null and adjusted ratios at the 2% and 10% cuts.
    ///
    /// Shares are read from the sampled series, as the dashboard displays them.
    pub fn metrics(&self) -> ConcentrationMetrics {
        let series = self.sampled();
        let comparisons = METRIC_PERCENTILES
            .iter()
            .map(|&k| {
                let idx = series.percentiles.iter().position(|&p| p >= k);
                let observed = idx.map_or(0.0, |i| series.observed[i] / 100.0);
                let null = idx.map_or(0.0, |i| series.null[i] / 100.0);
                RiskComparison::from_shares(k, observed, null)
            })
            .collect();

        let data_density = if self.population == 0 {
            0.0
        } else {
            self.total_events as f64 / self.population as f64
        };

        ConcentrationMetrics {
            comparisons,
            data_density,
        }
    }
}

/// Generate an observed population and its null baseline from one source.
pub fn analyze_concentration<R: UniformSource + ?Sized>(
    population: usize,
    total_events: u64,
    null_iterations: usize,
    rng: &mut R,
) -> ConcentrationAnalysis {
    let counts = generate_population(population, total_events, DEFAULT_CONCENTRATION_FACTOR, rng);
    let observed = concentration_curve(&counts);
    let null = simulate_null_curve(population, total_events, null_iterations, rng);
    debug!(population, total_events, null_iterations, "concentration analysis complete");
    ConcentrationAnalysis {
        population,
        total_events,
        observed,
        null,
    }
}

/// As [`analyze_concentration`], with the null trials run in parallel.
pub fn analyze_concentration_par<R: UniformSource + ?Sized>(
    population: usize,
    total_events: u64,
    null_iterations: usize,
    rng: &mut R,
    seed: u64,
) -> ConcentrationAnalysis {
    let counts = generate_population(population, total_events, DEFAULT_CONCENTRATION_FACTOR, rng);
    let observed = concentration_curve(&counts);
    let null = simulate_null_curve_par(population, total_events, null_iterations, seed);
    ConcentrationAnalysis {
        population,
        total_events,
        observed,
        null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn reference_scenario_shows_concentration_and_bias() {
        let mut rng = StdRng::seed_from_u64(2021);
        let analysis = analyze_concentration(1000, 1500, 100, &mut rng);

        let observed_top2 = analysis.observed.share_at_rank(19);
        let null_top2 = analysis.null.share_at_rank(19);
        assert!(observed_top2 > 0.08, "observed top-2% share {observed_top2}");
        assert!(
            observed_top2 > 5.0 * 0.02,
            "observed top-2% share {observed_top2} not far above uniform"
        );
        assert!(null_top2 > 0.02, "null top-2% share {null_top2}");
        assert!(observed_top2 > null_top2);
    }

    #[test]
    fn sampled_series_uses_hundred_point_step() {
        let mut rng = StdRng::seed_from_u64(3);
        let analysis = analyze_concentration(1000, 1500, 10, &mut rng);
        let series = analysis.sampled();
        assert_eq!(series.percentiles.len(), 100);
        assert!((series.percentiles[0] - 0.1).abs() < 1e-12);
        assert!((series.percentiles[1] - 1.1).abs() < 1e-12);
        assert_eq!(series.percentiles, series.uniform);
    }

    #[test]
    fn small_population_keeps_every_point() {
        let mut rng = StdRng::seed_from_u64(4);
        let analysis = analyze_concentration(40, 60, 10, &mut rng);
        assert_eq!(analysis.sampled().percentiles.len(), 40);
    }

    #[test]
    fn metrics_report_both_cuts() {
        let mut rng = StdRng::seed_from_u64(5);
        let analysis = analyze_concentration(1000, 1500, 50, &mut rng);
        let metrics = analysis.metrics();
        assert_eq!(metrics.comparisons.len(), 2);
        assert!((metrics.data_density - 1.5).abs() < 1e-12);
        let top2 = metrics.comparisons[0];
        assert_eq!(top2.percentile, 2.0);
        assert!(top2.naive_ratio > top2.null_ratio);
        assert!(top2.adjusted_ratio > 1.0);
    }

    #[test]
    fn parallel_variant_matches_shape() {
        let mut rng = StdRng::seed_from_u64(6);
        let analysis = analyze_concentration_par(500, 750, 20, &mut rng, 6);
        assert_eq!(analysis.observed.len(), 500);
        assert_eq!(analysis.null.len(), 500);
        assert!((analysis.null.points.last().unwrap().share - 1.0).abs() < 1e-9);
    }
}
