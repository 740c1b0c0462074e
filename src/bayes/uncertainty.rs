//! Monte Carlo propagation of input uncertainty through the posterior.
//!
//! Each iteration perturbs the three inputs with bounded uniform noise,
//! clamps them into a safe domain, and evaluates the closed form:
//!
//! - innocent base rate: `± u · mean` (multiplicative), clamped to `[0.001, 0.5]`
//! - sensitivity, specificity: `± u` (additive), clamped to `[0.1, 0.99]`

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::bayes::posterior::posterior_risk;
use crate::error::AppError;
use crate::math::{UniformSource, percentile, sort_ascending, trial_rng};

pub const DEFAULT_MC_ITERATIONS: usize = 2000;
pub const DEFAULT_UNCERTAINTY: f64 = 0.05;

const BASE_RATE_BOUNDS: (f64, f64) = (0.001, 0.5);
const RATE_BOUNDS: (f64, f64) = (0.1, 0.99);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UncertaintyConfig {
    pub iterations: usize,
    /// Half-width of the perturbation band.
    pub uncertainty: f64,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_MC_ITERATIONS,
            uncertainty: DEFAULT_UNCERTAINTY,
        }
    }
}

impl UncertaintyConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.iterations == 0 {
            return Err(AppError::invalid_input("Monte Carlo iterations must be > 0."));
        }
        if !(self.uncertainty.is_finite() && (0.0..1.0).contains(&self.uncertainty)) {
            return Err(AppError::invalid_input(format!(
                "Uncertainty must be in [0, 1), got {}.",
                self.uncertainty
            )));
        }
        Ok(())
    }
}

/// Empirical distribution of the posterior risk.
#[derive(Debug, Clone, Serialize)]
pub struct UncertaintySummary {
    pub iterations: usize,
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
    /// All draws, sorted ascending.
    #[serde(skip)]
    pub samples: Vec<f64>,
}

impl UncertaintySummary {
    pub fn from_samples(mut samples: Vec<f64>) -> Self {
        sort_ascending(&mut samples);
        Self {
            iterations: samples.len(),
            p5: percentile(&samples, 0.05),
            p50: percentile(&samples, 0.50),
            p95: percentile(&samples, 0.95),
            samples,
        }
    }
}

fn centered<R: UniformSource + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_uniform() - 0.5) * 2.0
}

/// One perturbed evaluation of the posterior.
pub fn perturbed_risk<R: UniformSource + ?Sized>(
    p_innocent: f64,
    sensitivity: f64,
    specificity: f64,
    uncertainty: f64,
    rng: &mut R,
) -> f64 {
    let base = (p_innocent + centered(rng) * uncertainty * p_innocent)
        .clamp(BASE_RATE_BOUNDS.0, BASE_RATE_BOUNDS.1);
    let sens = (sensitivity + centered(rng) * uncertainty).clamp(RATE_BOUNDS.0, RATE_BOUNDS.1);
    let spec = (specificity + centered(rng) * uncertainty).clamp(RATE_BOUNDS.0, RATE_BOUNDS.1);
    posterior_risk(base, sens, spec)
}

pub fn propagate_uncertainty<R: UniformSource + ?Sized>(
    p_innocent: f64,
    sensitivity: f64,
    specificity: f64,
    config: &UncertaintyConfig,
    rng: &mut R,
) -> UncertaintySummary {
    let samples: Vec<f64> = (0..config.iterations)
        .map(|_| perturbed_risk(p_innocent, sensitivity, specificity, config.uncertainty, rng))
        .collect();
    let summary = UncertaintySummary::from_samples(samples);
    debug!(iterations = config.iterations, p5 = summary.p5, p50 = summary.p50, p95 = summary.p95, "uncertainty propagated");
    summary
}

/// Parallel [`propagate_uncertainty`]; iteration `i` draws from `trial_rng(seed, i)`.
pub fn propagate_uncertainty_par(
    p_innocent: f64,
    sensitivity: f64,
    specificity: f64,
    config: &UncertaintyConfig,
    seed: u64,
) -> UncertaintySummary {
    let samples: Vec<f64> = (0..config.iterations)
        .into_par_iter()
        .map(|i| {
            let mut rng = trial_rng(seed, i as u64);
            perturbed_risk(p_innocent, sensitivity, specificity, config.uncertainty, &mut rng)
        })
        .collect();
    UncertaintySummary::from_samples(samples)
}
