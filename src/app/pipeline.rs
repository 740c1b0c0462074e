//! Shared run logic behind the CLI commands.
//!
//! Each function validates its inputs the way the dashboard clamps them, then
//! calls the pure simulators. Observed populations draw from a seeded `StdRng`;
//! Monte Carlo trials run in parallel with per-trial streams from the same seed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::bayes::{RiskAssessment, UncertaintyConfig, assess_risk, preset};
use crate::cli::{PolicyArgs, PopulationArgs, PosteriorArgs};
use crate::domain::{BayesInputs, SimulationParams, validate_events, validate_population};
use crate::error::AppError;
use crate::sim::{
    ConcentrationAnalysis, ConcentrationMetrics, PolicyImpact, SampledSeries, analyze_concentration_par,
    simulate_policy_impact_par,
};

/// Output of the `concentration` command.
#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationRun {
    #[serde(skip)]
    pub analysis: ConcentrationAnalysis,
    pub metrics: ConcentrationMetrics,
    pub series: SampledSeries,
}

/// Output of the `policy` command.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyRun {
    pub params: SimulationParams,
    pub impact: PolicyImpact,
}

pub fn run_concentration(args: &PopulationArgs, seed: u64) -> Result<ConcentrationRun, AppError> {
    validate_population(args.officers)?;
    validate_events(args.complaints)?;
    if args.iterations == 0 {
        return Err(AppError::invalid_input("Null-distribution iterations must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let analysis = analyze_concentration_par(args.officers, args.complaints, args.iterations, &mut rng, seed);
    let metrics = analysis.metrics();
    let series = analysis.sampled();

    Ok(ConcentrationRun {
        analysis,
        metrics,
        series,
    })
}

pub fn run_policy(args: &PolicyArgs, seed: u64) -> Result<PolicyRun, AppError> {
    let params = SimulationParams {
        population: args.officers,
        total_events: args.complaints,
        removal_percentile: args.top_percentile,
        replacement: args.replacement,
        observation_months: args.months,
    };
    params.validate()?;
    if args.trials == 0 {
        return Err(AppError::invalid_input("Policy trials must be > 0."));
    }

    let impact = simulate_policy_impact_par(&params, args.trials, seed);
    Ok(PolicyRun { params, impact })
}

/// Resolve preset + explicit overrides into model inputs.
pub fn posterior_inputs(args: &PosteriorArgs) -> Result<BayesInputs, AppError> {
    let base = match &args.preset {
        Some(label) => {
            preset(label)
                .ok_or_else(|| AppError::invalid_input(format!("Unknown preset '{label}'.")))?
                .inputs
        }
        None => crate::bayes::PRESETS[0].inputs,
    };
    Ok(BayesInputs {
        base_rate_guilty: args.base_rate.unwrap_or(base.base_rate_guilty),
        sensitivity: args.sensitivity.unwrap_or(base.sensitivity),
        specificity: args.specificity.unwrap_or(base.specificity),
    })
}

pub fn run_posterior(args: &PosteriorArgs, seed: u64) -> Result<RiskAssessment, AppError> {
    let inputs = posterior_inputs(args)?;
    let config = UncertaintyConfig {
        iterations: args.iterations,
        uncertainty: args.uncertainty,
    };
    assess_risk(&inputs, args.lambda, &config, seed)
}
