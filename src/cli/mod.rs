//! Command-line parsing for the policy simulator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! simulation code. Defaults mirror the dashboard's initial state.

use clap::{Args, Parser, Subcommand};

use crate::bayes::{DEFAULT_MC_ITERATIONS, DEFAULT_UNCERTAINTY};
use crate::domain::ReplacementStrategy;
use crate::sim::{DEFAULT_NULL_ITERATIONS, DEFAULT_POLICY_TRIALS};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "psim", version, about = "Concentration, early-warning policy and confession-risk simulators")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Random seed; every run with the same seed and flags is reproducible.
    #[arg(long, global = true, env = "PSIM_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Emit results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Worker threads for Monte Carlo trials (0 = one per core).
    #[arg(long, global = true, env = "PSIM_THREADS", default_value_t = 0)]
    pub threads: usize,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare observed complaint concentration with the pure-chance baseline.
    Concentration(PopulationArgs),
    /// Simulate removing the top-ranked officers and replacing them.
    Policy(PolicyArgs),
    /// Print the pre/post persistence grid.
    Persistence(PersistenceArgs),
    /// Posterior risk that a tactic-elicited confession is false.
    Posterior(PosteriorArgs),
    /// Acceptable risk threshold as a function of the harm ratio.
    Acceptability(AcceptabilityArgs),
}

/// Population size and event total.
#[derive(Debug, Args, Clone)]
pub struct PopulationArgs {
    /// Number of officers (100..=15000).
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub officers: usize,

    /// Number of complaints over the reference window (10..=50000).
    #[arg(short = 'm', long, default_value_t = 1500)]
    pub complaints: u64,

    /// Null-distribution trials.
    #[arg(long, default_value_t = DEFAULT_NULL_ITERATIONS)]
    pub iterations: usize,
}

#[derive(Debug, Args, Clone)]
pub struct PolicyArgs {
    /// Number of officers (100..=15000).
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub officers: usize,

    /// Number of complaints over the reference window (10..=50000).
    #[arg(short = 'm', long, default_value_t = 1500)]
    pub complaints: u64,

    /// Remove the top k percent of the pre-period ranking.
    #[arg(short = 'k', long, default_value_t = 10.0)]
    pub top_percentile: f64,

    /// Who replaces removed officers.
    #[arg(long, value_enum, default_value_t = ReplacementStrategy::Median)]
    pub replacement: ReplacementStrategy,

    /// Pre-period observation window in months.
    #[arg(long, default_value_t = 18)]
    pub months: u32,

    /// Monte Carlo trials.
    #[arg(long, default_value_t = DEFAULT_POLICY_TRIALS)]
    pub trials: usize,
}

#[derive(Debug, Args, Clone)]
pub struct PersistenceArgs {
    /// Observation window in months.
    #[arg(long, default_value_t = 18)]
    pub months: u32,
}

#[derive(Debug, Args, Clone)]
pub struct PosteriorArgs {
    /// Start from a named preset (conservative, moderate, pessimistic).
    ///
    /// Explicit rate flags override the preset's values.
    #[arg(long)]
    pub preset: Option<String>,

    /// P(guilty | confession) before the tactic is considered.
    #[arg(long)]
    pub base_rate: Option<f64>,

    /// P(tactic elicits confession | guilty).
    #[arg(long)]
    pub sensitivity: Option<f64>,

    /// P(no confession | innocent).
    #[arg(long)]
    pub specificity: Option<f64>,

    /// Harm ratio: false negatives tolerated per false positive.
    #[arg(long, default_value_t = 10.0)]
    pub lambda: f64,

    /// Monte Carlo iterations.
    #[arg(long, default_value_t = DEFAULT_MC_ITERATIONS)]
    pub iterations: usize,

    /// Half-width of the input perturbation band.
    #[arg(long, default_value_t = DEFAULT_UNCERTAINTY)]
    pub uncertainty: f64,
}

#[derive(Debug, Args, Clone)]
pub struct AcceptabilityArgs {
    /// Largest harm ratio to tabulate.
    #[arg(long, default_value_t = 100)]
    pub max_lambda: u32,
}
