//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the requested simulation
//! - prints a text or JSON report

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PSIM_LOG";

/// Entry point for the `psim` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    configure_threads(cli.threads)?;

    let seed = cli.seed;
    let json = cli.json;
    match cli.command {
        Command::Concentration(args) => {
            info!(seed, "running concentration analysis");
            let run = pipeline::run_concentration(&args, seed)?;
            emit(json, &run, || crate::report::format_concentration(&run.analysis, &run.metrics))
        }
        Command::Policy(args) => {
            info!(seed, "running policy simulation");
            let run = pipeline::run_policy(&args, seed)?;
            emit(json, &run, || crate::report::format_policy(&run.params, &run.impact))
        }
        Command::Persistence(args) => {
            let matrix = crate::sim::persistence_matrix(args.months);
            emit(json, &matrix.cells(), || crate::report::format_persistence(&matrix))
        }
        Command::Posterior(args) => {
            info!(seed, "running posterior risk assessment");
            let assessment = pipeline::run_posterior(&args, seed)?;
            emit(json, &assessment, || crate::report::format_assessment(&assessment))
        }
        Command::Acceptability(args) => {
            let curve = crate::bayes::acceptability_curve(args.max_lambda);
            emit(json, &curve, || crate::report::format_acceptability(&curve))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so stdout stays clean for reports and JSON.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn configure_threads(threads: usize) -> Result<(), AppError> {
    if threads == 0 {
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| AppError::internal(format!("Failed to configure worker threads: {e}")))
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), AppError> {
    if json {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::internal(format!("Failed to serialize results: {e}")))?;
        println!("{rendered}");
    } else {
        println!("{}", text());
    }
    Ok(())
}
