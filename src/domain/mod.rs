//! Domain types shared by the simulators.
//!
//! This module defines:
//!
//! - population risk tiers (`RiskTier`)
//! - policy inputs (`ReplacementStrategy`, `SimulationParams`)
//! - concentration curves (`CurvePoint`, `ConcentrationCurve`)
//! - Bayesian model inputs (`BayesInputs`)

pub mod types;

pub use types::*;
