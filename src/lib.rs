//! `policy-sim` library crate.
//!
//! The binary (`psim`) is a thin wrapper around this library so that:
//!
//! - the simulators are testable without spawning processes
//! - every routine takes an injectable random source and is reusable from other
//!   front-ends (dashboards, notebooks, batch jobs)

pub mod app;
pub mod bayes;
pub mod cli;
pub mod domain;
pub mod error;
pub mod math;
pub mod report;
pub mod sim;
