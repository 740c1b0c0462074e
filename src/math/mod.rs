//! Numeric building blocks shared by the simulators.
//!
//! - `sampler`: the injectable uniform source and categorical draws
//! - `stats`: summary statistics over Monte Carlo outcomes

pub mod sampler;
pub mod stats;

pub use sampler::*;
pub use stats::*;
