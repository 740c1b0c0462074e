//! Terminal reports for each simulator.
//!
//! Formatting lives here so the simulators stay pure and output changes are
//! localized.

pub mod format;

pub use format::*;
