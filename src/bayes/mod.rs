//! Bayesian false-confession risk.
//!
//! - `posterior`: closed-form posterior risk, acceptability threshold, presets
//! - `uncertainty`: Monte Carlo propagation of input uncertainty
//! - `assessment`: point estimate + interval + threshold verdict in one record

pub mod assessment;
pub mod posterior;
pub mod uncertainty;

pub use assessment::*;
pub use posterior::*;
pub use uncertainty::*;
