//! Concentration and policy simulation.
//!
//! Responsibilities:
//!
//! - generate over-dispersed synthetic populations (`population`)
//! - turn count vectors into cumulative-share curves (`concentration`)
//! - estimate the pure-chance baseline curve (`null_dist`)
//! - relative-risk ratios and their bias adjustment (`relative_risk`)
//! - observed-vs-null comparison for the dashboard view (`analysis`)
//! - removal/replacement policy trials (`policy`)
//! - the published pre/post persistence grid (`persistence`)

pub mod analysis;
pub mod concentration;
pub mod null_dist;
pub mod persistence;
pub mod policy;
pub mod population;
pub mod relative_risk;

pub use analysis::*;
pub use concentration::*;
pub use null_dist::*;
pub use persistence::*;
pub use policy::*;
pub use population::*;
pub use relative_risk::*;
