//! Closed-form posterior risk.
//!
//! With `p_innocent = 1 − base_rate_guilty`:
//!
//! ```text
//! P(tactic | innocent) = 1 − specificity
//! P(tactic | guilty)   = sensitivity
//! P(tactic)            = sensitivity · (1 − p_innocent) + (1 − specificity) · p_innocent
//! risk                 = (1 − specificity) · p_innocent / P(tactic)
//! ```

use serde::Serialize;

use crate::domain::BayesInputs;

/// Probability that a tactic-elicited confession comes from an innocent person.
///
/// Returns `0.0` when the tactic never fires (`P(tactic) = 0`).
pub fn posterior_risk(p_innocent: f64, sensitivity: f64, specificity: f64) -> f64 {
    let p_tactic_given_innocent = 1.0 - specificity;
    let p_tactic_given_guilty = sensitivity;
    let p_tactic = p_tactic_given_guilty * (1.0 - p_innocent) + p_tactic_given_innocent * p_innocent;
    if p_tactic == 0.0 {
        return 0.0;
    }
    p_tactic_given_innocent * p_innocent / p_tactic
}

pub fn posterior_risk_for(inputs: &BayesInputs) -> f64 {
    posterior_risk(inputs.p_innocent(), inputs.sensitivity, inputs.specificity)
}

/// Largest tolerable false-positive risk when `lambda` false negatives are
/// accepted per false positive: `1 / (1 + λ)`.
pub fn acceptable_risk(lambda: f64) -> f64 {
    1.0 / (1.0 + lambda)
}

/// Acceptable risk in percent for λ = 1..=`max_lambda`.
pub fn acceptability_curve(max_lambda: u32) -> Vec<(u32, f64)> {
    (1..=max_lambda)
        .map(|l| (l, acceptable_risk(l as f64) * 100.0))
        .collect()
}

/// Named input sets shown as one-click scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub inputs: BayesInputs,
    pub description: &'static str,
}

pub static PRESETS: [Preset; 3] = [
    Preset {
        label: "Conservative",
        inputs: BayesInputs {
            base_rate_guilty: 0.95,
            sensitivity: 0.83,
            specificity: 0.85,
        },
        description: "95% of confessions are true, tactics work on 83% of guilty suspects, 85% of innocent suspects resist.",
    },
    Preset {
        label: "Moderate",
        inputs: BayesInputs {
            base_rate_guilty: 0.92,
            sensitivity: 0.80,
            specificity: 0.80,
        },
        description: "8% false confession rate and somewhat weaker protection for innocent suspects.",
    },
    Preset {
        label: "Pessimistic",
        inputs: BayesInputs {
            base_rate_guilty: 0.88,
            sensitivity: 0.90,
            specificity: 0.70,
        },
        description: "12% false confession rate; effective tactics that only 70% of innocent suspects resist.",
    },
];

pub fn preset(label: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(label))
}

/// The preset whose inputs match exactly, if any.
pub fn matching_preset(inputs: &BayesInputs) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.inputs == *inputs)
}
