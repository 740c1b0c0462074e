//! Point risk, uncertainty interval and acceptability verdict together.

use serde::Serialize;

use crate::bayes::posterior::{acceptable_risk, matching_preset, posterior_risk_for};
use crate::bayes::uncertainty::{UncertaintyConfig, UncertaintySummary, propagate_uncertainty_par};
use crate::domain::BayesInputs;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub inputs: BayesInputs,
    pub preset: Option<&'static str>,
    pub risk: f64,
    pub uncertainty: UncertaintySummary,
    pub lambda: f64,
    pub threshold: f64,
    pub below_threshold: bool,
    /// `|threshold − risk|` in percentage points.
    pub margin_points: f64,
}

pub fn assess_risk(
    inputs: &BayesInputs,
    lambda: f64,
    config: &UncertaintyConfig,
    seed: u64,
) -> Result<RiskAssessment, AppError> {
    inputs.validate()?;
    config.validate()?;
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(AppError::invalid_input(format!("Harm ratio must be >= 0, got {lambda}.")));
    }

    let risk = posterior_risk_for(inputs);
    let uncertainty = propagate_uncertainty_par(
        inputs.p_innocent(),
        inputs.sensitivity,
        inputs.specificity,
        config,
        seed,
    );
    let threshold = acceptable_risk(lambda);

    Ok(RiskAssessment {
        inputs: *inputs,
        preset: matching_preset(inputs).map(|p| p.label),
        risk,
        uncertainty,
        lambda,
        threshold,
        below_threshold: risk < threshold,
        margin_points: ((threshold - risk) * 100.0).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayes::posterior::preset;

    #[test]
    fn conservative_preset_is_well_below_threshold() {
        let inputs = preset("Conservative").unwrap().inputs;
        let a = assess_risk(&inputs, 10.0, &UncertaintyConfig::default(), 1).unwrap();
        assert_eq!(a.preset, Some("Conservative"));
        assert!(a.below_threshold);
        assert!((a.threshold - 1.0 / 11.0).abs() < 1e-12);
        assert!((a.margin_points - (a.threshold - a.risk) * 100.0).abs() < 1e-9);
        assert!(a.uncertainty.p5 <= a.uncertainty.p95);
    }

    #[test]
    fn strict_harm_ratio_flips_the_verdict() {
        let inputs = preset("Pessimistic").unwrap().inputs;
        let a = assess_risk(&inputs, 100.0, &UncertaintyConfig::default(), 2).unwrap();
        // 0.3 · 0.12 / (0.9 · 0.88 + 0.036) ≈ 0.0435 > 1/101
        assert!(!a.below_threshold);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let inputs = BayesInputs {
            base_rate_guilty: 1.2,
            sensitivity: 0.8,
            specificity: 0.8,
        };
        let err = assess_risk(&inputs, 10.0, &UncertaintyConfig::default(), 3).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let ok = preset("Moderate").unwrap().inputs;
        assert!(assess_risk(&ok, -1.0, &UncertaintyConfig::default(), 3).is_err());
    }
}
