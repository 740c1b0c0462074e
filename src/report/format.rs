//! Plain-text renderers.

use crate::bayes::RiskAssessment;
use crate::domain::SimulationParams;
use crate::sim::{ConcentrationAnalysis, ConcentrationMetrics, PERSISTENCE_CUTS, PersistenceMatrix, PolicyImpact};

/// Rows printed from the sampled concentration series.
const CURVE_TABLE_ROWS: usize = 20;

pub fn format_concentration(analysis: &ConcentrationAnalysis, metrics: &ConcentrationMetrics) -> String {
    let mut out = String::new();

    out.push_str("=== Data density bias: observed vs pure chance ===\n");
    out.push_str(&format!(
        "Population: {} | Events: {} | Density: {:.2} events/entity\n",
        analysis.population, analysis.total_events, metrics.data_density
    ));

    out.push_str("\nCut    Observed   Chance    Naive RR  Chance RR  Adjusted RR\n");
    for c in &metrics.comparisons {
        out.push_str(&format!(
            "Top {:<3} {:>7.1}%  {:>7.1}%  {:>8.2}  {:>9.2}  {:>11.2}\n",
            format!("{}%", c.percentile),
            c.observed_share * 100.0,
            c.null_share * 100.0,
            c.naive_ratio,
            c.null_ratio,
            c.adjusted_ratio
        ));
    }

    let series = analysis.sampled();
    let stride = (series.percentiles.len() / CURVE_TABLE_ROWS).max(1);
    out.push_str("\nPercentile  Observed  Chance   Uniform\n");
    for i in (0..series.percentiles.len()).step_by(stride) {
        out.push_str(&format!(
            "{:>9.1}%  {:>7.1}%  {:>6.1}%  {:>7.1}%\n",
            series.percentiles[i], series.observed[i], series.null[i], series.uniform[i]
        ));
    }

    out
}

pub fn format_policy(params: &SimulationParams, impact: &PolicyImpact) -> String {
    let mut out = String::new();

    out.push_str("=== Early-warning removal policy ===\n");
    out.push_str(&format!(
        "Population: {} | Events: {} | Remove top {}% ({} officers)\n",
        params.population, params.total_events, params.removal_percentile, impact.removed_count
    ));
    out.push_str(&format!(
        "Replacement: {} (x{:.2} mean rate) | Observation: {} months\n",
        params.replacement.display_name(),
        params.replacement.factor(),
        params.observation_months
    ));
    out.push_str(&format!(
        "\nNet reduction: {:.1}% (95% CI {:.1}% to {:.1}%, {} trials)\n",
        impact.mean, impact.ci_low, impact.ci_high, impact.trials
    ));
    out.push_str(&format!(
        "~{} fewer events: from {} to ~{}\n",
        impact.events_avoided, params.total_events, impact.projected_events
    ));

    out
}

pub fn format_persistence(matrix: &PersistenceMatrix) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Persistence: pre-period top k% also in post-period top j% ({} month window) ===\n",
        matrix.observation_months
    ));
    out.push_str("pre \\ post");
    for post in PERSISTENCE_CUTS {
        out.push_str(&format!("{:>8}", format!("{post}%")));
    }
    out.push('\n');
    for pre in PERSISTENCE_CUTS {
        out.push_str(&format!("{:>10}", format!("{pre}%")));
        for post in PERSISTENCE_CUTS {
            let v = matrix.get(pre, post).unwrap_or(0.0);
            out.push_str(&format!("{v:>7.1}%"));
        }
        out.push('\n');
    }

    out
}

/// One-sentence reading of a posterior risk.
pub fn interpret_risk(risk: f64) -> String {
    let pct = risk * 100.0;
    if pct < 1.0 {
        "With these assumptions, fewer than 1 in 100 confessions obtained using this tactic would be false and lead to wrongful conviction.".to_string()
    } else if pct < 5.0 {
        format!(
            "With these assumptions, roughly {pct:.0} in 100 confessions obtained using this tactic would be false and lead to wrongful conviction."
        )
    } else {
        format!(
            "With these assumptions, about {pct:.0} in 100 confessions obtained using this tactic would be false and lead to wrongful conviction, a relatively high rate."
        )
    }
}

/// Compare a risk against the acceptability threshold, in percentage points.
pub fn interpret_threshold(risk: f64, threshold: f64) -> String {
    let risk_pct = risk * 100.0;
    let threshold_pct = threshold * 100.0;
    if risk < threshold {
        format!(
            "This is {:.1} percentage points below your chosen acceptability threshold of {threshold_pct:.1}%.",
            threshold_pct - risk_pct
        )
    } else {
        format!(
            "This exceeds your chosen acceptability threshold of {threshold_pct:.1}% by {:.1} percentage points.",
            risk_pct - threshold_pct
        )
    }
}

pub fn format_assessment(a: &RiskAssessment) -> String {
    let mut out = String::new();

    out.push_str("=== Wrongful conviction risk (Bayesian) ===\n");
    if let Some(label) = a.preset {
        out.push_str(&format!("Preset: {label}\n"));
    }
    out.push_str(&format!(
        "Base rate guilty: {:.3} | Sensitivity: {:.3} | Specificity: {:.3}\n",
        a.inputs.base_rate_guilty, a.inputs.sensitivity, a.inputs.specificity
    ));
    out.push_str(&format!("\nP(innocent | confession via tactic): {:.2}%\n", a.risk * 100.0));
    out.push_str(&format!(
        "Monte Carlo ({} draws): 5th {:.2}% | median {:.2}% | 95th {:.2}%\n",
        a.uncertainty.iterations,
        a.uncertainty.p5 * 100.0,
        a.uncertainty.p50 * 100.0,
        a.uncertainty.p95 * 100.0
    ));
    out.push_str(&format!(
        "Acceptable risk at lambda={}: {:.2}%\n",
        a.lambda,
        a.threshold * 100.0
    ));
    out.push('\n');
    out.push_str(&interpret_risk(a.risk));
    out.push('\n');
    out.push_str(&interpret_threshold(a.risk, a.threshold));
    out.push('\n');

    out
}

pub fn format_acceptability(curve: &[(u32, f64)]) -> String {
    let mut out = String::new();
    out.push_str("=== Acceptable risk by harm ratio ===\n");
    out.push_str("lambda  max risk\n");
    for (lambda, pct) in curve {
        out.push_str(&format!("{lambda:>6}  {pct:>7.2}%\n"));
    }
    out
}
