//! Shared domain types.
//!
//! Everything here is a plain value: built from parameters, consumed by a single
//! call, never mutated afterwards. Result records derive `Serialize` so the CLI can
//! emit them as JSON.

use std::ops::RangeInclusive;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Per-entity event counts (e.g. complaints per officer).
///
/// Index order carries no meaning until the vector is ranked.
pub type CountVector = Vec<u64>;

/// Population sizes accepted at the application boundary.
pub const POPULATION_RANGE: RangeInclusive<usize> = 100..=15_000;
/// Event totals accepted at the application boundary.
pub const EVENT_RANGE: RangeInclusive<u64> = 10..=50_000;
/// Observation windows accepted at the application boundary (months).
pub const OBSERVATION_MONTHS_RANGE: RangeInclusive<u32> = 1..=120;

/// Default multiplier applied to the high tier's weight.
pub const DEFAULT_CONCENTRATION_FACTOR: f64 = 2.5;

/// Observation windows at or above this length use the stronger persistence.
pub const LONG_OBSERVATION_MONTHS: u32 = 60;

/// Hidden risk tier assigned to each synthetic entity.
///
/// The tier mixture, not the raw counts, is what makes generated populations
/// over-dispersed relative to a uniform assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    /// Probability that an entity lands in this tier.
    pub fn probability(self) -> f64 {
        match self {
            RiskTier::Low => 0.70,
            RiskTier::Medium => 0.25,
            RiskTier::High => 0.05,
        }
    }

    /// Upper edge of this tier's band on the `[0, 1)` unit interval.
    pub fn cumulative_threshold(self) -> f64 {
        match self {
            RiskTier::Low => 0.70,
            RiskTier::Medium => 0.95,
            RiskTier::High => 1.0,
        }
    }

    /// Raw sampling weight; only the high tier depends on the concentration factor.
    pub fn weight(self, concentration_factor: f64) -> f64 {
        match self {
            RiskTier::Low => 0.5,
            RiskTier::Medium => 1.5,
            RiskTier::High => concentration_factor * 2.0,
        }
    }

    /// Map a uniform draw onto a tier band.
    pub fn from_uniform(u: f64) -> Self {
        if u < RiskTier::Low.cumulative_threshold() {
            RiskTier::Low
        } else if u < RiskTier::Medium.cumulative_threshold() {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

/// Who fills the slots left by removed entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementStrategy {
    /// Department-wide median officer (40th–60th percentile).
    Median,
    /// Department-wide 70th–90th percentile officer.
    #[value(name = "p70-90")]
    #[serde(rename = "p70_90")]
    P70To90,
    /// Median officer drawn from the same district.
    SameDistrictMedian,
    /// 70th–90th percentile officer drawn from the same district.
    #[value(name = "same-district-p70-90")]
    #[serde(rename = "same_district_p70_90")]
    SameDistrictP70To90,
}

impl ReplacementStrategy {
    pub const ALL: [ReplacementStrategy; 4] = [
        ReplacementStrategy::Median,
        ReplacementStrategy::P70To90,
        ReplacementStrategy::SameDistrictMedian,
        ReplacementStrategy::SameDistrictP70To90,
    ];

    /// Replacement event rate, as a multiple of the population mean rate.
    pub fn factor(self) -> f64 {
        match self {
            ReplacementStrategy::Median => 0.50,
            ReplacementStrategy::P70To90 => 0.80,
            ReplacementStrategy::SameDistrictMedian => 0.55,
            ReplacementStrategy::SameDistrictP70To90 => 0.85,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ReplacementStrategy::Median => "Median officer (40-60th percentile)",
            ReplacementStrategy::P70To90 => "70-90th percentile",
            ReplacementStrategy::SameDistrictMedian => "Same district, median",
            ReplacementStrategy::SameDistrictP70To90 => "Same district, 70-90th percentile",
        }
    }
}

/// Inputs to the removal/replacement policy simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of entities (officers).
    pub population: usize,
    /// Events (complaints) over the full reference window.
    pub total_events: u64,
    /// Top share of the pre-period ranking that is removed, in percent.
    pub removal_percentile: f64,
    pub replacement: ReplacementStrategy,
    /// Length of the pre-period observation window in months (out of 120).
    pub observation_months: u32,
}

impl SimulationParams {
    /// Events expected during the pre-period: `floor(M · months / 120)`.
    pub fn pre_period_events(&self) -> u64 {
        self.total_events * u64::from(self.observation_months) / 120
    }

    /// Strength of rank persistence between the two periods.
    pub fn correlation_factor(&self) -> f64 {
        if self.observation_months >= LONG_OBSERVATION_MONTHS {
            0.4
        } else {
            0.25
        }
    }

    /// Number of entities removed: `floor(N · k / 100)`.
    pub fn removed_count(&self) -> usize {
        (self.population as f64 * self.removal_percentile / 100.0).floor() as usize
    }

    /// Mean events per entity over the full window.
    pub fn mean_rate(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.total_events as f64 / self.population as f64
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_population(self.population)?;
        validate_events(self.total_events)?;
        if !(self.removal_percentile.is_finite()
            && self.removal_percentile > 0.0
            && self.removal_percentile < 100.0)
        {
            return Err(AppError::invalid_input(format!(
                "Removal percentile must be in (0, 100), got {}.",
                self.removal_percentile
            )));
        }
        if !OBSERVATION_MONTHS_RANGE.contains(&self.observation_months) {
            return Err(AppError::invalid_input(format!(
                "Observation period must be within {}..={} months, got {}.",
                OBSERVATION_MONTHS_RANGE.start(),
                OBSERVATION_MONTHS_RANGE.end(),
                self.observation_months
            )));
        }
        Ok(())
    }
}

pub fn validate_population(population: usize) -> Result<(), AppError> {
    if !POPULATION_RANGE.contains(&population) {
        return Err(AppError::invalid_input(format!(
            "Population must be within {}..={}, got {population}.",
            POPULATION_RANGE.start(),
            POPULATION_RANGE.end()
        )));
    }
    Ok(())
}

pub fn validate_events(events: u64) -> Result<(), AppError> {
    if !EVENT_RANGE.contains(&events) {
        return Err(AppError::invalid_input(format!(
            "Event total must be within {}..={}, got {events}.",
            EVENT_RANGE.start(),
            EVENT_RANGE.end()
        )));
    }
    Ok(())
}

/// One point on a concentration curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Top share of ranked entities, in percent (0–100].
    pub percentile: f64,
    /// Share of all events held by those entities, as a fraction (0–1).
    pub share: f64,
}

/// Cumulative-share (Lorenz-style) curve over entities ranked by count.
///
/// Point `i` covers the top `i + 1` entities. The `(0, 0)` origin is implicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationCurve {
    pub points: Vec<CurvePoint>,
}

impl ConcentrationCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn shares(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.share).collect()
    }

    /// Share held by the top `rank + 1` entities (`0.0` past the end).
    pub fn share_at_rank(&self, rank: usize) -> f64 {
        self.points.get(rank).map_or(0.0, |p| p.share)
    }

    /// Points in percent units, prefixed with the `(0, 0)` origin.
    pub fn percent_points_with_origin(&self) -> Vec<(f64, f64)> {
        std::iter::once((0.0, 0.0))
            .chain(self.points.iter().map(|p| (p.percentile, p.share * 100.0)))
            .collect()
    }
}

/// Inputs to the Bayesian posterior-risk model.
///
/// All three are probabilities in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BayesInputs {
    /// P(guilty | confession) before the tactic is considered.
    pub base_rate_guilty: f64,
    /// P(tactic elicits confession | guilty).
    pub sensitivity: f64,
    /// P(no confession | innocent).
    pub specificity: f64,
}

impl BayesInputs {
    pub fn p_innocent(&self) -> f64 {
        1.0 - self.base_rate_guilty
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in [
            ("base rate", self.base_rate_guilty),
            ("sensitivity", self.sensitivity),
            ("specificity", self.specificity),
        ] {
            if !(value.is_finite() && value > 0.0 && value < 1.0) {
                return Err(AppError::invalid_input(format!(
                    "{name} must be a probability in (0, 1), got {value}."
                )));
            }
        }
        Ok(())
    }
}
