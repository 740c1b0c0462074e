//! Relative-risk ratios and data-density bias adjustment.

use serde::Serialize;

/// Event-rate ratio of the top `k` percent versus everyone else.
///
/// `share` is the fraction of events held by the top `k` percent. Returns `0.0`
/// when `k` is 0 or 100 (no "rest" group) or when the rest has no events.
pub fn relative_risk(share: f64, k: f64) -> f64 {
    if k <= 0.0 || k >= 100.0 {
        return 0.0;
    }
    let share_pct = share * 100.0;
    let rate_top = share_pct / k;
    let rate_rest = (100.0 - share_pct) / (100.0 - k);
    if rate_rest > 0.0 { rate_top / rate_rest } else { 0.0 }
}

/// Observed ratio divided by the ratio chance alone produces at the same `k`.
pub fn adjusted_ratio(naive_ratio: f64, null_ratio: f64) -> f64 {
    if null_ratio > 0.0 { naive_ratio / null_ratio } else { 0.0 }
}

/// Observed vs null concentration at one percentile cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskComparison {
    pub percentile: f64,
    pub observed_share: f64,
    pub null_share: f64,
    pub naive_ratio: f64,
    pub null_ratio: f64,
    pub adjusted_ratio: f64,
}

impl RiskComparison {
    pub fn from_shares(percentile: f64, observed_share: f64, null_share: f64) -> Self {
        let naive_ratio = relative_risk(observed_share, percentile);
        let null_ratio = relative_risk(null_share, percentile);
        Self {
            percentile,
            observed_share,
            null_share,
            naive_ratio,
            null_ratio,
            adjusted_ratio: adjusted_ratio(naive_ratio, null_ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_zero() {
        for share in [0.0, 0.3, 1.0] {
            assert_eq!(relative_risk(share, 0.0), 0.0);
            assert_eq!(relative_risk(share, 100.0), 0.0);
        }
    }

    #[test]
    fn proportional_share_is_unit_risk() {
        assert!((relative_risk(0.10, 10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn known_ratio() {
        // Top 2% hold 10%: rate 5 vs 90/98.
        let rr = relative_risk(0.10, 2.0);
        assert!((rr - 5.0 / (90.0 / 98.0)).abs() < 1e-12);
    }

    #[test]
    fn everything_in_the_top_is_guarded() {
        assert_eq!(relative_risk(1.0, 5.0), 0.0);
    }

    #[test]
    fn adjustment_divides_out_the_null() {
        assert!((adjusted_ratio(6.0, 2.0) - 3.0).abs() < 1e-12);
        assert_eq!(adjusted_ratio(6.0, 0.0), 0.0);

        let cmp = RiskComparison::from_shares(2.0, 0.10, 0.05);
        assert!((cmp.adjusted_ratio - cmp.naive_ratio / cmp.null_ratio).abs() < 1e-12);
        assert!(cmp.adjusted_ratio > 1.0);
    }
}
