//! Concentration (Lorenz-style) curves.

use crate::domain::{ConcentrationCurve, CurvePoint};

/// Entity indices ordered by descending count.
///
/// Ties keep their original index order, so the ranking is deterministic.
pub fn rank_descending(counts: &[u64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));
    order
}

/// Running share of `total` over a descending-sorted count slice.
///
/// Every share is `0.0` when `total` is zero.
pub fn cumulative_shares(sorted_desc: &[u64], total: u64) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; sorted_desc.len()];
    }
    let total = total as f64;
    let mut cum = 0u64;
    sorted_desc
        .iter()
        .map(|&c| {
            cum += c;
            cum as f64 / total
        })
        .collect()
}

/// Percentile of the `rank`-th entity (0-based) in a population of `n`.
pub fn rank_percentile(rank: usize, n: usize) -> f64 {
    (rank + 1) as f64 / n as f64 * 100.0
}

/// Attach rank percentiles to a share vector.
pub fn curve_from_shares(shares: Vec<f64>) -> ConcentrationCurve {
    let n = shares.len();
    let points = shares
        .into_iter()
        .enumerate()
        .map(|(i, share)| CurvePoint {
            percentile: rank_percentile(i, n),
            share,
        })
        .collect();
    ConcentrationCurve { points }
}

/// Concentration curve of a count vector.
///
/// Sorts descending and accumulates; point `i` sits at percentile
/// `(i + 1) / N · 100`. A zero total yields a curve flat at zero.
pub fn concentration_curve(counts: &[u64]) -> ConcentrationCurve {
    let mut sorted = counts.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let total: u64 = sorted.iter().sum();
    curve_from_shares(cumulative_shares(&sorted, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_of_small_vector() {
        let curve = concentration_curve(&[1, 5, 0, 4]);
        let shares = curve.shares();
        assert!((shares[0] - 0.5).abs() < 1e-12);
        assert!((shares[1] - 0.9).abs() < 1e-12);
        assert!((shares[2] - 1.0).abs() < 1e-12);
        assert!((shares[3] - 1.0).abs() < 1e-12);
        assert_eq!(curve.points[0].percentile, 25.0);
        assert_eq!(curve.points[3].percentile, 100.0);
    }

    #[test]
    fn zero_total_is_flat() {
        let curve = concentration_curve(&[0, 0, 0]);
        assert_eq!(curve.shares(), vec![0.0, 0.0, 0.0]);
        assert_eq!(curve.points[2].percentile, 100.0);
    }

    #[test]
    fn curve_is_monotone_and_ends_at_one() {
        let counts: Vec<u64> = (0..200).map(|i| (i * 7919 % 13) as u64).collect();
        let curve = concentration_curve(&counts);
        for w in curve.points.windows(2) {
            assert!(w[1].share >= w[0].share);
            assert!(w[1].percentile > w[0].percentile);
        }
        assert!(curve.points.iter().all(|p| (0.0..=1.0).contains(&p.share)));
        assert!((curve.points.last().unwrap().share - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_counts_follow_the_diagonal() {
        let curve = concentration_curve(&[3; 10]);
        for p in &curve.points {
            assert!((p.share * 100.0 - p.percentile).abs() < 1e-9);
        }
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        assert_eq!(rank_descending(&[2, 5, 2, 7, 5]), vec![3, 1, 4, 0, 2]);
    }
}
