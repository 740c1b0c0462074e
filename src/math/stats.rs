//! Summary statistics over Monte Carlo outcomes.

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sort ascending with a total order (NaN sorts last).
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

/// Empirical percentile of an ascending-sorted slice.
///
/// Reads the value at index `floor(p * len)`, clamped to the last valid index.
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (p * sorted.len() as f64).floor().max(0.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}
