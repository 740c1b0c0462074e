//! Pre/post persistence grid.
//!
//! Percent of officers in the pre-period top `k%` who are also in the
//! post-period top `j%`, for `k, j ∈ {2, 5, 10, 20}`. Values follow the published
//! table; a long observation window (≥ 60 months) sharpens prediction by 1.5×.

use nalgebra::Matrix4;
use serde::Serialize;

use crate::domain::LONG_OBSERVATION_MONTHS;

/// Percentile cuts labelling both axes.
pub const PERSISTENCE_CUTS: [u32; 4] = [2, 5, 10, 20];

const LONG_WINDOW_SCALE: f64 = 1.5;

/// Rows are pre-period cuts, columns post-period cuts.
fn base_table() -> Matrix4<f64> {
    Matrix4::new(
        2.0, 8.0, 18.0, 37.0, //
        3.5, 12.0, 22.0, 35.0, //
        3.4, 8.5, 17.0, 28.0, //
        3.0, 8.3, 15.0, 26.0,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersistenceCell {
    pub pre_percentile: u32,
    pub post_percentile: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceMatrix {
    pub observation_months: u32,
    pub values: Matrix4<f64>,
}

impl PersistenceMatrix {
    /// Value for a (pre, post) cut pair, if both are known cuts.
    pub fn get(&self, pre: u32, post: u32) -> Option<f64> {
        let row = PERSISTENCE_CUTS.iter().position(|&c| c == pre)?;
        let col = PERSISTENCE_CUTS.iter().position(|&c| c == post)?;
        Some(self.values[(row, col)])
    }

    /// Row-major list of cells (pre outer, post inner).
    pub fn cells(&self) -> Vec<PersistenceCell> {
        let mut out = Vec::with_capacity(PERSISTENCE_CUTS.len() * PERSISTENCE_CUTS.len());
        for (row, &pre) in PERSISTENCE_CUTS.iter().enumerate() {
            for (col, &post) in PERSISTENCE_CUTS.iter().enumerate() {
                out.push(PersistenceCell {
                    pre_percentile: pre,
                    post_percentile: post,
                    value: self.values[(row, col)],
                });
            }
        }
        out
    }
}

pub fn persistence_matrix(observation_months: u32) -> PersistenceMatrix {
    let scale = if observation_months >= LONG_OBSERVATION_MONTHS {
        LONG_WINDOW_SCALE
    } else {
        1.0
    };
    let values = (base_table() * scale).map(|v| v.min(100.0));
    PersistenceMatrix {
        observation_months,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_window_uses_base_table() {
        let m = persistence_matrix(18);
        assert_eq!(m.get(2, 20), Some(37.0));
        assert_eq!(m.get(10, 5), Some(8.5));
        assert_eq!(m.get(3, 5), None);
    }

    #[test]
    fn long_window_scales_and_caps() {
        let m = persistence_matrix(60);
        assert_eq!(m.get(2, 20), Some(55.5));
        assert_eq!(m.get(20, 2), Some(4.5));
        assert!(m.cells().iter().all(|c| c.value <= 100.0));
    }

    #[test]
    fn cells_are_row_major() {
        let cells = persistence_matrix(18).cells();
        assert_eq!(cells.len(), 16);
        assert_eq!((cells[0].pre_percentile, cells[0].post_percentile), (2, 2));
        assert_eq!((cells[1].pre_percentile, cells[1].post_percentile), (2, 5));
        assert_eq!((cells[4].pre_percentile, cells[4].post_percentile), (5, 2));
        assert_eq!(cells[4].value, 3.5);
    }
}
