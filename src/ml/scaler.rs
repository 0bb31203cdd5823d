// ============================================================
// Layer 5 — Standard Scaler
// ============================================================
// Column-wise standardisation: x' = (x − mean) / std.
//
// Why scale at all?
//   The assembled vectors mix wildly different magnitudes —
//   a word count in the thousands next to embedding entries
//   in [−1, 1]. Without standardisation the large columns
//   dominate every split criterion the trees consider.
//
// The scaler is fit on the TRAINING partition only and then
// applied unchanged to the test partition and to every later
// prediction — fitting on all data would leak test statistics
// into training.
//
// Zero-variance columns (e.g. has_abstract when every training
// paper has one) keep a divisor of 1 so they map to 0 instead
// of NaN.

use serde::{Deserialize, Serialize};

/// Fitted per-column statistics. An instance of this struct IS
/// the scaler state — there is no hidden global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds:  Vec<f64>,
}

impl StandardScaler {
    /// Fit means and standard deviations on the training rows.
    /// Every row must have the same width as the first.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut means = vec![0.0f64; width];
        for row in rows {
            for (m, &v) in means.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n.max(1) as f64;
        }

        let mut stds = vec![0.0f64; width];
        for row in rows {
            for ((s, &m), &v) in stds.iter_mut().zip(means.iter()).zip(row.iter()) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut stds {
            *s = (*s / n.max(1) as f64).sqrt();
            // Constant columns divide by 1, not by 0
            if *s < 1e-12 {
                *s = 1.0;
            }
        }

        Self { means, stds }
    }

    /// Standardise one row in place.
    pub fn transform_row(&self, row: &mut [f64]) {
        for ((v, &m), &s) in row.iter_mut().zip(self.means.iter()).zip(self.stds.iter()) {
            *v = (*v - m) / s;
        }
    }

    /// Standardise a whole matrix, returning the scaled copy.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter()
            .map(|row| {
                let mut out = row.clone();
                self.transform_row(&mut out);
                out
            })
            .collect()
    }

    /// Width the scaler was fit on
    pub fn width(&self) -> usize {
        self.means.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_training_data_has_zero_mean() {
        let rows = vec![
            vec![1.0, 100.0],
            vec![2.0, 200.0],
            vec![3.0, 300.0],
        ];
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows);

        for col in 0..2 {
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-9, "column {col} mean was {mean}");
        }
    }

    #[test]
    fn test_constant_column_does_not_produce_nan() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows);

        for row in &scaled {
            assert!(row.iter().all(|v| v.is_finite()));
            // Constant column maps to exactly 0
            assert_eq!(row[0], 0.0);
        }
    }

    #[test]
    fn test_transform_uses_training_statistics() {
        let train = vec![vec![0.0], vec![10.0]];
        let scaler = StandardScaler::fit(&train);

        // mean 5, std 5 → 15 scales to 2.0 regardless of what
        // the "test" distribution looks like
        let mut row = vec![15.0];
        scaler.transform_row(&mut row);
        assert!((row[0] - 2.0).abs() < 1e-9);
    }
}
