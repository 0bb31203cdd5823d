// ============================================================
// Layer 5 — Bagged Tree Ensemble
// ============================================================
// A bootstrap-aggregated ("bagged") forest of CART decision
// trees, built on linfa-trees:
//
//   for each of n_trees:
//     1. Draw a bootstrap resample (sample WITH replacement,
//        same size as the training set) from a seeded RNG
//     2. Fit one decision tree on the resample
//
//   to predict:
//     every tree votes; majority wins, and the fraction of
//     positive votes doubles as a confidence score
//
// Why bagging?
//   A single deep tree memorises the training set. Averaging
//   many trees fit on perturbed resamples keeps the low bias
//   of deep trees while cancelling most of their variance.
//
// Determinism: the only randomness is the bootstrap sampling,
// and that comes from StdRng::seed_from_u64 — a fixed seed
// reproduces the exact same forest.
//
// Reference: Breiman (1996) "Bagging predictors"
//            Breiman (2001) "Random forests"
//            linfa-trees crate documentation

use anyhow::{bail, Result};
use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ensemble hyperparameters.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Depth cap per tree; None lets trees grow out fully
    pub max_depth: Option<usize>,
    /// Seed for the bootstrap sampling
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees:   100,
            max_depth: None,
            seed:      42,
        }
    }
}

/// A fitted ensemble. An instance of this struct IS the
/// classifier state — training returns it, prediction borrows it.
pub struct BaggedForest {
    trees: Vec<DecisionTree<f64, usize>>,
}

impl BaggedForest {
    /// Fit the ensemble on scaled training data.
    ///
    /// `features` is [n_samples, n_features]; `labels` is the
    /// parallel 0/1 target vector.
    pub fn fit(config: &ForestConfig, features: &Array2<f64>, labels: &Array1<usize>) -> Result<Self> {
        let n_samples = features.nrows();
        if n_samples == 0 {
            bail!("Cannot fit a forest on an empty training set");
        }
        if config.n_trees == 0 {
            bail!("Forest needs at least one tree");
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            // Bootstrap resample: n_samples draws with replacement
            let draw: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
            let boot_x = features.select(Axis(0), &draw);
            let boot_y = labels.select(Axis(0), &draw);

            let dataset = Dataset::new(boot_x, boot_y);
            let tree = DecisionTree::params()
                .max_depth(config.max_depth)
                .fit(&dataset)?;
            trees.push(tree);
        }

        tracing::debug!("Fitted {} trees (seed {})", trees.len(), config.seed);
        Ok(Self { trees })
    }

    /// Majority-vote prediction for one scaled row.
    /// Returns (label, positive-vote fraction).
    pub fn predict_row(&self, row: &[f64]) -> (usize, f64) {
        let x = Array1::from_vec(row.to_vec()).insert_axis(Axis(0));

        let positive_votes = self
            .trees
            .iter()
            .filter(|tree| tree.predict(&x)[0] == 1)
            .count();

        let confidence = positive_votes as f64 / self.trees.len() as f64;
        let label = usize::from(confidence >= 0.5);
        (label, confidence)
    }

    /// Predict a label for every row of a scaled matrix.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<usize> {
        rows.iter().map(|row| self.predict_row(row).0).collect()
    }

    /// Number of trees in the fitted ensemble
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Two well-separated clusters so even a tiny forest
    /// classifies them perfectly.
    fn toy_data() -> (Array2<f64>, Array1<usize>) {
        let features = array![
            [0.0, 0.1],
            [0.2, 0.0],
            [0.1, 0.2],
            [0.0, 0.3],
            [5.0, 5.1],
            [5.2, 5.0],
            [5.1, 5.2],
            [5.0, 5.3],
        ];
        let labels = array![0, 0, 0, 0, 1, 1, 1, 1];
        (features, labels)
    }

    fn config(n_trees: usize, seed: u64) -> ForestConfig {
        ForestConfig { n_trees, max_depth: Some(8), seed }
    }

    #[test]
    fn test_separable_data_is_learned() {
        let (x, y) = toy_data();
        let forest = BaggedForest::fit(&config(25, 42), &x, &y).unwrap();

        let (label0, conf0) = forest.predict_row(&[0.1, 0.1]);
        let (label1, conf1) = forest.predict_row(&[5.1, 5.1]);

        assert_eq!(label0, 0);
        assert_eq!(label1, 1);
        assert!((0.0..=1.0).contains(&conf0));
        assert!((0.0..=1.0).contains(&conf1));
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let (x, y) = toy_data();
        let a = BaggedForest::fit(&config(15, 7), &x, &y).unwrap();
        let b = BaggedForest::fit(&config(15, 7), &x, &y).unwrap();

        let probe = vec![
            vec![0.5, 0.5],
            vec![2.5, 2.6],
            vec![4.9, 5.0],
        ];
        assert_eq!(a.predict(&probe), b.predict(&probe));
    }

    #[test]
    fn test_empty_training_set_is_an_error() {
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<usize>::zeros(0);
        assert!(BaggedForest::fit(&config(5, 1), &x, &y).is_err());
    }

    #[test]
    fn test_tree_count_matches_config() {
        let (x, y) = toy_data();
        let forest = BaggedForest::fit(&config(9, 3), &x, &y).unwrap();
        assert_eq!(forest.len(), 9);
    }
}
