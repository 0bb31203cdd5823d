// ============================================================
// Layer 5 — Training and Evaluation
// ============================================================
// Turns a built dataset into a fitted TriageModel:
//
//   1. Stratified 80/20 split (seeded — reproducible)
//   2. Fit the scaler on the TRAINING rows only
//   3. Scale both partitions with those statistics
//   4. Fit the bagged forest on the scaled training data
//   5. Evaluate on the held-out partition: per-class report
//      plus binary F1 (positive class = publishable)
//
// The fitted model is RETURNED to the caller; nothing in here
// mutates shared state.
//
// Reference: Breiman (2001) Random forests
//            linfa crate documentation

use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2};

use crate::application::train_use_case::TrainConfig;
use crate::data::dataset::DatasetReport;
use crate::data::splitter::stratified_split;
use crate::infra::metrics::ClassificationReport;
use crate::ml::forest::{BaggedForest, ForestConfig};
use crate::ml::model::TriageModel;
use crate::ml::scaler::StandardScaler;

/// What a training run hands back: the fitted model and the
/// held-out F1 it achieved.
pub struct TrainOutcome {
    pub model: TriageModel,
    pub f1:    f64,
}

pub fn run_training(cfg: &TrainConfig, dataset: DatasetReport) -> Result<TrainOutcome> {
    if dataset.features.is_empty() {
        bail!("No training documents survived extraction — nothing to fit");
    }
    let feature_len = dataset.features[0].len();

    // ── Step 1: Stratified split ──────────────────────────────────────────────
    let split = stratified_split(&dataset.labels, cfg.train_fraction, cfg.seed);
    tracing::info!(
        "Split: {} train, {} test (fraction {:.2}, seed {})",
        split.train.len(),
        split.test.len(),
        cfg.train_fraction,
        cfg.seed,
    );

    let train_rows   = gather(&dataset.features, &split.train);
    let train_labels = gather(&dataset.labels, &split.train);
    let test_rows    = gather(&dataset.features, &split.test);
    let test_labels  = gather(&dataset.labels, &split.test);

    if train_rows.is_empty() {
        bail!("Training partition is empty — labeled set is too small");
    }

    // ── Step 2–3: Fit scaler on train, apply to both ──────────────────────────
    let scaler = StandardScaler::fit(&train_rows);
    let scaled_train = scaler.transform(&train_rows);
    let scaled_test  = scaler.transform(&test_rows);

    // ── Step 4: Fit the ensemble ──────────────────────────────────────────────
    let forest_cfg = ForestConfig {
        n_trees:   cfg.trees,
        max_depth: cfg.max_depth,
        seed:      cfg.seed,
    };
    let forest = BaggedForest::fit(
        &forest_cfg,
        &to_matrix(&scaled_train)?,
        &Array1::from_vec(train_labels),
    )?;

    // ── Step 5: Evaluate on held-out data ─────────────────────────────────────
    let f1 = if test_rows.is_empty() {
        tracing::warn!("Test partition is empty — skipping evaluation");
        0.0
    } else {
        let predicted = forest.predict(&scaled_test);
        let report = ClassificationReport::compute(&test_labels, &predicted);

        println!("{report}");
        let f1 = report.f1_for(1);
        println!("\nBinary F1 (publishable = 1): {f1:.4}");
        f1
    };

    Ok(TrainOutcome {
        model: TriageModel { scaler, forest, feature_len },
        f1,
    })
}

/// Select the rows at `indices`, cloning into a new Vec.
fn gather<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

/// Stack equal-width rows into a [n, d] matrix.
fn to_matrix(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n = rows.len();
    let d = rows.first().map_or(0, Vec::len);
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((n, d), flat).context("Ragged feature matrix")
}
