// ============================================================
// Layer 5 — Triage Model Artifact
// ============================================================
// The fitted model as an explicit value: the scaler and the
// forest travel together, plus the feature width they were
// fit on.
//
// Training RETURNS a TriageModel and prediction BORROWS one —
// there is no global mutable model state anywhere in the
// crate. That makes "predict before train" a compile error
// rather than a runtime hazard: you simply cannot construct a
// Predictor without a fitted model in hand.

use anyhow::{bail, Result};

use crate::ml::forest::BaggedForest;
use crate::ml::scaler::StandardScaler;

/// A complete fitted model: scaler + ensemble + expected
/// feature-vector width.
pub struct TriageModel {
    pub scaler: StandardScaler,
    pub forest: BaggedForest,
    /// Width every incoming feature vector must have
    /// (structural block + embedding block)
    pub feature_len: usize,
}

impl TriageModel {
    /// Scale one assembled feature vector and run the ensemble.
    /// Returns (label, positive-vote fraction).
    ///
    /// A width mismatch means the prediction pipeline is not
    /// the one the model was trained with — that is a hard
    /// error, never a silent truncation.
    pub fn classify(&self, row: &[f64]) -> Result<(usize, f64)> {
        if row.len() != self.feature_len {
            bail!(
                "Feature vector has length {} but the model was trained on {}",
                row.len(),
                self.feature_len,
            );
        }

        let mut scaled = row.to_vec();
        self.scaler.transform_row(&mut scaled);
        Ok(self.forest.predict_row(&scaled))
    }
}
