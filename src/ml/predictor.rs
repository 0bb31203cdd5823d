// ============================================================
// Layer 5 — Predictor
// ============================================================
// Applies a fitted TriageModel to one new document, running
// the exact same four-stage feature pipeline the dataset
// builder used for training:
//
//   extract → structural features → normalize → embed →
//   assemble → scale → ensemble vote
//
// Failure contract matches the rest of the pipeline:
//   Ok(None)  — extraction failed; caller skips the file
//   Ok(Some)  — a Prediction with label and confidence
//   Err(..)   — genuine bug (e.g. feature width mismatch)

use anyhow::Result;
use std::path::Path;

use crate::data::dataset::DatasetBuilder;
use crate::domain::traits::{Embedder, TextExtractor};
use crate::ml::model::TriageModel;

/// One screening verdict for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Source filename of the PDF
    pub paper_id: String,
    /// Predicted label — 1 = publishable
    pub label: usize,
    /// Fraction of trees that voted publishable, in [0, 1]
    pub confidence: f64,
}

/// Borrows the fitted model plus the feature pipeline seams.
/// Constructing one REQUIRES a model — predicting before
/// training cannot be expressed.
pub struct Predictor<'a, X: TextExtractor, E: Embedder> {
    builder: DatasetBuilder<'a, X, E>,
    model:   &'a TriageModel,
}

impl<'a, X: TextExtractor, E: Embedder> Predictor<'a, X, E> {
    pub fn new(extractor: &'a X, embedder: &'a E, model: &'a TriageModel) -> Self {
        Self {
            builder: DatasetBuilder::new(extractor, embedder),
            model,
        }
    }

    /// Classify a single document on disk.
    pub fn predict_file(&self, path: &Path) -> Result<Option<Prediction>> {
        let row = match self.builder.feature_vector(path)? {
            Some(row) => row,
            None => return Ok(None),
        };

        let (label, confidence) = self.model.classify(&row)?;

        let paper_id = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!("'{}' → {} (confidence {:.2})", paper_id, label, confidence);

        Ok(Some(Prediction { paper_id, label, confidence }))
    }
}
