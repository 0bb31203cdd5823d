// ============================================================
// Layer 4 — Feature Assembly and Dataset Builder
// ============================================================
// Runs the per-document feature pipeline and stacks the
// results into a training matrix:
//
//   PDF path
//       │
//       ▼
//   TextExtractor      → raw text, or None (skip)
//       │
//       ├──────────────▶ StructuralFeatureExtractor (raw text)
//       ▼
//   Normalizer         → content tokens
//       │
//       ▼
//   Embedder           → dense vector
//       │
//       ▼
//   assemble()         → [13 structural | embedding] row
//
// Documents whose extraction fails are skipped, and the skip
// set is part of the returned report — callers can count and
// name every excluded file instead of digging through logs.
//
// Invariants:
//   - features.len() == labels.len()
//   - every row has length FEATURE_COUNT + embedder.dim()
//
// Reference: Rust Book §10 (Generic Types and Traits)

use anyhow::{bail, Result};

use crate::data::features::StructuralFeatureExtractor;
use crate::data::normalizer::Normalizer;
use crate::domain::document::LabeledPaper;
use crate::domain::features::{StructuralFeatures, FEATURE_COUNT};
use crate::domain::traits::{Embedder, TextExtractor};

/// Concatenate the structural block (schema order) with the
/// embedding block into one flat classifier row.
pub fn assemble(structural: &StructuralFeatures, embedding: &[f32]) -> Vec<f64> {
    let mut row = Vec::with_capacity(FEATURE_COUNT + embedding.len());
    row.extend_from_slice(&structural.to_vector());
    row.extend(embedding.iter().map(|&v| f64::from(v)));
    row
}

/// Everything the dataset build produced, including what it
/// had to leave out.
#[derive(Debug)]
pub struct DatasetReport {
    /// One row per surviving document
    pub features: Vec<Vec<f64>>,
    /// Parallel ground-truth labels (0/1)
    pub labels: Vec<usize>,
    /// Paper ids whose text extraction failed
    pub skipped: Vec<String>,
}

/// Drives the four-stage feature pipeline for one document at
/// a time. Generic over the extractor and embedder seams so
/// tests can run the full pipeline without PDFs or ONNX files.
pub struct DatasetBuilder<'a, X: TextExtractor, E: Embedder> {
    extractor:  &'a X,
    embedder:   &'a E,
    normalizer: Normalizer,
    structural: StructuralFeatureExtractor,
}

impl<'a, X: TextExtractor, E: Embedder> DatasetBuilder<'a, X, E> {
    pub fn new(extractor: &'a X, embedder: &'a E) -> Self {
        Self {
            extractor,
            embedder,
            normalizer: Normalizer::new(),
            structural: StructuralFeatureExtractor::new(),
        }
    }

    /// The row width every document must produce
    pub fn expected_len(&self) -> usize {
        FEATURE_COUNT + self.embedder.dim()
    }

    /// Run the pipeline for one document.
    ///
    /// Ok(None) means "extraction failed, skip this one".
    /// A row of the wrong width is a bug, not a skip — it
    /// would poison the matrix — so that case is a hard error.
    pub fn feature_vector(&self, path: &std::path::Path) -> Result<Option<Vec<f64>>> {
        let raw = match self.extractor.extract(path) {
            Some(text) => text,
            None => return Ok(None),
        };

        let structural = self.structural.extract(&raw);
        let normalized = self.normalizer.normalize(&raw);
        let embedding  = self.embedder.embed(&normalized)?;

        let row = assemble(&structural, &embedding);
        if row.len() != self.expected_len() {
            bail!(
                "Feature row for '{}' has length {} (expected {})",
                path.display(),
                row.len(),
                self.expected_len(),
            );
        }

        Ok(Some(row))
    }

    /// Build the training matrix from labeled papers.
    /// Failed extractions drop BOTH the row and its label, and
    /// land in the report's skip list.
    pub fn build(&self, papers: &[LabeledPaper]) -> Result<DatasetReport> {
        let mut features = Vec::with_capacity(papers.len());
        let mut labels   = Vec::with_capacity(papers.len());
        let mut skipped  = Vec::new();

        for paper in papers {
            match self.feature_vector(&paper.path)? {
                Some(row) => {
                    features.push(row);
                    labels.push(paper.label);
                }
                None => skipped.push(paper.paper_id()),
            }
        }

        tracing::info!(
            "Dataset built: {} documents, {} skipped",
            features.len(),
            skipped.len()
        );

        Ok(DatasetReport { features, labels, skipped })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::domain::traits::{Embedder, TextExtractor};
    use std::path::{Path, PathBuf};

    /// Extractor stub: fails for any path containing "broken"
    pub struct StubExtractor;

    impl TextExtractor for StubExtractor {
        fn extract(&self, path: &Path) -> Option<String> {
            if path.to_string_lossy().contains("broken") {
                None
            } else {
                Some(format!("Abstract. A model for {}.", path.display()))
            }
        }
    }

    /// Deterministic 8-dim embedding from byte sums — no model file
    pub struct StubEmbedder;

    impl Embedder for StubEmbedder {
        fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
            let mut v = vec![0.0f32; 8];
            for (i, b) in text.bytes().enumerate() {
                v[i % 8] += f32::from(b) / 255.0;
            }
            Ok(v)
        }

        fn dim(&self) -> usize {
            8
        }
    }

    fn labeled(name: &str, label: usize) -> LabeledPaper {
        LabeledPaper::new(PathBuf::from(name), label)
    }

    #[test]
    fn test_rows_have_constant_width() {
        let builder = DatasetBuilder::new(&StubExtractor, &StubEmbedder);
        let papers = vec![labeled("a.pdf", 1), labeled("b.pdf", 0)];
        let report = builder.build(&papers).unwrap();

        assert_eq!(report.features.len(), 2);
        for row in &report.features {
            assert_eq!(row.len(), FEATURE_COUNT + 8);
        }
    }

    #[test]
    fn test_failed_extraction_drops_row_and_label() {
        let builder = DatasetBuilder::new(&StubExtractor, &StubEmbedder);
        let papers = vec![
            labeled("ok1.pdf", 1),
            labeled("broken.pdf", 0),
            labeled("ok2.pdf", 0),
        ];
        let report = builder.build(&papers).unwrap();

        assert_eq!(report.features.len(), 2);
        assert_eq!(report.labels, vec![1, 0]);
        assert_eq!(report.skipped, vec!["broken.pdf".to_string()]);
    }

    #[test]
    fn test_structural_block_comes_first() {
        let builder = DatasetBuilder::new(&StubExtractor, &StubEmbedder);
        let row = builder
            .feature_vector(Path::new("a.pdf"))
            .unwrap()
            .unwrap();
        // Stub text starts with "Abstract." → has_abstract is slot 0
        assert_eq!(row[0], 1.0);
    }
}
